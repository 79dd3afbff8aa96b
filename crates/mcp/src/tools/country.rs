// Per-country tools: status lookup and the domain-blocking check

use crate::protocol::ToolSchema;
use crate::tools::{json_schema_object, json_schema_string, Tool};
use serde::Deserialize;
use std::sync::Arc;
use voidly_core::{report, Error, Result, VoidlyClient};

/// Validate a required string argument: present and non-blank.
fn require(value: Option<String>, name: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::MissingArgument(name)),
    }
}

/// Fetch one country and render its status report. The code is
/// upper-cased before it reaches the wire or the reference table.
async fn country_report(client: &VoidlyClient, raw_code: &str) -> Result<String> {
    let code = raw_code.trim().to_uppercase();
    let record = client.country(&code).await?;
    Ok(report::country_status(&code, &record))
}

/// `get_country_status` — current status, measurements, incidents, and an
/// interpretation paragraph for one country.
pub struct CountryStatusTool {
    client: Arc<VoidlyClient>,
}

impl CountryStatusTool {
    pub fn new(client: Arc<VoidlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CountryStatusArgs {
    #[serde(default)]
    country_code: Option<String>,
}

#[async_trait::async_trait]
impl Tool for CountryStatusTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_country_status".to_string(),
            description: "Get the current censorship status for one country: connectivity \
                          status, measurement metrics, and active incidents"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "country_code": json_schema_string("Two-letter ISO country code, e.g. IR")
                }),
                vec!["country_code"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<String> {
        let args: CountryStatusArgs = serde_json::from_value(arguments)?;
        let code = require(args.country_code, "country_code")?;
        country_report(&self.client, &code).await
    }
}

/// `check_domain_blocked` — no public per-domain endpoint exists, so this
/// answers with the country-level report behind a disclaimer.
pub struct CheckDomainBlockedTool {
    client: Arc<VoidlyClient>,
}

impl CheckDomainBlockedTool {
    pub fn new(client: Arc<VoidlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CheckDomainBlockedArgs {
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

#[async_trait::async_trait]
impl Tool for CheckDomainBlockedTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "check_domain_blocked".to_string(),
            description: "Check whether a domain is likely affected by censorship in a \
                          country. Domain-level data is not public, so the answer is the \
                          country-level censorship report"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "domain": json_schema_string("Domain to check, e.g. example.com"),
                    "country_code": json_schema_string("Two-letter ISO country code, e.g. IR")
                }),
                vec!["domain", "country_code"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<String> {
        let args: CheckDomainBlockedArgs = serde_json::from_value(arguments)?;
        let domain = require(args.domain, "domain")?;
        let code = require(args.country_code, "country_code")?;

        let upper = code.trim().to_uppercase();
        let status = country_report(&self.client, &code).await?;
        Ok(format!(
            "{}{status}",
            report::domain_disclaimer(&domain, &upper)
        ))
    }
}
