// Tools over the global censorship-index snapshot

use crate::protocol::ToolSchema;
use crate::tools::{json_schema_integer, json_schema_object, Tool};
use serde::Deserialize;
use std::sync::Arc;
use voidly_core::{report, Result, VoidlyClient};

const DEFAULT_LIMIT: f64 = 10.0;
const MIN_LIMIT: f64 = 1.0;
const MAX_LIMIT: f64 = 50.0;

/// `get_censorship_index` — global summary plus top-ten ranking.
pub struct CensorshipIndexTool {
    client: Arc<VoidlyClient>,
}

impl CensorshipIndexTool {
    pub fn new(client: Arc<VoidlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CensorshipIndexTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_censorship_index".to_string(),
            description: "Get the global internet censorship index: per-status country counts \
                          and the most censored countries by measurement anomaly rate"
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<String> {
        let snapshot = self.client.censorship_index().await?;
        Ok(report::global_index(&snapshot))
    }
}

/// `get_most_censored` — ranked list limited to countries with a
/// meaningful measurement base.
pub struct MostCensoredTool {
    client: Arc<VoidlyClient>,
}

impl MostCensoredTool {
    pub fn new(client: Arc<VoidlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct MostCensoredArgs {
    #[serde(default)]
    limit: Option<f64>,
}

#[async_trait::async_trait]
impl Tool for MostCensoredTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_most_censored".to_string(),
            description: "List the most censored countries ranked by anomaly rate, \
                          considering only countries with more than 100 measurements"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_integer(
                        "Number of countries to return (default 10, between 1 and 50)"
                    )
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<String> {
        let args: MostCensoredArgs = serde_json::from_value(arguments)?;
        let limit = args
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(MIN_LIMIT, MAX_LIMIT) as usize;

        let snapshot = self.client.censorship_index().await?;
        Ok(report::most_censored(&snapshot, limit))
    }
}
