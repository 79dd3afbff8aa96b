// Active-incidents tool

use crate::protocol::ToolSchema;
use crate::tools::{json_schema_object, Tool};
use std::sync::Arc;
use voidly_core::{report, Result, VoidlyClient};

/// `get_active_incidents` — the current incident feed, newest first as
/// delivered by the upstream service.
pub struct ActiveIncidentsTool {
    client: Arc<VoidlyClient>,
}

impl ActiveIncidentsTool {
    pub fn new(client: Arc<VoidlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ActiveIncidentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_active_incidents".to_string(),
            description: "List active censorship incidents worldwide with severity, \
                          status, and affected services"
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<String> {
        let feed = self.client.incidents().await?;
        Ok(report::active_incidents(&feed))
    }
}
