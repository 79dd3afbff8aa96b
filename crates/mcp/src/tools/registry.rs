// Tool trait and registry

use crate::protocol::ToolSchema;
use std::collections::BTreeMap;
use std::sync::Arc;
use voidly_core::Result;

/// A named, schema-described operation callable over MCP.
///
/// `execute` returns the markdown body of a successful call. Failures
/// bubble up untouched; the dispatch boundary in `server` owns the
/// conversion into an `isError` envelope.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Schema advertised by `tools/list`.
    fn schema(&self) -> ToolSchema;

    /// Run the tool against the given argument bag.
    async fn execute(&self, arguments: serde_json::Value) -> Result<String>;
}

/// Registry of available tools, keyed by name. BTreeMap keeps
/// `tools/list` output in a deterministic order.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name, tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helpers for building input schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "description": description
    })
}
