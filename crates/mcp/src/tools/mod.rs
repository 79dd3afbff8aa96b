// Tool trait, registry, and the censorship-monitor tool set

pub mod country;
pub mod incidents;
pub mod index;

mod registry;

pub use country::{CheckDomainBlockedTool, CountryStatusTool};
pub use incidents::ActiveIncidentsTool;
pub use index::{CensorshipIndexTool, MostCensoredTool};
pub use registry::{
    json_schema_integer, json_schema_object, json_schema_string, Tool, ToolRegistry,
};

use std::sync::Arc;
use voidly_core::VoidlyClient;

/// Registry with the full tool set wired to one shared client.
pub fn default_registry(client: Arc<VoidlyClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CensorshipIndexTool::new(client.clone())));
    registry.register(Arc::new(CountryStatusTool::new(client.clone())));
    registry.register(Arc::new(CheckDomainBlockedTool::new(client.clone())));
    registry.register(Arc::new(MostCensoredTool::new(client.clone())));
    registry.register(Arc::new(ActiveIncidentsTool::new(client)));
    registry
}
