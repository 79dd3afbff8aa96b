// Standalone MCP server binary (stdio transport)

use anyhow::Result;
use std::sync::Arc;
use voidly_core::{VoidlyClient, VoidlyConfig};
use voidly_mcp::resources::ResourceReader;
use voidly_mcp::tools;
use voidly_mcp::McpServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = VoidlyConfig::from_env()?;
    tracing::info!(
        api = %config.api_base,
        data_api = %config.data_api_base,
        "Voidly MCP server starting"
    );

    let client = Arc::new(VoidlyClient::new(config)?);
    let registry = tools::default_registry(client.clone());
    let resources = ResourceReader::new(client);

    let server = McpServer::new(registry, resources);
    server.serve_stdio().await
}
