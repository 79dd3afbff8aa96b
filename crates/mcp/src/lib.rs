// MCP (Model Context Protocol) server exposing the Voidly censorship
// monitor as tools and resources over JSON-RPC/stdio.

pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use server::McpServer;
