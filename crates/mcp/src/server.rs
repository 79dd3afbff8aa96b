// JSON-RPC dispatch and the newline-delimited stdio transport loop

use crate::protocol::{
    CallToolParams, CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ReadResourceParams, PROTOCOL_VERSION,
};
use crate::resources::ResourceReader;
use crate::tools::ToolRegistry;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use voidly_core::Error;

const SERVER_NAME: &str = "voidly-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inbound lines above this size are rejected before parsing.
const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// MCP server: tool registry, resource reader, request dispatch.
///
/// Requests are handled one at a time in arrival order. Handlers are
/// stateless, so this is a simplicity choice rather than a requirement.
pub struct McpServer {
    registry: ToolRegistry,
    resources: ResourceReader,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, resources: ResourceReader) -> Self {
        Self {
            registry,
            resources,
        }
    }

    /// Run the server over stdin/stdout until the input stream closes.
    /// Responses are newline-delimited JSON, flushed per message.
    pub async fn serve_stdio(self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut lines = stdin.lines();

        info!("{SERVER_NAME} ready, waiting for requests");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue; // notification
            };

            let serialized = serde_json::to_string(&response)?;
            stdout.write_all(serialized.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw request line. Returns `None` for notifications,
    /// which get no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        if line.len() > MAX_REQUEST_BYTES {
            warn!(size = line.len(), "request too large");
            return Some(JsonRpcResponse::failure(
                serde_json::Value::Null,
                JsonRpcError::invalid_request("request too large (max 1MiB)"),
            ));
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                return Some(JsonRpcResponse::failure(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        debug!(method = %request.method, "dispatching request");

        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        Some(match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => info!("client initialized"),
            other => debug!(method = %other, "ignoring notification"),
        }
    }

    async fn dispatch(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, JsonRpcError> {
        match method {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => Ok(serde_json::json!({ "tools": self.registry.list_schemas() })),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => Ok(serde_json::json!({ "resources": self.resources.list() })),
            "resources/read" => self.read_resource(params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize_result(&self) -> serde_json::Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            },
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false }
            }
        })
    }

    /// Tool dispatch is the single error-recovery boundary: every failure
    /// below it, from a missing argument to an upstream 5xx, becomes a
    /// textual `isError: true` result. Nothing is retried.
    async fn call_tool(
        &self,
        params: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| JsonRpcError::invalid_params(format!("invalid tools/call params: {e}")))?;

        // Absent `arguments` deserializes as null; tools expect an object.
        let arguments = if params.arguments.is_null() {
            serde_json::json!({})
        } else {
            params.arguments
        };

        let result = match self.registry.get(&params.name) {
            Some(tool) => match tool.execute(arguments).await {
                Ok(text) => CallToolResult::text(text),
                Err(e) => {
                    warn!(tool = %params.name, error = %e, "tool failed");
                    CallToolResult::error(e)
                }
            },
            None => CallToolResult::error(Error::UnknownTool(params.name.clone())),
        };

        serde_json::to_value(result)
            .map_err(|e| JsonRpcError::internal_error(format!("failed to encode result: {e}")))
    }

    /// Resource reads surface failures as structured JSON-RPC errors:
    /// unknown URIs as invalid params, upstream faults as internal errors.
    async fn read_resource(
        &self,
        params: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, JsonRpcError> {
        let params: ReadResourceParams = serde_json::from_value(params).map_err(|e| {
            JsonRpcError::invalid_params(format!("invalid resources/read params: {e}"))
        })?;

        match self.resources.read(&params.uri).await {
            Ok(contents) => Ok(serde_json::json!({ "contents": [contents] })),
            Err(e @ Error::UnknownResource(_)) => Err(JsonRpcError::invalid_params(e.to_string())),
            Err(e) => {
                warn!(uri = %params.uri, error = %e, "resource read failed");
                Err(JsonRpcError::internal_error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools;
    use std::sync::Arc;
    use voidly_core::{VoidlyClient, VoidlyConfig};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_for(upstream: &MockServer) -> McpServer {
        let config = VoidlyConfig::new(&upstream.uri(), &upstream.uri()).unwrap();
        let client = Arc::new(VoidlyClient::new(config).unwrap());
        McpServer::new(
            tools::default_registry(client.clone()),
            ResourceReader::new(client),
        )
    }

    fn request(id: u64, method: &str, params: serde_json::Value) -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        })
        .to_string()
    }

    fn result_of(response: JsonRpcResponse) -> serde_json::Value {
        assert!(response.error.is_none(), "unexpected error: {response:?}");
        response.result.unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(1, "initialize", serde_json::json!({})))
            .await
            .unwrap();
        let result = result_of(response);
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "voidly-mcp");
        assert!(result["capabilities"].get("resources").is_some());
    }

    #[tokio::test]
    async fn test_tools_list_has_five_tools() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(2, "tools/list", serde_json::json!({})))
            .await
            .unwrap();
        let tools = result_of(response)["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 5);
        let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert!(names.contains(&"get_censorship_index"));
        assert!(names.contains(&"get_country_status"));
        assert!(names.contains(&"check_domain_blocked"));
        assert!(names.contains(&"get_most_censored"));
        assert!(names.contains(&"get_active_incidents"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_envelope_not_rpc_error() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(
                3,
                "tools/call",
                serde_json::json!({"name": "launch_probe", "arguments": {}}),
            ))
            .await
            .unwrap();
        let result = result_of(response);
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: "));
        assert!(text.contains("launch_probe"));
    }

    #[tokio::test]
    async fn test_missing_argument_is_error_envelope() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(
                4,
                "tools/call",
                serde_json::json!({"name": "get_country_status", "arguments": {}}),
            ))
            .await
            .unwrap();
        let result = result_of(response);
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("country_code"));
        // No upstream request was made.
        assert_eq!(upstream.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_call_without_arguments_key_reports_missing_argument() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let line = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 12,
            "method": "tools/call",
            "params": {"name": "get_country_status"}
        })
        .to_string();
        let result = result_of(server.handle_line(&line).await.unwrap());
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("country_code"));
    }

    #[tokio::test]
    async fn test_successful_tool_call_has_no_error_flag() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/censorship-index"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "summary": {"normal": 2},
                "countries": []
            })))
            .mount(&upstream)
            .await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(
                5,
                "tools/call",
                serde_json::json!({"name": "get_censorship_index", "arguments": {}}),
            ))
            .await
            .unwrap();
        let result = result_of(response);
        assert!(result.get("isError").is_none());
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Normal: 2"));
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_error_envelope() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/censorship-index"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&upstream)
            .await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(
                6,
                "tools/call",
                serde_json::json!({"name": "get_censorship_index", "arguments": {}}),
            ))
            .await
            .unwrap();
        let result = result_of(response);
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("503"));
    }

    #[tokio::test]
    async fn test_resources_list() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(7, "resources/list", serde_json::json!({})))
            .await
            .unwrap();
        let resources = result_of(response)["resources"].as_array().unwrap().clone();
        assert_eq!(resources.len(), 2);
    }

    #[tokio::test]
    async fn test_resources_read_unknown_uri_is_invalid_params() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(
                8,
                "resources/read",
                serde_json::json!({"uri": "voidly://nope"}),
            ))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("voidly://nope"));
    }

    #[tokio::test]
    async fn test_resources_read_upstream_fault_is_internal_error() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/methodology"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&upstream)
            .await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(
                9,
                "resources/read",
                serde_json::json!({"uri": "voidly://methodology"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32603);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server.handle_line("this is not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_oversized_request_rejected() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let line = "x".repeat(2 * 1024 * 1024);
        let response = server.handle_line(&line).await.unwrap();
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(10, "prompts/list", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let line = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
            "params": {}
        })
        .to_string();
        assert!(server.handle_line(&line).await.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let upstream = MockServer::start().await;
        let server = server_for(&upstream).await;

        let response = server
            .handle_line(&request(11, "ping", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(result_of(response), serde_json::json!({}));
    }
}
