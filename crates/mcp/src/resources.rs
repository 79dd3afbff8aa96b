// Fixed MCP resources: raw JSON passthrough from the upstream API

use crate::protocol::{ResourceContents, ResourceSchema};
use std::sync::Arc;
use voidly_core::{Error, Result, VoidlyClient};

pub const INDEX_URI: &str = "voidly://censorship-index";
pub const METHODOLOGY_URI: &str = "voidly://methodology";

const JSON_MIME: &str = "application/json";

/// Maps the two fixed resource URIs onto upstream endpoints. No
/// transformation beyond pretty-printing the parsed JSON.
pub struct ResourceReader {
    client: Arc<VoidlyClient>,
}

impl ResourceReader {
    pub fn new(client: Arc<VoidlyClient>) -> Self {
        Self { client }
    }

    /// Descriptors for `resources/list`.
    pub fn list(&self) -> Vec<ResourceSchema> {
        vec![
            ResourceSchema {
                uri: INDEX_URI.to_string(),
                name: "Global Censorship Index".to_string(),
                description: "Raw global censorship index snapshot from the Voidly API"
                    .to_string(),
                mime_type: JSON_MIME.to_string(),
            },
            ResourceSchema {
                uri: METHODOLOGY_URI.to_string(),
                name: "Measurement Methodology".to_string(),
                description: "How censorship measurements are collected and aggregated"
                    .to_string(),
                mime_type: JSON_MIME.to_string(),
            },
        ]
    }

    /// Read one resource by URI.
    pub async fn read(&self, uri: &str) -> Result<ResourceContents> {
        let text = match uri {
            INDEX_URI => self.client.censorship_index_raw().await?,
            METHODOLOGY_URI => self.client.methodology_raw().await?,
            other => return Err(Error::UnknownResource(other.to_string())),
        };
        Ok(ResourceContents {
            uri: uri.to_string(),
            mime_type: JSON_MIME.to_string(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidly_core::VoidlyConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn reader_for(server: &MockServer) -> ResourceReader {
        let config = VoidlyConfig::new(&server.uri(), &server.uri()).unwrap();
        ResourceReader::new(Arc::new(VoidlyClient::new(config).unwrap()))
    }

    #[tokio::test]
    async fn test_list_has_both_fixed_resources() {
        let server = MockServer::start().await;
        let reader = reader_for(&server).await;
        let resources = reader.list();
        assert_eq!(resources.len(), 2);
        assert!(resources.iter().any(|r| r.uri == INDEX_URI));
        assert!(resources.iter().any(|r| r.uri == METHODOLOGY_URI));
        assert!(resources.iter().all(|r| r.mime_type == "application/json"));
    }

    #[tokio::test]
    async fn test_read_methodology_passthrough() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/methodology"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"source": "ooni", "window_days": 30})),
            )
            .mount(&server)
            .await;

        let reader = reader_for(&server).await;
        let contents = reader.read(METHODOLOGY_URI).await.unwrap();
        assert_eq!(contents.uri, METHODOLOGY_URI);
        assert!(contents.text.contains("\"source\": \"ooni\""));
    }

    #[tokio::test]
    async fn test_read_unknown_uri() {
        let server = MockServer::start().await;
        let reader = reader_for(&server).await;
        let err = reader.read("voidly://nope").await.unwrap_err();
        assert!(matches!(err, Error::UnknownResource(_)));
        assert!(err.to_string().contains("voidly://nope"));
    }
}
