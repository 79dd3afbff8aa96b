//! Error types shared by the client, tools, and resource reader.

/// Result type for Voidly operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Upstream API returned a non-success status or an undecodable body.
    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level HTTP failure (connect, TLS, read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encode/decode failure outside the fetch path.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required tool argument was absent or empty.
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    /// Tool name not in the registered set.
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    /// Resource URI not in the fixed set.
    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    /// Invalid configuration at startup.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an upstream error from a status code and response body.
    ///
    /// Bodies shaped like `{"error": "..."}` contribute their message;
    /// anything else falls back to the canonical reason phrase.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
        Self::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_with_error_body() {
        let err = Error::from_response(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error": "maintenance window"}"#,
        );
        match err {
            Error::Upstream { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance window");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_response_plain_body_uses_reason() {
        let err = Error::from_response(reqwest::StatusCode::NOT_FOUND, "gone");
        assert_eq!(
            err.to_string(),
            "upstream error (status 404): Not Found"
        );
    }

    #[test]
    fn test_missing_argument_message_names_the_key() {
        let err = Error::MissingArgument("country_code");
        assert!(err.to_string().contains("country_code"));
    }

    #[test]
    fn test_unknown_tool_message_contains_name() {
        let err = Error::UnknownTool("nope".to_string());
        assert!(err.to_string().contains("nope"));
    }
}
