//! Main error type for the document-AI client.

use std::time::Duration;
use thiserror::Error;
use super::categories::*;
use super::mapper::map_http_status_with_body;
use crate::transport::TransportError;

/// Result type alias for document-AI operations.
pub type DocAiResult<T> = Result<T, DocAiError>;

/// Top-level error type for the document-AI integration.
#[derive(Error, Debug, Clone)]
pub enum DocAiError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Rejected credentials.
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Invalid request.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Rate limited by the API.
    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    /// Connection or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Server-side failure.
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// Unusable response body.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Response-format parse or validation failure.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Streaming failure.
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    /// Missing resource or local document.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

impl DocAiError {
    /// Returns true if this error is retryable.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DocAiError::RateLimit(_)
                | DocAiError::Network(_)
                | DocAiError::Stream(StreamError::Transport { .. })
                | DocAiError::Server(ServerError::ServiceUnavailable { .. })
        )
    }

    /// Returns the retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            DocAiError::RateLimit(e) => e.retry_after(),
            DocAiError::Server(ServerError::ServiceUnavailable { retry_after }) => *retry_after,
            _ => None,
        }
    }

    /// Shorthand for an invalid schema error.
    pub fn invalid_schema(stage: SchemaStage, message: impl Into<String>, offset: Option<usize>) -> Self {
        DocAiError::Schema(SchemaError::InvalidSchemaFormat {
            stage,
            message: message.into(),
            offset,
        })
    }

    /// Shorthand for a request validation error with field details.
    pub fn validation(message: impl Into<String>, details: Vec<ValidationDetail>) -> Self {
        DocAiError::Request(RequestError::ValidationError {
            message: message.into(),
            details,
        })
    }
}

impl From<reqwest::Error> for DocAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DocAiError::Network(NetworkError::Timeout)
        } else {
            DocAiError::Network(NetworkError::ConnectionFailed {
                message: err.to_string(),
            })
        }
    }
}

impl From<serde_json::Error> for DocAiError {
    fn from(err: serde_json::Error) -> Self {
        DocAiError::Response(ResponseError::DeserializationError {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for DocAiError {
    fn from(err: url::ParseError) -> Self {
        DocAiError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}

impl From<TransportError> for DocAiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => DocAiError::Network(NetworkError::Timeout),
            TransportError::Connection(message) | TransportError::Request(message) => {
                DocAiError::Network(NetworkError::ConnectionFailed { message })
            }
            TransportError::Status { status, body } => map_http_status_with_body(status, &body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        let rate_limit = DocAiError::RateLimit(RateLimitError::TooManyRequests {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert!(rate_limit.is_retryable());

        let auth_error = DocAiError::Authentication(AuthenticationError::InvalidApiKey);
        assert!(!auth_error.is_retryable());

        let schema_error = DocAiError::invalid_schema(SchemaStage::Fallback, "bad", None);
        assert!(!schema_error.is_retryable());

        let stream_error = DocAiError::Stream(StreamError::Transport {
            message: "reset".to_string(),
            status: None,
        });
        assert!(stream_error.is_retryable());
    }

    #[test]
    fn test_retry_after() {
        let unavailable = DocAiError::Server(ServerError::ServiceUnavailable {
            retry_after: Some(Duration::from_secs(60)),
        });
        assert_eq!(unavailable.retry_after(), Some(Duration::from_secs(60)));

        let config_error = DocAiError::Configuration(ConfigurationError::MissingApiKey);
        assert_eq!(config_error.retry_after(), None);
    }

    #[test]
    fn test_invalid_schema_display_names_stage() {
        let error = DocAiError::invalid_schema(SchemaStage::Validation, "missing field `type`", None);
        assert_eq!(
            error.to_string(),
            "Schema error: Invalid schema format at validation stage: missing field `type`"
        );
    }

    #[test]
    fn test_transport_status_maps_through_http_mapper() {
        let error: DocAiError = TransportError::Status {
            status: 401,
            body: bytes::Bytes::from_static(b"{}"),
        }
        .into();
        assert!(matches!(
            error,
            DocAiError::Authentication(AuthenticationError::InvalidApiKey)
        ));
    }
}
