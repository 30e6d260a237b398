//! Error category types for granular error handling.

use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    /// No API key was configured.
    #[error("Missing API key")]
    MissingApiKey,

    /// The base URL could not be parsed.
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
    },

    /// Any other invalid setting.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// What was wrong.
        message: String,
    },
}

/// Authentication-related errors.
#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    /// HTTP 401.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// HTTP 403.
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Message returned by the API.
        message: String,
    },
}

/// Request validation errors.
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    /// Local pre-flight validation or an HTTP 400/422 from the API.
    #[error("Validation error: {message}")]
    ValidationError {
        /// Summary message.
        message: String,
        /// One entry per offending field.
        details: Vec<ValidationDetail>,
    },

    /// A single parameter was rejected.
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter {
        /// Parameter name.
        parameter: String,
        /// Why it was rejected.
        message: String,
    },

    /// HTTP 413.
    #[error("Payload too large: {size} bytes (max: {max_size})")]
    PayloadTooLarge {
        /// Size that was sent, when known.
        size: usize,
        /// Accepted maximum, when known.
        max_size: usize,
    },

    /// HTTP 415.
    #[error("Unsupported media type: {mime_type}")]
    UnsupportedMediaType {
        /// The rejected MIME type.
        mime_type: String,
    },
}

/// Validation detail for field-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// Field or parameter name.
    pub field: String,
    /// Human-readable problem description.
    pub description: String,
}

impl ValidationDetail {
    /// Creates a validation detail for a field.
    pub fn new(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
        }
    }
}

/// Rate limiting errors.
#[derive(Error, Debug, Clone)]
pub enum RateLimitError {
    /// HTTP 429.
    #[error("Too many requests")]
    TooManyRequests {
        /// Parsed `Retry-After` header.
        retry_after: Option<Duration>,
    },

    /// HTTP 429 with an `insufficient_quota` error type.
    #[error("Quota exceeded")]
    QuotaExceeded {
        /// Parsed `Retry-After` header.
        retry_after: Option<Duration>,
    },
}

impl RateLimitError {
    /// Returns the retry-after duration, if the server sent one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RateLimitError::TooManyRequests { retry_after }
            | RateLimitError::QuotaExceeded { retry_after } => *retry_after,
        }
    }
}

/// Network-related errors.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    /// The connection could not be made or was dropped.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Underlying transport message.
        message: String,
    },

    /// The request exceeded its timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Server-side errors.
#[derive(Error, Debug, Clone)]
pub enum ServerError {
    /// HTTP 500 and other unmapped 5xx statuses.
    #[error("Internal server error: {message}")]
    InternalError {
        /// Message or body returned by the server.
        message: String,
    },

    /// HTTP 503.
    #[error("Service unavailable")]
    ServiceUnavailable {
        /// Parsed `Retry-After` header.
        retry_after: Option<Duration>,
    },
}

/// Response parsing errors.
#[derive(Error, Debug, Clone)]
pub enum ResponseError {
    /// The body was not the expected JSON.
    #[error("Failed to deserialize response: {message}")]
    DeserializationError {
        /// Parser message.
        message: String,
    },

    /// The body parsed but lacked required content.
    #[error("Unexpected response format: {message}")]
    UnexpectedFormat {
        /// What was missing.
        message: String,
    },
}

/// Repair stage reported by schema errors.
///
/// Mirrors the order in which the repair parser escalates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStage {
    /// Parse of the cleansed input.
    Direct,
    /// Whitespace compression.
    Compressed,
    /// Brace/bracket balancing.
    Balanced,
    /// Targeted pattern fixes.
    PatternFixed,
    /// Caller-side parse of the unmodified fallback string.
    Fallback,
    /// Required-field validation after a successful parse.
    Validation,
}

impl std::fmt::Display for SchemaStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaStage::Direct => "direct",
            SchemaStage::Compressed => "compressed",
            SchemaStage::Balanced => "balanced",
            SchemaStage::PatternFixed => "pattern_fixed",
            SchemaStage::Fallback => "fallback",
            SchemaStage::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// Response-format schema errors.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// A response format could not be parsed or failed validation.
    #[error("Invalid schema format at {stage} stage: {message}")]
    InvalidSchemaFormat {
        /// Stage at which parsing gave up.
        stage: SchemaStage,
        /// Parser or validation message.
        message: String,
        /// Byte offset of the parse failure in the input, when known.
        offset: Option<usize>,
    },
}

/// Streaming errors.
#[derive(Error, Debug, Clone)]
pub enum StreamError {
    /// The stream could not be opened or a read failed.
    #[error("Stream transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// HTTP status when the failure came from the response status line.
        status: Option<u16>,
    },

    /// A 2xx streaming response arrived without a body.
    #[error("Streaming response has no body")]
    MissingStreamBody,
}

/// Resource-related errors.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    /// HTTP 404.
    #[error("Resource not found: {message}")]
    NotFound {
        /// Message returned by the API.
        message: String,
    },

    /// A local document path does not exist.
    #[error("Document not found: {path}")]
    DocumentNotFound {
        /// The missing path.
        path: String,
    },
}
