//! Error mapping utilities for HTTP status codes and API responses.

use serde::Deserialize;
use super::categories::*;
use super::types::DocAiError;

/// Structured API error response.
///
/// The API reports failures as `{"error": {"message", "type", "code"}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// The error object.
    pub error: ApiErrorDetail,
}

/// Detailed error information from the API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error type, such as `insufficient_quota`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Error code; the API sends either a string or a number.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Offending parameter, if any.
    #[serde(default)]
    pub param: Option<String>,
}

/// Maps HTTP status codes and response body to `DocAiError` variants.
///
/// The body is parsed as a structured error when possible; otherwise the raw
/// text becomes the message.
pub fn map_http_status_with_body(status: u16, body: &[u8]) -> DocAiError {
    let (message, detail) = match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(parsed) => (parsed.error.message.clone(), Some(parsed.error)),
        Err(_) => {
            let text = String::from_utf8_lossy(body).to_string();
            let message = serde_json::from_slice::<serde_json::Value>(body)
                .ok()
                .and_then(|json| {
                    json.get("message")
                        .or_else(|| json.get("detail"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or(text);
            (message, None)
        }
    };

    match status {
        400 | 422 => {
            let details = detail
                .as_ref()
                .and_then(|d| d.param.as_ref())
                .map(|param| vec![ValidationDetail::new(param.clone(), message.clone())])
                .unwrap_or_default();

            DocAiError::Request(RequestError::ValidationError { message, details })
        }

        401 => DocAiError::Authentication(AuthenticationError::InvalidApiKey),

        403 => DocAiError::Authentication(AuthenticationError::PermissionDenied { message }),

        404 => DocAiError::Resource(ResourceError::NotFound { message }),

        413 => {
            let (size, max_size) = extract_size_info(&message);
            DocAiError::Request(RequestError::PayloadTooLarge { size, max_size })
        }

        415 => DocAiError::Request(RequestError::UnsupportedMediaType {
            mime_type: extract_mime_type(&message),
        }),

        // Retry-After is filled in from headers by the response parser.
        429 => {
            let quota = detail
                .as_ref()
                .and_then(|d| d.error_type.as_deref())
                .is_some_and(|t| t.contains("quota"));
            if quota {
                DocAiError::RateLimit(RateLimitError::QuotaExceeded { retry_after: None })
            } else {
                DocAiError::RateLimit(RateLimitError::TooManyRequests { retry_after: None })
            }
        }

        503 => DocAiError::Server(ServerError::ServiceUnavailable { retry_after: None }),

        500..=599 => DocAiError::Server(ServerError::InternalError { message }),

        _ => DocAiError::Server(ServerError::InternalError {
            message: format!("HTTP {}: {}", status, message),
        }),
    }
}

/// Maps a status code with a plain message.
pub fn map_http_status(status: u16, message: String) -> DocAiError {
    map_http_status_with_body(status, message.as_bytes())
}

/// Extracts size information from messages like "size 1000 exceeds max 500".
fn extract_size_info(message: &str) -> (usize, usize) {
    let numbers: Vec<usize> = message
        .split_whitespace()
        .filter_map(|s| s.trim_matches(|c: char| !c.is_numeric()).parse().ok())
        .collect();

    match numbers.as_slice() {
        [] => (0, 0),
        [size] => (*size, 0),
        [size, max, ..] => (*size, *max),
    }
}

/// Extracts a MIME type such as `image/png` from an error message.
fn extract_mime_type(message: &str) -> String {
    message
        .split_whitespace()
        .find(|word| {
            ["image/", "application/", "text/"]
                .iter()
                .any(|prefix| word.starts_with(prefix))
        })
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '/')
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}
