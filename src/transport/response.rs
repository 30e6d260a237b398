//! HTTP response parsing and error mapping.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use super::http::HttpResponse;
use crate::error::{map_http_status_with_body, DocAiError, RateLimitError, ServerError};

/// Parser for buffered API responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Deserializes a success response or maps the error status.
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, DocAiError> {
        if (200..300).contains(&response.status) {
            Ok(serde_json::from_slice(&response.body)?)
        } else {
            Err(Self::parse_error_response(response))
        }
    }

    /// Maps an error response to a `DocAiError`, filling `retry_after` from headers.
    pub fn parse_error_response(response: HttpResponse) -> DocAiError {
        Self::map_error(response.status, &response.headers, &response.body)
    }

    /// Maps a status, header set and body to a `DocAiError`.
    pub fn map_error(status: u16, headers: &HashMap<String, String>, body: &[u8]) -> DocAiError {
        let retry_after = Self::parse_retry_after(headers);
        let mut error = map_http_status_with_body(status, body);

        match &mut error {
            DocAiError::RateLimit(
                RateLimitError::TooManyRequests { retry_after: ra }
                | RateLimitError::QuotaExceeded { retry_after: ra },
            )
            | DocAiError::Server(ServerError::ServiceUnavailable { retry_after: ra }) => {
                *ra = retry_after;
            }
            _ => {}
        }

        if let Some(id) = Self::extract_request_id(headers) {
            tracing::debug!(request_id = %id, status, error = ?error, "API error occurred");
        }

        error
    }

    /// Parses a `Retry-After` header given in seconds.
    pub fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        find_header(headers, "retry-after")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Extracts the request id header, if any.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        find_header(headers, "x-request-id").map(str::to_string)
    }
}

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
