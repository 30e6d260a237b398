//! Transport layer error types.

use bytes::Bytes;

/// Transport error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection could not be established or was reset.
    #[error("Connection error: {0}")]
    Connection(String),
    /// The request timed out.
    #[error("Timeout")]
    Timeout,
    /// The request could not be built or sent.
    #[error("Request error: {0}")]
    Request(String),
    /// Non-success status with the buffered error body. Returned by streaming sends.
    #[error("HTTP error {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error body.
        body: Bytes,
    },
}
