//! Information extraction service.

mod service;

use async_trait::async_trait;

use crate::error::DocAiResult;
use crate::types::{ExtractionRequest, ExtractionResponse};

pub use service::ExtractionServiceImpl;

/// Service for schema-driven extraction.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Extract fields described by the request's response format.
    async fn extract(&self, request: ExtractionRequest) -> DocAiResult<ExtractionResponse>;
}
