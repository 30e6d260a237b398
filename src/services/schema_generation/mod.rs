//! Schema generation service.

mod service;

use async_trait::async_trait;

use crate::error::DocAiResult;
use crate::types::{SchemaGenerationRequest, SchemaGenerationResponse};

pub use service::SchemaGenerationServiceImpl;

/// Service that proposes an extraction schema for sample documents.
#[async_trait]
pub trait SchemaGenerationService: Send + Sync {
    /// Generate a response format from the request's documents.
    async fn generate(&self, request: SchemaGenerationRequest) -> DocAiResult<SchemaGenerationResponse>;
}
