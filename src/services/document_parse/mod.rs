//! Document parsing service.

mod service;

use async_trait::async_trait;

use crate::error::DocAiResult;
use crate::types::{DocumentParseRequest, DocumentParseResponse};

pub use service::DocumentParseServiceImpl;

/// Service for OCR and layout analysis.
#[async_trait]
pub trait DocumentParseService: Send + Sync {
    /// Parse a document into rendered content and layout elements.
    async fn parse(&self, request: DocumentParseRequest) -> DocAiResult<DocumentParseResponse>;
}
