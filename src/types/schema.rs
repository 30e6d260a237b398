//! Schema generation types.

use super::common::{FileUpload, Usage};
use super::response_format::ResponseFormat;

/// Request to generate an extraction schema from sample documents.
#[derive(Debug, Clone)]
pub struct SchemaGenerationRequest {
    /// Sample documents.
    pub documents: Vec<FileUpload>,
    /// Model override.
    pub model: Option<String>,
}

impl SchemaGenerationRequest {
    /// Creates a request over the given documents.
    pub fn new(documents: impl IntoIterator<Item = FileUpload>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
            model: None,
        }
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Generated schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaGenerationResponse {
    /// Validated response format, ready for extraction.
    pub response_format: ResponseFormat,
    /// Model that answered.
    pub model: Option<String>,
    /// Token usage.
    pub usage: Option<Usage>,
}
