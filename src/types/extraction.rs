//! Information extraction types.

use serde_json::Value;

use super::common::{FileUpload, Usage};
use super::response_format::ResponseFormat;

/// How the caller supplied the response format.
#[derive(Debug, Clone)]
pub enum ResponseFormatInput {
    /// Already-typed format.
    Typed(ResponseFormat),
    /// Raw, possibly malformed JSON string. Repaired before sending.
    Raw(String),
}

/// Request to extract structured data from a document.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Document to extract from.
    pub document: FileUpload,
    /// Model override.
    pub model: Option<String>,
    /// Shape of the extracted data.
    pub response_format: ResponseFormatInput,
}

impl ExtractionRequest {
    /// Creates a request with a typed response format.
    pub fn new(document: FileUpload, response_format: ResponseFormat) -> Self {
        Self {
            document,
            model: None,
            response_format: ResponseFormatInput::Typed(response_format),
        }
    }

    /// Creates a request from a raw schema string.
    pub fn from_raw_schema(document: FileUpload, schema: impl Into<String>) -> Self {
        Self {
            document,
            model: None,
            response_format: ResponseFormatInput::Raw(schema.into()),
        }
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Extracted data.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResponse {
    /// Extracted fields, shaped by the response format.
    pub data: Value,
    /// Model that answered.
    pub model: Option<String>,
    /// Token usage.
    pub usage: Option<Usage>,
}
