//! Client trait.

use crate::config::DocAiConfig;
use crate::services::{ChatService, DocumentParseService, ExtractionService, SchemaGenerationService};

/// Entry point to the document-AI services.
pub trait DocAiClient: Send + Sync {
    /// Document parsing.
    fn document_parse(&self) -> &dyn DocumentParseService;

    /// Information extraction.
    fn extraction(&self) -> &dyn ExtractionService;

    /// Schema generation.
    fn schema_generation(&self) -> &dyn SchemaGenerationService;

    /// Document chat.
    fn chat(&self) -> &dyn ChatService;

    /// Active configuration.
    fn config(&self) -> &DocAiConfig;
}
