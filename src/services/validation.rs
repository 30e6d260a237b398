//! Request validation shared by the services. Runs before any network call.

use crate::error::{DocAiError, DocAiResult, ValidationDetail};
use crate::types::{ChatRequest, DocumentParseRequest, FileUpload, SchemaGenerationRequest};

/// Maximum size of a single uploaded document.
pub const MAX_DOCUMENT_SIZE: usize = 50 * 1024 * 1024;

/// MIME types accepted by the API.
pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/bmp",
    "image/tiff",
    "image/heic",
    "image/webp",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/x-hwp",
];

/// Checks a single document, appending any problems to `details`.
pub fn check_document(field: &str, document: &FileUpload, details: &mut Vec<ValidationDetail>) {
    if document.data.is_empty() {
        details.push(ValidationDetail::new(field, "Document is empty"));
    }
    if document.size() > MAX_DOCUMENT_SIZE {
        details.push(ValidationDetail::new(
            field,
            format!(
                "Document is {} bytes, exceeding the {} byte limit",
                document.size(),
                MAX_DOCUMENT_SIZE
            ),
        ));
    }
    if !SUPPORTED_MIME_TYPES.contains(&document.mime_type.as_str()) {
        details.push(ValidationDetail::new(
            field,
            format!("Unsupported document type {}", document.mime_type),
        ));
    }
}

fn finish(details: Vec<ValidationDetail>) -> DocAiResult<()> {
    if details.is_empty() {
        Ok(())
    } else {
        Err(DocAiError::validation("Request validation failed", details))
    }
}

/// Validates a single-document request.
pub fn validate_document(document: &FileUpload) -> DocAiResult<()> {
    let mut details = Vec::new();
    check_document("document", document, &mut details);
    finish(details)
}

/// Validates a document parse request.
pub fn validate_parse_request(request: &DocumentParseRequest) -> DocAiResult<()> {
    let mut details = Vec::new();
    check_document("document", &request.document, &mut details);
    if request.base64_encoding.iter().any(|c| c.trim().is_empty()) {
        details.push(ValidationDetail::new(
            "base64_encoding",
            "Categories cannot be empty",
        ));
    }
    finish(details)
}

/// Validates a schema generation request.
pub fn validate_schema_request(request: &SchemaGenerationRequest) -> DocAiResult<()> {
    let mut details = Vec::new();
    if request.documents.is_empty() {
        details.push(ValidationDetail::new("documents", "At least one document is required"));
    }
    for (idx, document) in request.documents.iter().enumerate() {
        check_document(&format!("documents[{}]", idx), document, &mut details);
    }
    finish(details)
}

/// Validates a chat request.
pub fn validate_chat_request(request: &ChatRequest) -> DocAiResult<()> {
    let mut details = Vec::new();
    if request.documents.is_empty() {
        details.push(ValidationDetail::new("documents", "At least one document is required"));
    }
    for (idx, document) in request.documents.iter().enumerate() {
        check_document(&format!("documents[{}]", idx), document, &mut details);
    }
    if request.prompt.trim().is_empty() {
        details.push(ValidationDetail::new("prompt", "Prompt cannot be empty"));
    }
    if request
        .conversation
        .conversation_id
        .as_deref()
        .is_some_and(|id| id.trim().is_empty())
    {
        details.push(ValidationDetail::new(
            "conversation_id",
            "Conversation id cannot be blank",
        ));
    }
    finish(details)
}
