//! API endpoint paths, relative to the versioned base URL.

/// Document parsing (OCR and layout).
pub const DOCUMENT_PARSE: &str = "/document-digitization";

/// Schema-driven information extraction.
pub const EXTRACTION: &str = "/information-extraction";

/// Schema generation from sample documents.
pub const SCHEMA_GENERATION: &str = "/information-extraction/schema-generation";

/// Conversational question answering over documents.
pub const DOCUMENT_CHAT: &str = "/document-chat";
