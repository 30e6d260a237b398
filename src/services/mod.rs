//! Service implementations for the document-AI API.

pub mod chat;
pub mod document_parse;
pub mod extraction;
pub mod schema_generation;
pub mod validation;

pub use chat::*;
pub use document_parse::*;
pub use extraction::*;
pub use schema_generation::*;
