//! Request and response types for the document-AI API.

mod common;
mod response_format;
mod document_parse;
mod completion;
mod extraction;
mod schema;
mod chat;

pub use common::*;
pub use response_format::*;
pub use document_parse::*;
pub use completion::*;
pub use extraction::*;
pub use schema::*;
pub use chat::*;
