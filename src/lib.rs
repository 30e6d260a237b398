//! # Document AI API Client
//!
//! Async Rust client for a document-AI REST API: document parsing (OCR and
//! layout), schema-driven information extraction, schema generation, and
//! conversational document chat with Server-Sent-Events streaming.
//!
//! ## Features
//!
//! - Lenient `response_format` parsing that repairs common malformations
//!   (unbalanced braces, stray whitespace, zero-width characters)
//! - Incremental SSE decoding that survives split UTF-8 sequences and
//!   malformed frames, with cooperative cancellation
//! - Hand-built multipart uploads over a pluggable HTTP transport
//! - Secure credential handling with `SecretString`
//! - Structured, leveled logging through an injectable `Logger`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_docai::{create_client, DocAiClient, DocAiConfig};
//! use integrations_docai::types::{ExtractionRequest, FileUpload};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DocAiConfig::builder()
//!         .api_key(SecretString::new("your-api-key".into()))
//!         .build()?;
//!     let client = create_client(config)?;
//!
//!     let document = FileUpload::from_path("invoice.pdf").await?;
//!     let schema = r#"{"type":"json_schema","json_schema":{"name":"invoice",
//!         "schema":{"type":"object","properties":{"total":{"type":"number"}}}}"#;
//!     let extracted = client
//!         .extraction()
//!         .extract(ExtractionRequest::from_raw_schema(document, schema))
//!         .await?;
//!     println!("{}", extracted.data);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - client trait, implementation and builder
//! - `config` - configuration and builder
//! - `auth` - bearer authentication
//! - `transport` - HTTP transport, multipart forms, request/response handling
//! - `error` - error taxonomy and HTTP status mapping
//! - `types` - request and response types
//! - `repair` - response-format repair parser
//! - `streaming` - SSE chat stream decoding
//! - `services` - parse, extraction, schema generation and chat services
//! - `observability` - structured logging

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod repair;
pub mod services;
pub mod streaming;
pub mod transport;
pub mod types;

// Development/testing modules - always available for integration tests
pub mod fixtures;
pub mod mocks;

pub use auth::{AuthManager, BearerAuthManager};
pub use client::{create_client, create_client_from_env, DocAiClient, DocAiClientBuilder, DocAiClientImpl};
pub use config::{
    DefaultModels, DocAiConfig, DocAiConfigBuilder, LogLevel, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use error::{
    AuthenticationError, ConfigurationError, DocAiError, DocAiResult, NetworkError,
    RateLimitError, RequestError, ResourceError, ResponseError, SchemaError, SchemaStage,
    ServerError, StreamError, ValidationDetail,
};
pub use repair::{parse_response_format, parse_with_closers, repair_response_format, RepairOutcome};
pub use services::{ChatService, DocumentParseService, ExtractionService, SchemaGenerationService};
pub use streaming::{decode_chat_stream, ChatAccumulator, ChatStream};
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
pub use types::{
    ChatDelta, ChatMessage, ChatRequest, ChatStreamEvent, DeltaKind, DeltaPrecedence,
    DocumentParseRequest, DocumentParseResponse, ExtractionRequest, ExtractionResponse,
    FileUpload, ResponseFormat, SchemaGenerationRequest, SchemaGenerationResponse,
    StreamMetadata, Usage,
};
