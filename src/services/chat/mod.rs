//! Document chat service.

mod service;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::DocAiResult;
use crate::streaming::ChatStream;
use crate::types::{ChatMessage, ChatRequest};

pub use service::ChatServiceImpl;

/// Service for conversational questions over documents.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Ask a question and wait for the full answer.
    async fn chat(&self, request: ChatRequest) -> DocAiResult<ChatMessage>;

    /// Ask a question and stream the answer.
    ///
    /// Cancelling `cancel` stops the stream and releases the connection.
    async fn chat_stream(&self, request: ChatRequest, cancel: CancellationToken) -> DocAiResult<ChatStream>;
}
