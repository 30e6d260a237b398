//! Folds chat stream events into a complete message.

use futures::StreamExt;

use super::chat_stream::ChatStream;
use crate::error::DocAiResult;
use crate::types::{ChatMessage, ChatStreamEvent};

/// Concatenates deltas in arrival order.
#[derive(Debug, Default)]
pub struct ChatAccumulator {
    message: ChatMessage,
    finished: bool,
}

impl ChatAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one event.
    pub fn add(&mut self, event: &ChatStreamEvent) {
        match event {
            ChatStreamEvent::Delta(delta) => {
                self.message.text.push_str(&delta.text);
                if delta.usage.is_some() {
                    self.message.usage.clone_from(&delta.usage);
                }
                if delta.conversation_id.is_some() {
                    self.message.conversation_id.clone_from(&delta.conversation_id);
                }
            }
            ChatStreamEvent::Finished(metadata) => {
                if metadata.usage.is_some() {
                    self.message.usage.clone_from(&metadata.usage);
                }
                if metadata.conversation_id.is_some() {
                    self.message.conversation_id.clone_from(&metadata.conversation_id);
                }
                self.finished = true;
            }
        }
    }

    /// Text accumulated so far.
    pub fn text(&self) -> &str {
        &self.message.text
    }

    /// Whether `Finished` was seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the accumulated message.
    pub fn finalize(self) -> ChatMessage {
        self.message
    }

    /// Drains a stream into a message, stopping at the first error.
    pub async fn collect(mut stream: ChatStream) -> DocAiResult<ChatMessage> {
        let mut accumulator = Self::new();
        while let Some(event) = stream.next().await {
            accumulator.add(&event?);
        }
        Ok(accumulator.finalize())
    }
}
