//! Document chat types.

use super::common::{FileUpload, Usage};

/// Which delta kinds become user-visible text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeltaPrecedence {
    /// Output-text deltas; reasoning-summary deltas only if the whole stream
    /// carried no output text.
    #[default]
    OutputTextWithReasoningFallback,
    /// Output-text deltas only. Reasoning summaries are discarded.
    OutputTextOnly,
}

/// Conversation options carried with a chat request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationOptions {
    /// Continue an existing conversation.
    pub conversation_id: Option<String>,
    /// System-style instructions.
    pub instructions: Option<String>,
}

/// A question about one or more documents.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Documents the question is about.
    pub documents: Vec<FileUpload>,
    /// The question.
    pub prompt: String,
    /// Model override; the configured default is used otherwise.
    pub model: Option<String>,
    /// Conversation continuation and instructions.
    pub conversation: ConversationOptions,
    /// Which deltas a stream surfaces.
    pub precedence: DeltaPrecedence,
}

impl ChatRequest {
    /// Creates a request.
    pub fn new(documents: impl IntoIterator<Item = FileUpload>, prompt: impl Into<String>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
            prompt: prompt.into(),
            model: None,
            conversation: ConversationOptions::default(),
            precedence: DeltaPrecedence::default(),
        }
    }

    /// Overrides the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Continues an earlier conversation.
    #[must_use]
    pub fn with_conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation.conversation_id = Some(id.into());
        self
    }

    /// Sets instructions.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.conversation.instructions = Some(instructions.into());
        self
    }

    /// Sets delta precedence for streaming.
    #[must_use]
    pub fn with_precedence(mut self, precedence: DeltaPrecedence) -> Self {
        self.precedence = precedence;
        self
    }
}

/// Where a delta's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    /// `response.output_text.delta`.
    OutputText,
    /// `response.reasoning_summary_text.delta`, surfaced as fallback.
    ReasoningSummary,
    /// A single consolidated `output` message.
    Consolidated,
}

/// An incremental text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDelta {
    /// Text fragment, never empty.
    pub text: String,
    /// Source of the fragment.
    pub kind: DeltaKind,
    /// Usage carried on the same frame.
    pub usage: Option<Usage>,
    /// Conversation id carried on the same frame.
    pub conversation_id: Option<String>,
}

/// Summary emitted once the byte stream ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamMetadata {
    /// Last usage seen on any frame.
    pub usage: Option<Usage>,
    /// Last conversation id seen on any frame.
    pub conversation_id: Option<String>,
    /// Deltas emitted.
    pub deltas_emitted: usize,
    /// `data:` lines that failed to parse as JSON.
    pub frames_skipped: usize,
}

/// Item produced by a chat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStreamEvent {
    /// A text fragment.
    Delta(ChatDelta),
    /// End of stream. Not emitted on cancellation or read errors.
    Finished(StreamMetadata),
}

/// Complete answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatMessage {
    /// Answer text.
    pub text: String,
    /// Token usage.
    pub usage: Option<Usage>,
    /// Id for continuing the conversation.
    pub conversation_id: Option<String>,
}
