//! Chat-completions shaped wire types shared by extraction and schema generation.

use serde::{Deserialize, Serialize};

use super::common::{FileUpload, Usage};
use super::response_format::ResponseFormat;

/// Request body.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model name.
    pub model: String,
    /// Messages; a single user message with the documents.
    pub messages: Vec<CompletionMessage>,
    /// Schema the answer must follow. Omitted for schema generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// A message in the request.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionMessage {
    /// Message role.
    pub role: String,
    /// Content parts.
    pub content: Vec<ContentPart>,
}

impl CompletionMessage {
    /// User message carrying documents as inline `data:` URLs.
    pub fn user_documents<'a>(documents: impl IntoIterator<Item = &'a FileUpload>) -> Self {
        Self {
            role: "user".to_string(),
            content: documents
                .into_iter()
                .map(|d| ContentPart::ImageUrl {
                    image_url: ImageUrl { url: d.to_data_url() },
                })
                .collect(),
        }
    }
}

/// Message content part.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// A document as an inline image URL.
    ImageUrl {
        /// The image reference.
        image_url: ImageUrl,
    },
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
}

/// Inline image reference.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// A `data:` URL.
    pub url: String,
}

/// Response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompletionResponse {
    /// Response id.
    pub id: Option<String>,
    /// Model that answered.
    pub model: Option<String>,
    /// Answer choices.
    pub choices: Vec<CompletionChoice>,
    /// Token usage.
    pub usage: Option<Usage>,
}

/// One answer choice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompletionChoice {
    /// The answer message.
    pub message: CompletionChoiceMessage,
    /// Why generation stopped.
    pub finish_reason: Option<String>,
}

/// Message inside a choice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompletionChoiceMessage {
    /// Message role.
    pub role: Option<String>,
    /// JSON text produced by the model.
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}
