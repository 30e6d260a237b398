//! Document chat service implementation.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::ChatService;
use crate::auth::AuthManager;
use crate::config::DocAiConfig;
use crate::error::{DocAiError, DocAiResult, ResponseError, StreamError};
use crate::observability::Logger;
use crate::services::validation::validate_chat_request;
use crate::streaming::{decode_chat_stream, ChatStream, StreamEvent};
use crate::transport::{
    endpoints, HttpRequest, HttpTransport, MultipartForm, RequestBuilder, ResponseParser,
    TransportError,
};
use crate::types::{ChatMessage, ChatRequest};

/// Implementation of [`ChatService`].
///
/// Streaming and non-streaming calls share one request builder; conversation
/// options and delta precedence come from the request.
pub struct ChatServiceImpl {
    config: Arc<DocAiConfig>,
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Box<dyn Logger>,
}

impl ChatServiceImpl {
    /// Create a new chat service.
    pub fn new(
        config: Arc<DocAiConfig>,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Box<dyn AuthManager>,
        logger: Box<dyn Logger>,
    ) -> Self {
        let request_builder =
            RequestBuilder::new(config.base_url.clone(), config.api_version.clone(), auth_manager);
        Self {
            config,
            transport,
            request_builder,
            logger,
        }
    }

    fn build_request(&self, request: ChatRequest, stream: bool) -> DocAiResult<HttpRequest> {
        validate_chat_request(&request)?;

        let model = request
            .model
            .unwrap_or_else(|| self.config.default_models.chat.clone());

        self.logger.debug(
            "Starting document chat",
            json!({
                "model": model,
                "documents": request.documents.len(),
                "stream": stream,
                "continuing": request.conversation.conversation_id.is_some(),
            }),
        );

        let mut form = MultipartForm::new();
        for document in &request.documents {
            form = form.file(
                "documents",
                &document.file_name,
                &document.mime_type,
                document.data.clone(),
            );
        }
        let form = form
            .text("prompt", request.prompt)
            .text("model", model)
            .optional_text("conversation_id", request.conversation.conversation_id)
            .optional_text("instructions", request.conversation.instructions)
            .text("stream", stream.to_string());

        self.request_builder
            .build_multipart_request(endpoints::DOCUMENT_CHAT, form, stream)
    }

    fn network_error(&self, e: TransportError, stream: bool) -> DocAiError {
        self.logger.error(
            "Network error during document chat",
            json!({ "error": e.to_string(), "stream": stream }),
        );
        DocAiError::from(e)
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn chat(&self, request: ChatRequest) -> DocAiResult<ChatMessage> {
        let http_request = self.build_request(request, false)?;

        let response = self
            .transport
            .send(http_request)
            .await
            .map_err(|e| self.network_error(e, false))?;

        let body: Value = ResponseParser::parse_response(response)?;
        let event = StreamEvent::from_value(&body);
        let Some((_, text)) = event.text else {
            return Err(DocAiError::Response(ResponseError::UnexpectedFormat {
                message: "chat response has no message output".to_string(),
            }));
        };

        self.logger.info(
            "Document chat completed",
            json!({
                "conversation_id": event.conversation_id,
                "total_tokens": event.usage.as_ref().and_then(|u| u.total_tokens),
            }),
        );

        Ok(ChatMessage {
            text,
            usage: event.usage,
            conversation_id: event.conversation_id,
        })
    }

    async fn chat_stream(&self, request: ChatRequest, cancel: CancellationToken) -> DocAiResult<ChatStream> {
        let precedence = request.precedence;
        let http_request = self.build_request(request, true)?;

        let response = match self.transport.send_streaming(http_request).await {
            Ok(response) => response,
            Err(TransportError::Status { status, body }) => {
                let mapped = ResponseParser::map_error(status, &Default::default(), &body);
                self.logger.warn(
                    "Document chat stream rejected",
                    json!({ "status": status, "error": mapped.to_string() }),
                );
                return Err(DocAiError::Stream(StreamError::Transport {
                    message: mapped.to_string(),
                    status: Some(status),
                }));
            }
            Err(e) => return Err(self.network_error(e, true)),
        };

        let Some(body) = response.body else {
            self.logger.error(
                "Document chat stream has no body",
                json!({ "status": response.status }),
            );
            return Err(DocAiError::Stream(StreamError::MissingStreamBody));
        };

        self.logger.info("Document chat stream started", json!({ "status": response.status }));
        Ok(decode_chat_stream(body, cancel, precedence))
    }
}
