//! Information extraction service implementation.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::ExtractionService;
use crate::auth::AuthManager;
use crate::config::DocAiConfig;
use crate::error::{DocAiError, DocAiResult, ResponseError};
use crate::observability::Logger;
use crate::repair::{parse_response_format, parse_with_closers, validate};
use crate::services::validation::validate_document;
use crate::transport::{endpoints, HttpMethod, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{
    CompletionMessage, CompletionRequest, CompletionResponse, ExtractionRequest,
    ExtractionResponse, ResponseFormat, ResponseFormatInput,
};

/// Implementation of [`ExtractionService`].
pub struct ExtractionServiceImpl {
    config: Arc<DocAiConfig>,
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Box<dyn Logger>,
}

impl ExtractionServiceImpl {
    /// Create a new extraction service.
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

    fn resolve_format(&self, input: ResponseFormatInput) -> DocAiResult<ResponseFormat> {
        match input {
            ResponseFormatInput::Typed(format) => validate(serde_json::to_value(format)?),
            ResponseFormatInput::Raw(raw) => parse_response_format(&raw).map_err(|e| {
                self.logger.warn(
                    "Response format could not be parsed",
                    json!({ "length": raw.len(), "error": e.to_string() }),
                );
                e
            }),
        }
    }

    /// Extracted content is model output and may be truncated. Only closers
    /// are repaired so that extracted values reach the caller verbatim.
    fn parse_content(&self, content: &str) -> DocAiResult<serde_json::Value> {
        match parse_with_closers(content) {
            Some((value, adjusted)) => {
                if adjusted {
                    self.logger.warn(
                        "Extracted content required repair",
                        json!({ "length": content.len() }),
                    );
                }
                Ok(value)
            }
            None => Err(DocAiError::Response(ResponseError::DeserializationError {
                message: format!(
                    "extracted content is not valid JSON ({} bytes)",
                    content.len()
                ),
            })),
        }
    }
}

#[async_trait]
impl ExtractionService for ExtractionServiceImpl {
    async fn extract(&self, request: ExtractionRequest) -> DocAiResult<ExtractionResponse> {
        validate_document(&request.document)?;
        let response_format = self.resolve_format(request.response_format)?;

        let model = request
            .model
            .unwrap_or_else(|| self.config.default_models.extraction.clone());

        self.logger.debug(
            "Starting information extraction",
            json!({
                "model": model,
                "file_name": request.document.file_name,
                "schema": response_format.json_schema.name,
            }),
        );

        let body = CompletionRequest {
            model,
            messages: vec![CompletionMessage::user_documents([&request.document])],
            response_format: Some(response_format),
        };
        let http_request =
            self.request_builder
                .build_request(HttpMethod::Post, endpoints::EXTRACTION, Some(&body))?;

        let response = self.transport.send(http_request).await.map_err(|e| {
            self.logger.error(
                "Network error during information extraction",
                json!({ "error": e.to_string() }),
            );
            DocAiError::from(e)
        })?;

        let completion: CompletionResponse = ResponseParser::parse_response(response)?;
        let content = completion.first_content().ok_or_else(|| {
            DocAiError::Response(ResponseError::UnexpectedFormat {
                message: "extraction response has no message content".to_string(),
            })
        })?;
        let data = self.parse_content(content)?;

        self.logger.info(
            "Information extraction completed",
            json!({ "total_tokens": completion.usage.as_ref().and_then(|u| u.total_tokens) }),
        );

        Ok(ExtractionResponse {
            data,
            model: completion.model,
            usage: completion.usage,
        })
    }
}
