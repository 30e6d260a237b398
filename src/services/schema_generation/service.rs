//! Schema generation service implementation.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::SchemaGenerationService;
use crate::auth::AuthManager;
use crate::config::DocAiConfig;
use crate::error::{DocAiError, DocAiResult, ResponseError};
use crate::observability::Logger;
use crate::repair::parse_response_format;
use crate::services::validation::validate_schema_request;
use crate::transport::{endpoints, HttpMethod, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{
    CompletionMessage, CompletionRequest, CompletionResponse, SchemaGenerationRequest,
    SchemaGenerationResponse,
};

/// Implementation of [`SchemaGenerationService`].
pub struct SchemaGenerationServiceImpl {
    config: Arc<DocAiConfig>,
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Box<dyn Logger>,
}

impl SchemaGenerationServiceImpl {
    /// Create a new schema generation service.
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
}

#[async_trait]
impl SchemaGenerationService for SchemaGenerationServiceImpl {
    async fn generate(&self, request: SchemaGenerationRequest) -> DocAiResult<SchemaGenerationResponse> {
        validate_schema_request(&request)?;

        let model = request
            .model
            .unwrap_or_else(|| self.config.default_models.schema_generation.clone());

        self.logger.debug(
            "Starting schema generation",
            json!({ "model": model, "documents": request.documents.len() }),
        );

        let body = CompletionRequest {
            model,
            messages: vec![CompletionMessage::user_documents(&request.documents)],
            response_format: None,
        };
        let http_request = self.request_builder.build_request(
            HttpMethod::Post,
            endpoints::SCHEMA_GENERATION,
            Some(&body),
        )?;

        let response = self.transport.send(http_request).await.map_err(|e| {
            self.logger.error(
                "Network error during schema generation",
                json!({ "error": e.to_string() }),
            );
            DocAiError::from(e)
        })?;

        let completion: CompletionResponse = ResponseParser::parse_response(response)?;
        let content = completion.first_content().ok_or_else(|| {
            DocAiError::Response(ResponseError::UnexpectedFormat {
                message: "schema generation response has no message content".to_string(),
            })
        })?;

        let response_format = parse_response_format(content).map_err(|e| {
            self.logger.warn(
                "Generated schema could not be parsed",
                json!({ "length": content.len(), "error": e.to_string() }),
            );
            e
        })?;

        self.logger.info(
            "Schema generation completed",
            json!({
                "schema": response_format.json_schema.name,
                "properties": response_format.property_names().len(),
            }),
        );

        Ok(SchemaGenerationResponse {
            response_format,
            model: completion.model,
            usage: completion.usage,
        })
    }
}
