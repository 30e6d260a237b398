//! Document parsing service implementation.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::DocumentParseService;
use crate::auth::AuthManager;
use crate::config::DocAiConfig;
use crate::error::{DocAiError, DocAiResult};
use crate::observability::Logger;
use crate::services::validation::validate_parse_request;
use crate::transport::{endpoints, HttpTransport, MultipartForm, RequestBuilder, ResponseParser};
use crate::types::{DocumentParseRequest, DocumentParseResponse};

/// Implementation of [`DocumentParseService`].
pub struct DocumentParseServiceImpl {
    config: Arc<DocAiConfig>,
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Box<dyn Logger>,
}

impl DocumentParseServiceImpl {
    /// Create a new document parse service.
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

    fn build_form(&self, request: &DocumentParseRequest) -> DocAiResult<MultipartForm> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_models.document_parse.clone());
        let document = &request.document;

        let mut form = MultipartForm::new()
            .file(
                "document",
                &document.file_name,
                &document.mime_type,
                document.data.clone(),
            )
            .text("model", model)
            .text("ocr", request.ocr.as_str())
            .text("coordinates", request.coordinates.to_string());

        if !request.output_formats.is_empty() {
            form = form.text("output_formats", serde_json::to_string(&request.output_formats)?);
        }
        if !request.base64_encoding.is_empty() {
            form = form.text("base64_encoding", serde_json::to_string(&request.base64_encoding)?);
        }
        Ok(form)
    }
}

#[async_trait]
impl DocumentParseService for DocumentParseServiceImpl {
    async fn parse(&self, request: DocumentParseRequest) -> DocAiResult<DocumentParseResponse> {
        validate_parse_request(&request)?;

        self.logger.debug(
            "Starting document parse",
            json!({
                "file_name": request.document.file_name,
                "size": request.document.size(),
                "ocr": request.ocr.as_str(),
            }),
        );

        let form = self.build_form(&request)?;
        let http_request =
            self.request_builder
                .build_multipart_request(endpoints::DOCUMENT_PARSE, form, false)?;

        let response = self.transport.send(http_request).await.map_err(|e| {
            self.logger.error(
                "Network error during document parse",
                json!({ "error": e.to_string() }),
            );
            DocAiError::from(e)
        })?;

        let status = response.status;
        let parsed: DocumentParseResponse = ResponseParser::parse_response(response).map_err(|e| {
            self.logger.warn(
                "Document parse failed",
                json!({ "status": status, "error": e.to_string() }),
            );
            e
        })?;

        self.logger.info(
            "Document parse completed",
            json!({
                "elements": parsed.elements.len(),
                "pages": parsed.usage.as_ref().and_then(|u| u.pages),
            }),
        );
        Ok(parsed)
    }
}
