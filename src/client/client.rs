//! Client implementation with lazily constructed services.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::builder::DocAiClientBuilder;
use super::traits::DocAiClient;
use crate::auth::{AuthManager, BearerAuthManager};
use crate::config::DocAiConfig;
use crate::error::DocAiResult;
use crate::observability::Logger;
use crate::services::{
    ChatService, ChatServiceImpl, DocumentParseService, DocumentParseServiceImpl, ExtractionService,
    ExtractionServiceImpl, SchemaGenerationService, SchemaGenerationServiceImpl,
};
use crate::transport::HttpTransport;

/// Default [`DocAiClient`].
///
/// ```no_run
/// use integrations_docai::{DocAiClient, DocAiClientImpl};
/// use integrations_docai::types::{ChatRequest, FileUpload};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DocAiClientImpl::from_env()?;
/// let invoice = FileUpload::from_path("invoice.pdf").await?;
/// let answer = client.chat().chat(ChatRequest::new([invoice], "What is the total?")).await?;
/// println!("{}", answer.text);
/// # Ok(())
/// # }
/// ```
pub struct DocAiClientImpl {
    config: Arc<DocAiConfig>,
    transport: Arc<dyn HttpTransport>,
    logger: Arc<dyn Logger>,

    document_parse_service: OnceCell<DocumentParseServiceImpl>,
    extraction_service: OnceCell<ExtractionServiceImpl>,
    schema_generation_service: OnceCell<SchemaGenerationServiceImpl>,
    chat_service: OnceCell<ChatServiceImpl>,
}

impl DocAiClientImpl {
    /// Creates a builder.
    pub fn builder() -> DocAiClientBuilder {
        DocAiClientBuilder::new()
    }

    /// Creates a client configured from `DOCAI_*` environment variables.
    pub fn from_env() -> DocAiResult<Self> {
        Self::new(DocAiConfig::from_env()?)
    }

    /// Creates a client from a config, using the reqwest transport.
    pub fn new(config: DocAiConfig) -> DocAiResult<Self> {
        DocAiClientBuilder::new().config(config).build()
    }

    pub(super) fn from_parts(
        config: DocAiConfig,
        transport: Arc<dyn HttpTransport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            logger,
            document_parse_service: OnceCell::new(),
            extraction_service: OnceCell::new(),
            schema_generation_service: OnceCell::new(),
            chat_service: OnceCell::new(),
        }
    }

    fn auth(&self) -> Box<dyn AuthManager> {
        Box::new(BearerAuthManager::from_config(&self.config))
    }

    fn logger(&self) -> Box<dyn Logger> {
        Box::new(Arc::clone(&self.logger))
    }
}

impl DocAiClient for DocAiClientImpl {
    fn document_parse(&self) -> &dyn DocumentParseService {
        self.document_parse_service.get_or_init(|| {
            DocumentParseServiceImpl::new(
                Arc::clone(&self.config),
                Arc::clone(&self.transport),
                self.auth(),
                self.logger(),
            )
        })
    }

    fn extraction(&self) -> &dyn ExtractionService {
        self.extraction_service.get_or_init(|| {
            ExtractionServiceImpl::new(
                Arc::clone(&self.config),
                Arc::clone(&self.transport),
                self.auth(),
                self.logger(),
            )
        })
    }

    fn schema_generation(&self) -> &dyn SchemaGenerationService {
        self.schema_generation_service.get_or_init(|| {
            SchemaGenerationServiceImpl::new(
                Arc::clone(&self.config),
                Arc::clone(&self.transport),
                self.auth(),
                self.logger(),
            )
        })
    }

    fn chat(&self) -> &dyn ChatService {
        self.chat_service.get_or_init(|| {
            ChatServiceImpl::new(
                Arc::clone(&self.config),
                Arc::clone(&self.transport),
                self.auth(),
                self.logger(),
            )
        })
    }

    fn config(&self) -> &DocAiConfig {
        &self.config
    }
}

impl std::fmt::Debug for DocAiClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocAiClientImpl")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Creates a shareable client from a config.
pub fn create_client(config: DocAiConfig) -> DocAiResult<Arc<dyn DocAiClient>> {
    Ok(Arc::new(DocAiClientImpl::new(config)?))
}

/// Creates a shareable client from the environment.
pub fn create_client_from_env() -> DocAiResult<Arc<dyn DocAiClient>> {
    Ok(Arc::new(DocAiClientImpl::from_env()?))
}
