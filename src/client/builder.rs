//! Builder for creating client instances.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use super::client::DocAiClientImpl;
use crate::config::{DefaultModels, DocAiConfig, LogLevel};
use crate::error::{ConfigurationError, DocAiError, DocAiResult};
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Builder for [`DocAiClientImpl`].
///
/// ```no_run
/// use integrations_docai::DocAiClientBuilder;
/// use secrecy::SecretString;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DocAiClientBuilder::new()
///     .api_key(SecretString::new("your-api-key".into()))
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DocAiClientBuilder {
    config: Option<DocAiConfig>,
    api_key: Option<SecretString>,
    base_url: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    log_level: Option<LogLevel>,
    default_models: Option<DefaultModels>,

    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl DocAiClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a complete config. Individual setters override it.
    #[must_use]
    pub fn config(mut self, config: DocAiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the API version path segment.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the log level.
    #[must_use]
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Sets per-endpoint default models.
    #[must_use]
    pub fn default_models(mut self, models: DefaultModels) -> Self {
        self.default_models = Some(models);
        self
    }

    /// Uses a custom transport (mocks in tests).
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Uses a custom logger.
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    fn resolve_config(&mut self) -> DocAiResult<DocAiConfig> {
        let base = self.config.take();
        let mut builder = DocAiConfig::builder();

        if let Some(base) = &base {
            builder = builder
                .api_key(base.api_key.clone())
                .base_url(base.base_url.as_str())?
                .api_version(&base.api_version)
                .timeout(base.timeout)
                .connect_timeout(base.connect_timeout)
                .log_level(base.log_level)
                .default_models(base.default_models.clone());
        }
        if let Some(key) = self.api_key.take() {
            builder = builder.api_key(key);
        }
        if let Some(url) = self.base_url.take() {
            builder = builder.base_url(&url)?;
        }
        if let Some(version) = self.api_version.take() {
            builder = builder.api_version(&version);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(level) = self.log_level {
            builder = builder.log_level(level);
        }
        if let Some(models) = self.default_models.take() {
            builder = builder.default_models(models);
        }

        builder.build()
    }

    /// Builds the client.
    pub fn build(mut self) -> DocAiResult<DocAiClientImpl> {
        let config = self.resolve_config()?;

        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new(config.timeout, config.connect_timeout).map_err(|e| {
                    DocAiError::Configuration(ConfigurationError::InvalidConfiguration {
                        message: e.to_string(),
                    })
                })?,
            ),
        };

        let logger = self.logger.take().unwrap_or_else(|| {
            Arc::new(StructuredLogger::new("integrations_docai").with_level(config.log_level))
        });

        Ok(DocAiClientImpl::from_parts(config, transport, logger))
    }
}
