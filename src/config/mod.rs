//! Configuration types for the document-AI client.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;
use crate::error::{ConfigurationError, DocAiError};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.upstage.ai";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default request timeout (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

impl LogLevel {
    /// Verbosity rank, higher is chattier.
    pub(crate) fn rank(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Model names used when a request does not name one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultModels {
    /// Document parsing model.
    pub document_parse: String,
    /// Information extraction model.
    pub extraction: String,
    /// Document chat model.
    pub chat: String,
    /// Schema generation model.
    pub schema_generation: String,
}

impl Default for DefaultModels {
    fn default() -> Self {
        Self {
            document_parse: "document-parse".to_string(),
            extraction: "information-extract".to_string(),
            chat: "document-chat".to_string(),
            schema_generation: "information-extract".to_string(),
        }
    }
}

/// Configuration for the document-AI client.
#[derive(Clone)]
pub struct DocAiConfig {
    /// API key (required).
    pub api_key: SecretString,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version path segment.
    pub api_version: String,
    /// Default timeout for requests.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Log level for the injected logger.
    pub log_level: LogLevel,
    /// Default model names.
    pub default_models: DefaultModels,
}

impl DocAiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DocAiConfigBuilder {
        DocAiConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// - `DOCAI_API_KEY` (required)
    /// - `DOCAI_BASE_URL`
    /// - `DOCAI_API_VERSION`
    /// - `DOCAI_TIMEOUT_SECS`
    /// - `DOCAI_LOG_LEVEL`
    pub fn from_env() -> Result<Self, DocAiError> {
        let api_key = std::env::var("DOCAI_API_KEY")
            .map_err(|_| ConfigurationError::MissingApiKey)?;

        let base_url = std::env::var("DOCAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = std::env::var("DOCAI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let api_version = std::env::var("DOCAI_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let log_level = std::env::var("DOCAI_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self::builder()
            .api_key(SecretString::new(api_key))
            .base_url(&base_url)?
            .api_version(&api_version)
            .timeout(Duration::from_secs(timeout_secs))
            .log_level(log_level)
            .build()
    }

    /// Returns the full URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, DocAiError> {
        let full_path = format!("{}/{}", self.api_version, path.trim_start_matches('/'));
        Ok(self.base_url.join(&full_path)?)
    }
}

impl std::fmt::Debug for DocAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

/// Builder for `DocAiConfig`.
#[derive(Default)]
pub struct DocAiConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    log_level: Option<LogLevel>,
    default_models: Option<DefaultModels>,
}

impl DocAiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, DocAiError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the default model names.
    pub fn default_models(mut self, models: DefaultModels) -> Self {
        self.default_models = Some(models);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<DocAiConfig, DocAiError> {
        let api_key = self.api_key.ok_or(ConfigurationError::MissingApiKey)?;

        if api_key.expose_secret().trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey.into());
        }

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ConfigurationError::InvalidBaseUrl {
                url: base_url.to_string(),
            }
            .into());
        }

        Ok(DocAiConfig {
            api_key,
            base_url,
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            log_level: self.log_level.unwrap_or_default(),
            default_models: self.default_models.unwrap_or_default(),
        })
    }
}
