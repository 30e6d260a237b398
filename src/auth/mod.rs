//! Authentication for the document-AI API.

use crate::config::DocAiConfig;
use secrecy::{ExposeSecret, SecretString};

/// Authentication manager.
pub trait AuthManager: Send + Sync {
    /// Get the authentication header name and value.
    fn auth_header(&self) -> (String, String);

    /// Clone the auth manager into a boxed trait object.
    fn clone_box(&self) -> Box<dyn AuthManager>;
}

impl Clone for Box<dyn AuthManager> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Bearer-token authentication manager.
pub struct BearerAuthManager {
    api_key: SecretString,
}

impl BearerAuthManager {
    /// Create a new bearer auth manager.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Create from config.
    pub fn from_config(config: &DocAiConfig) -> Self {
        Self::new(config.api_key.clone())
    }
}

impl AuthManager for BearerAuthManager {
    fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        )
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(Self {
            api_key: self.api_key.clone(),
        })
    }
}
