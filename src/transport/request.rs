//! HTTP request builder for the document-AI API.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use super::http::{HttpMethod, HttpRequest};
use super::multipart::MultipartForm;
use crate::auth::AuthManager;
use crate::error::DocAiError;

/// Builds authenticated requests against a versioned base URL.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    auth_manager: Box<dyn AuthManager>,
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new(base_url: Url, api_version: String, auth_manager: Box<dyn AuthManager>) -> Self {
        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Builds the full URL for an endpoint path.
    pub fn build_url(&self, path: &str) -> Result<Url, DocAiError> {
        let full_path = format!("{}/{}", self.api_version, path.trim_start_matches('/'));
        Ok(self.base_url.join(&full_path)?)
    }

    /// Builds a request with an optional JSON body.
    pub fn build_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&T>,
    ) -> Result<HttpRequest, DocAiError> {
        let url = self.build_url(path)?;
        let mut headers = self.base_headers();

        let body = match body {
            Some(b) => {
                headers.insert("Content-Type".to_string(), mime::APPLICATION_JSON.to_string());
                Some(Bytes::from(serde_json::to_vec(b)?))
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        })
    }

    /// Builds a POST request carrying a multipart form.
    pub fn build_multipart_request(
        &self,
        path: &str,
        form: MultipartForm,
        streaming: bool,
    ) -> Result<HttpRequest, DocAiError> {
        let url = self.build_url(path)?;
        let mut headers = self.base_headers();

        let (content_type, body) = form.build();
        headers.insert("Content-Type".to_string(), content_type);
        if streaming {
            headers.insert("Accept".to_string(), mime::TEXT_EVENT_STREAM.to_string());
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers,
            body: Some(body),
        })
    }

    fn base_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        let (name, value) = self.auth_manager.auth_header();
        headers.insert(name, value);
        headers.insert(
            "User-Agent".to_string(),
            format!("integrations-docai/{}", env!("CARGO_PKG_VERSION")),
        );
        headers
    }
}
