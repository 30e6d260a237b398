//! Types shared across endpoints.

use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DocAiError, DocAiResult, RequestError, ResourceError};

/// Token and page usage reported by the API.
///
/// Chat-completions style names (`prompt_tokens`, `completion_tokens`) are
/// accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Input tokens.
    #[serde(alias = "prompt_tokens", skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    /// Output tokens.
    #[serde(alias = "completion_tokens", skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    /// Total tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    /// Pages processed (document parsing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u64>,
}

/// HWP and HWPX are unknown to the MIME database.
fn fallback_mime_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("hwp") | Some("hwpx") => "application/x-hwp",
        _ => "application/octet-stream",
    }
}

/// A document to upload.
#[derive(Clone)]
pub struct FileUpload {
    /// File name sent in the multipart disposition.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// File contents.
    pub data: Bytes,
}

impl FileUpload {
    /// Creates an upload, guessing the MIME type from the file name.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = match mime_guess::from_path(&file_name).first() {
            Some(guess) => guess.essence_str().to_string(),
            None => fallback_mime_type(&file_name).to_string(),
        };
        Self {
            file_name,
            mime_type,
            data: data.into(),
        }
    }

    /// Overrides the guessed MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Reads a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> DocAiResult<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DocAiError::Resource(ResourceError::DocumentNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DocAiError::Request(RequestError::InvalidParameter {
                    parameter: "path".to_string(),
                    message: format!("failed to read {}: {}", path.display(), e),
                })
            }
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        Ok(Self::new(file_name, data))
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encodes the contents as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_guessed_from_extension() {
        assert_eq!(FileUpload::new("scan.pdf", Bytes::new()).mime_type, "application/pdf");
        assert_eq!(FileUpload::new("photo.PNG", Bytes::new()).mime_type, "image/png");
        assert_eq!(
            FileUpload::new("blob", Bytes::new()).mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_hwp_falls_back_to_hwp_mime() {
        assert_eq!(FileUpload::new("report.hwp", Bytes::new()).mime_type, "application/x-hwp");
        assert_eq!(FileUpload::new("REPORT.HWPX", Bytes::new()).mime_type, "application/x-hwp");
    }

    #[test]
    fn test_data_url() {
        let upload = FileUpload::new("a.png", Bytes::from_static(b"hi"));
        assert_eq!(upload.to_data_url(), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_usage_accepts_completion_aliases() {
        let usage: Usage =
            serde_json::from_str(r#"{"prompt_tokens":3,"completion_tokens":4,"total_tokens":7}"#).unwrap();
        assert_eq!(usage.input_tokens, Some(3));
        assert_eq!(usage.output_tokens, Some(4));
        assert_eq!(usage.total_tokens, Some(7));
        assert_eq!(usage.pages, None);
    }
}
