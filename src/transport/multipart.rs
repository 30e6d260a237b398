//! Hand-built `multipart/form-data` bodies.
//!
//! The transport sends raw bytes, so forms are serialized up front rather than
//! through `reqwest::multipart`, which would tie request construction to reqwest.

use bytes::{BufMut, Bytes, BytesMut};

/// Multipart form with a random boundary.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<MultipartPart>,
}

#[derive(Debug, Clone)]
struct MultipartPart {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self {
            boundary: format!("----DocAiBoundary{}", uuid::Uuid::new_v4().simple()),
            parts: Vec::new(),
        }
    }

    /// Boundary string used between parts.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Number of parts added so far.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether no parts were added.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Adds a plain text field.
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.to_string(),
            filename: None,
            content_type: None,
            data: Bytes::from(value.into()),
        });
        self
    }

    /// Adds a text field only when a value is present.
    pub fn optional_text(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    /// Adds a file field.
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: Bytes) -> Self {
        self.parts.push(MultipartPart {
            name: name.to_string(),
            filename: Some(filename.to_string()),
            content_type: Some(content_type.to_string()),
            data,
        });
        self
    }

    /// Serializes the form, returning the `Content-Type` header value and the body.
    pub fn build(self) -> (String, Bytes) {
        let mut body = BytesMut::new();

        for part in &self.parts {
            body.put_slice(format!("--{}\r\n", self.boundary).as_bytes());

            let name = escape_quoted(&part.name);
            match &part.filename {
                Some(filename) => body.put_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name,
                        escape_quoted(filename)
                    )
                    .as_bytes(),
                ),
                None => body.put_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", name).as_bytes(),
                ),
            }

            if let Some(content_type) = &part.content_type {
                body.put_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
            }

            body.put_slice(b"\r\n");
            body.put_slice(&part.data);
            body.put_slice(b"\r\n");
        }

        body.put_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        let content_type = format!("{}; boundary={}", mime::MULTIPART_FORM_DATA, self.boundary);
        (content_type, body.freeze())
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_text_and_file_parts() {
        let form = MultipartForm::new()
            .text("model", "document-parse")
            .file("document", "a.pdf", "application/pdf", Bytes::from_static(b"%PDF"));
        let boundary = form.boundary().to_string();

        let (content_type, body) = form.build();
        let body = String::from_utf8(body.to_vec()).unwrap();

        assert_eq!(content_type, format!("multipart/form-data; boundary={}", boundary));
        assert!(body.contains("Content-Disposition: form-data; name=\"model\"\r\n\r\ndocument-parse\r\n"));
        assert!(body.contains("name=\"document\"; filename=\"a.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF"));
        assert!(body.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[test]
    fn test_optional_text_skips_none() {
        let form = MultipartForm::new()
            .optional_text("conversation_id", None::<String>)
            .optional_text("instructions", Some("be brief"));
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn test_filename_quotes_escaped() {
        let form = MultipartForm::new().file("document", "we\"ird.png", "image/png", Bytes::new());
        let (_, body) = form.build();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("filename=\"we\\\"ird.png\""));
    }
}
