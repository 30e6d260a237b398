//! Document parsing (OCR and layout analysis) types.

use serde::{Deserialize, Serialize};

use super::common::{FileUpload, Usage};

/// OCR mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrMode {
    /// OCR only for image inputs.
    #[default]
    Auto,
    /// Always run OCR.
    Force,
}

impl OcrMode {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            OcrMode::Auto => "auto",
            OcrMode::Force => "force",
        }
    }
}

/// Content rendering requested from the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML.
    Html,
    /// Markdown.
    Markdown,
    /// Plain text.
    Text,
}

/// Request to parse a single document.
#[derive(Debug, Clone)]
pub struct DocumentParseRequest {
    /// Document to parse.
    pub document: FileUpload,
    /// Model override.
    pub model: Option<String>,
    /// OCR mode.
    pub ocr: OcrMode,
    /// Renderings to return. Empty means the server default.
    pub output_formats: Vec<OutputFormat>,
    /// Include element bounding boxes.
    pub coordinates: bool,
    /// Element categories to return as base64-encoded images (e.g. `"table"`).
    pub base64_encoding: Vec<String>,
}

impl DocumentParseRequest {
    /// Creates a request with server defaults.
    pub fn new(document: FileUpload) -> Self {
        Self {
            document,
            model: None,
            ocr: OcrMode::Auto,
            output_formats: Vec::new(),
            coordinates: true,
            base64_encoding: Vec::new(),
        }
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the OCR mode.
    #[must_use]
    pub fn with_ocr(mut self, ocr: OcrMode) -> Self {
        self.ocr = ocr;
        self
    }

    /// Sets the output formats.
    #[must_use]
    pub fn with_output_formats(mut self, formats: impl IntoIterator<Item = OutputFormat>) -> Self {
        self.output_formats = formats.into_iter().collect();
        self
    }

    /// Enables or disables coordinates.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: bool) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Sets categories to return base64-encoded.
    #[must_use]
    pub fn with_base64_encoding<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.base64_encoding = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// Rendered content in each requested format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentContent {
    /// HTML rendering.
    pub html: Option<String>,
    /// Markdown rendering.
    pub markdown: Option<String>,
    /// Plain-text rendering.
    pub text: Option<String>,
}

/// Normalized point on the page, in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

/// A layout element (paragraph, table, figure, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentElement {
    /// Element id, unique within the response.
    pub id: u64,
    /// Layout category such as `"paragraph"` or `"table"`.
    pub category: String,
    /// 1-based page number.
    pub page: u32,
    /// Element content.
    pub content: DocumentContent,
    /// Bounding polygon, when coordinates were requested.
    pub coordinates: Vec<Point>,
    /// Cropped image of the element, when its category was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_encoding: Option<String>,
}

/// Parse result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentParseResponse {
    /// API version reported by the server.
    pub api: Option<String>,
    /// Model that parsed the document.
    pub model: Option<String>,
    /// Whole-document content.
    pub content: DocumentContent,
    /// Layout elements in reading order.
    pub elements: Vec<DocumentElement>,
    /// Page usage.
    pub usage: Option<Usage>,
}

impl DocumentParseResponse {
    /// Elements on a 1-based page number.
    pub fn elements_on_page(&self, page: u32) -> impl Iterator<Item = &DocumentElement> {
        self.elements.iter().filter(move |e| e.page == page)
    }

    /// Elements of a category.
    pub fn elements_by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a DocumentElement> {
        self.elements.iter().filter(move |e| e.category == category)
    }

    /// Number of distinct pages with elements.
    pub fn page_count(&self) -> usize {
        let mut pages: Vec<u32> = self.elements.iter().map(|e| e.page).collect();
        pages.sort_unstable();
        pages.dedup();
        pages.len()
    }
}
