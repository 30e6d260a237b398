//! Integration tests for document parsing.

use bytes::Bytes;
use integrations_docai::fixtures::load_fixture;
use integrations_docai::mocks::{MockHttpTransport, RecordingLogger};
use integrations_docai::transport::{HttpMethod, TransportError};
use integrations_docai::types::{DocumentParseRequest, FileUpload, OcrMode, OutputFormat};
use integrations_docai::{
    DocAiClient, DocAiClientImpl, DocAiError, NetworkError, RequestError, ResourceError,
};
use secrecy::SecretString;
use std::io::Write;
use std::sync::Arc;

fn setup() -> (DocAiClientImpl, Arc<MockHttpTransport>, Arc<RecordingLogger>) {
    let transport = Arc::new(MockHttpTransport::new());
    let logger = Arc::new(RecordingLogger::new());
    let client = DocAiClientImpl::builder()
        .api_key(SecretString::new("test-key".into()))
        .base_url("https://api.example.com")
        .transport(transport.clone())
        .logger(logger.clone())
        .build()
        .unwrap();
    (client, transport, logger)
}

fn scan() -> FileUpload {
    FileUpload::new("scan.pdf", Bytes::from_static(b"%PDF-1.7 scan"))
}

#[tokio::test]
async fn test_parse_document() {
    let (client, transport, logger) = setup();
    transport.enqueue_json_response(200, &load_fixture("document_parse/success.json"));

    let response = client
        .document_parse()
        .parse(DocumentParseRequest::new(scan()))
        .await
        .unwrap();

    assert_eq!(response.elements.len(), 3);
    assert_eq!(response.page_count(), 2);
    assert_eq!(response.elements_on_page(1).count(), 2);
    assert_eq!(response.elements_by_category("table").count(), 1);
    assert_eq!(response.content.markdown.as_deref(), Some("# Invoice\nTotal: 42.00 EUR"));

    transport.verify_request(0, HttpMethod::Post, "/v1/document-digitization");
    let request = transport.last_request().unwrap();
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data; boundary=----DocAiBoundary"));

    let body = transport.last_request_body().unwrap();
    assert!(body.contains("name=\"document\"; filename=\"scan.pdf\"\r\nContent-Type: application/pdf"));
    assert!(body.contains("name=\"model\"\r\n\r\ndocument-parse"));
    assert!(body.contains("name=\"ocr\"\r\n\r\nauto"));
    assert!(!body.contains("name=\"output_formats\""));

    assert!(logger.contains("info", "Document parse completed"));
}

#[tokio::test]
async fn test_parse_sends_options() {
    let (client, transport, _) = setup();
    transport.enqueue_json_response(200, &load_fixture("document_parse/success.json"));

    let request = DocumentParseRequest::new(scan())
        .with_ocr(OcrMode::Force)
        .with_coordinates(false)
        .with_output_formats([OutputFormat::Html, OutputFormat::Markdown])
        .with_base64_encoding(["table"]);
    client.document_parse().parse(request).await.unwrap();

    let body = transport.last_request_body().unwrap();
    assert!(body.contains("name=\"ocr\"\r\n\r\nforce"));
    assert!(body.contains("name=\"coordinates\"\r\n\r\nfalse"));
    assert!(body.contains("name=\"output_formats\"\r\n\r\n[\"html\",\"markdown\"]"));
    assert!(body.contains("name=\"base64_encoding\"\r\n\r\n[\"table\"]"));
}

#[tokio::test]
async fn test_parse_rejects_empty_document() {
    let (client, transport, _) = setup();

    let err = client
        .document_parse()
        .parse(DocumentParseRequest::new(FileUpload::new("empty.pdf", Bytes::new())))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DocAiError::Request(RequestError::ValidationError { .. })
    ));
    transport.verify_request_count(0);
}

#[tokio::test]
async fn test_parse_network_failure() {
    let (client, transport, logger) = setup();
    transport.enqueue_error(TransportError::Timeout);

    let err = client
        .document_parse()
        .parse(DocumentParseRequest::new(scan()))
        .await
        .unwrap_err();

    assert!(matches!(err, DocAiError::Network(NetworkError::Timeout)));
    assert!(err.is_retryable());
    assert!(logger.contains("error", "Network error during document parse"));
}

#[tokio::test]
async fn test_upload_from_path() {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"\x89PNG\r\n").unwrap();

    let upload = FileUpload::from_path(file.path()).await.unwrap();
    assert_eq!(upload.mime_type, "image/png");
    assert_eq!(upload.size(), 6);
    assert!(upload.file_name.ends_with(".png"));
}

#[tokio::test]
async fn test_upload_from_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pdf");

    let err = FileUpload::from_path(&missing).await.unwrap_err();
    assert!(matches!(
        err,
        DocAiError::Resource(ResourceError::DocumentNotFound { .. })
    ));
}
