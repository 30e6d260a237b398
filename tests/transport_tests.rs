//! Integration tests against a local HTTP server using the reqwest transport.

use bytes::Bytes;
use futures::StreamExt;
use integrations_docai::fixtures::load_fixture;
use integrations_docai::observability::NoopLogger;
use integrations_docai::transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport, TransportError};
use integrations_docai::types::{ChatRequest, ExtractionRequest, FileUpload, ResponseFormat};
use integrations_docai::{
    ChatAccumulator, DocAiClient, DocAiClientImpl, DocAiError, RateLimitError, StreamError,
};
use secrecy::SecretString;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(Duration::from_secs(10), Duration::from_secs(5)).unwrap()
}

fn client_for(server: &MockServer) -> DocAiClientImpl {
    DocAiClientImpl::builder()
        .api_key(SecretString::new("test-key".into()))
        .base_url(server.uri())
        .logger(Arc::new(NoopLogger))
        .build()
        .unwrap()
}

fn invoice() -> FileUpload {
    FileUpload::new("invoice.pdf", Bytes::from_static(b"%PDF-1.7 invoice"))
}

#[tokio::test]
async fn test_send_returns_status_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("x-test", "1"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-request-id", "req-9")
                .set_body_string("created"),
        )
        .mount(&server)
        .await;

    let mut headers = HashMap::new();
    headers.insert("x-test".to_string(), "1".to_string());
    let response = transport()
        .send(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/echo", server.uri()),
            headers,
            body: Some(Bytes::from_static(b"payload")),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.headers.get("x-request-id").map(String::as_str), Some("req-9"));
    assert_eq!(response.body, Bytes::from_static(b"created"));
}

#[tokio::test]
async fn test_send_streaming_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = transport()
        .send_streaming(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/stream", server.uri()),
            headers: HashMap::new(),
            body: None,
        })
        .await;

    match result {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, Bytes::from_static(b"boom"));
        }
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("expected a status error"),
    }
}

#[tokio::test]
async fn test_send_streaming_yields_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("data: hello\n\n", "text/event-stream"))
        .mount(&server)
        .await;

    let response = transport()
        .send_streaming(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/stream", server.uri()),
            headers: HashMap::new(),
            body: None,
        })
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let mut body = response.body.unwrap();
    let mut collected = Vec::new();
    while let Some(chunk) = body.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(collected, b"data: hello\n\n");
}

#[tokio::test]
async fn test_extraction_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/information-extraction"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains("\"json_schema\""))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(load_fixture("extraction/success.json"), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let format = ResponseFormat::json_schema(
        "invoice",
        json!({"type": "object", "properties": {"total": {"type": "number"}}}),
    );
    let response = client_for(&server)
        .extraction()
        .extract(ExtractionRequest::new(invoice(), format))
        .await
        .unwrap();

    assert_eq!(response.data["invoice_number"], "INV-001");
}

#[tokio::test]
async fn test_rate_limit_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "3")
                .set_body_raw(load_fixture("errors/rate_limit.json"), "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .extraction()
        .extract(ExtractionRequest::new(
            invoice(),
            ResponseFormat::json_schema("invoice", json!({"type": "object"})),
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DocAiError::RateLimit(RateLimitError::TooManyRequests { .. })
    ));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
}

#[tokio::test]
async fn test_chat_stream_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/document-chat"))
        .and(header("accept", "text/event-stream"))
        .and(body_string_contains("name=\"stream\"\r\n\r\ntrue"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(load_fixture("chat/stream_output.sse"), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let stream = client_for(&server)
        .chat()
        .chat_stream(ChatRequest::new([invoice()], "Total?"), CancellationToken::new())
        .await
        .unwrap();
    let message = ChatAccumulator::collect(stream).await.unwrap();

    assert_eq!(message.text, "The total is 42,00 € (über Netto).");
    assert_eq!(message.conversation_id.as_deref(), Some("conv_abc"));
}

#[tokio::test]
async fn test_chat_stream_rejected_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .chat()
        .chat_stream(ChatRequest::new([invoice()], "Total?"), CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(DocAiError::Stream(StreamError::Transport { status: Some(503), .. }))
    ));
}
