//! Mock implementations for testing.
//!
//! [`MockHttpTransport`] replays queued responses and records every request;
//! [`RecordingLogger`] captures log calls so tests can assert on them.

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

use crate::auth::AuthManager;
use crate::observability::Logger;
use crate::transport::{
    ChunkedStream, HttpMethod, HttpRequest, HttpResponse, HttpTransport, StreamingResponse,
    TransportError,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Scripted outcome of one `send_streaming` call.
#[derive(Debug)]
pub enum StreamScript {
    /// Yields these items, then ends.
    Chunks(Vec<Result<Bytes, TransportError>>),
    /// Yields these chunks, then stays pending forever.
    ChunksThenHang(Vec<Bytes>),
    /// Success status with no body.
    NoBody,
    /// Fails before any body is available.
    Error(TransportError),
}

/// Mock HTTP transport for testing.
///
/// ```
/// use integrations_docai::mocks::MockHttpTransport;
/// use integrations_docai::transport::{HttpMethod, HttpRequest, HttpTransport};
/// use std::collections::HashMap;
///
/// # tokio_test::block_on(async {
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, r#"{"status": "ok"}"#);
///
/// let request = HttpRequest {
///     method: HttpMethod::Post,
///     url: "https://example.com/v1/document-chat".to_string(),
///     headers: HashMap::new(),
///     body: None,
/// };
/// let response = transport.send(request).await.unwrap();
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # });
/// ```
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    streaming_responses: Mutex<VecDeque<StreamScript>>,
    requests: Mutex<Vec<HttpRequest>>,
    body_dropped: Arc<AtomicBool>,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a response for the next `send`.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        lock(&self.responses).push_back(response);
    }

    /// Enqueue a JSON response.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        self.enqueue_json_response_with_headers(status, body, &[]);
    }

    /// Enqueue a JSON response with extra headers.
    pub fn enqueue_json_response_with_headers(&self, status: u16, body: &str, headers: &[(&str, &str)]) {
        let mut map: HashMap<String, String> = headers
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), (*v).to_string()))
            .collect();
        map.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(Ok(HttpResponse {
            status,
            headers: map,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Enqueue a transport error for the next `send`.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// Enqueue a streaming response made of these chunks.
    pub fn enqueue_streaming_response(&self, chunks: Vec<Bytes>) {
        self.enqueue_stream_script(StreamScript::Chunks(chunks.into_iter().map(Ok).collect()));
    }

    /// Enqueue a scripted streaming outcome.
    pub fn enqueue_stream_script(&self, script: StreamScript) {
        lock(&self.streaming_responses).push_back(script);
    }

    /// Whether the most recently handed-out stream body has been dropped.
    pub fn body_dropped(&self) -> bool {
        self.body_dropped.load(Ordering::SeqCst)
    }

    /// All recorded requests.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// The last recorded request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Body of the last request as lossy UTF-8.
    pub fn last_request_body(&self) -> Option<String> {
        self.last_request()
            .and_then(|r| r.body)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Body of the last request parsed as JSON.
    pub fn last_request_json(&self) -> Option<Value> {
        self.last_request()
            .and_then(|r| r.body)
            .and_then(|b| serde_json::from_slice(&b).ok())
    }

    /// Asserts the number of recorded requests.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = lock(&self.requests).len();
        assert_eq!(actual, expected, "Expected {} requests, got {}", expected, actual);
    }

    /// Asserts method and URL suffix of a recorded request.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_suffix: &str) {
        let requests = lock(&self.requests);
        let request = requests
            .get(index)
            .unwrap_or_else(|| panic!("No request at index {}", index));
        assert_eq!(request.method, method);
        assert!(
            request.url.ends_with(url_suffix),
            "Expected URL ending in '{}', got '{}'",
            url_suffix,
            request.url
        );
    }

    /// Asserts a header value (name matched case-insensitively).
    pub fn verify_header(&self, index: usize, name: &str, value: &str) {
        let requests = lock(&self.requests);
        let request = requests
            .get(index)
            .unwrap_or_else(|| panic!("No request at index {}", index));
        assert_eq!(request.header(name), Some(value), "header {}", name);
    }

    fn tracked(&self, inner: ChunkedStream) -> ChunkedStream {
        self.body_dropped.store(false, Ordering::SeqCst);
        Box::pin(DropTracked {
            inner,
            dropped: Arc::clone(&self.body_dropped),
        })
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            ))
        })
    }

    async fn send_streaming(&self, request: HttpRequest) -> Result<StreamingResponse, TransportError> {
        lock(&self.requests).push(request);

        let script = lock(&self.streaming_responses)
            .pop_front()
            .unwrap_or_else(|| {
                StreamScript::Error(TransportError::Connection(
                    "No streaming response configured in MockHttpTransport".to_string(),
                ))
            });

        let body: Option<ChunkedStream> = match script {
            StreamScript::Chunks(items) => Some(self.tracked(Box::pin(stream::iter(items)))),
            StreamScript::ChunksThenHang(chunks) => Some(self.tracked(Box::pin(
                stream::iter(chunks.into_iter().map(Ok::<Bytes, TransportError>)).chain(stream::pending()),
            ))),
            StreamScript::NoBody => None,
            StreamScript::Error(e) => return Err(e),
        };

        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "text/event-stream".to_string());
        Ok(StreamingResponse {
            status: 200,
            headers,
            body,
        })
    }
}

/// Body wrapper that records when it is dropped.
struct DropTracked {
    inner: ChunkedStream,
    dropped: Arc<AtomicBool>,
}

impl Stream for DropTracked {
    type Item = Result<Bytes, TransportError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for DropTracked {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

/// Mock authentication manager.
#[derive(Clone)]
pub struct MockAuthManager {
    api_key: String,
}

impl MockAuthManager {
    /// Create a mock auth manager with the given key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
        }
    }
}

impl AuthManager for MockAuthManager {
    fn auth_header(&self) -> (String, String) {
        ("Authorization".to_string(), format!("Bearer {}", self.api_key))
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}

/// A captured log call.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// `"debug"`, `"info"`, `"warn"` or `"error"`.
    pub level: &'static str,
    /// Log message.
    pub message: String,
    /// Structured fields.
    pub fields: Value,
}

/// Logger that records every call.
#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.entries).clone()
    }

    /// Whether any entry at `level` has this message.
    pub fn contains(&self, level: &str, message: &str) -> bool {
        lock(&self.entries)
            .iter()
            .any(|e| e.level == level && e.message == message)
    }

    fn record(&self, level: &'static str, message: &str, fields: Value) {
        lock(&self.entries).push(LogEntry {
            level,
            message: message.to_string(),
            fields,
        });
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str, fields: Value) {
        self.record("debug", message, fields);
    }

    fn info(&self, message: &str, fields: Value) {
        self.record("info", message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        self.record("warn", message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        self.record("error", message, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: "https://api.example.com/v1/document-chat".to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_send_fails() {
        let transport = MockHttpTransport::new();
        assert!(transport.send(request()).await.is_err());
        transport.verify_request_count(1);
    }

    #[tokio::test]
    async fn test_streaming_body_drop_tracked() {
        let transport = MockHttpTransport::new();
        transport.enqueue_streaming_response(vec![Bytes::from_static(b"data: {}\n")]);

        let response = transport.send_streaming(request()).await.unwrap();
        let mut body = response.body.unwrap();
        assert!(body.next().await.is_some());
        assert!(!transport.body_dropped());
        drop(body);
        assert!(transport.body_dropped());
    }

    #[tokio::test]
    async fn test_no_body_script() {
        let transport = MockHttpTransport::new();
        transport.enqueue_stream_script(StreamScript::NoBody);
        assert!(transport.send_streaming(request()).await.unwrap().body.is_none());
    }
}
