//! Integration tests for SSE chat stream decoding.

use bytes::Bytes;
use futures::{stream, StreamExt};
use integrations_docai::fixtures::load_sse_chunks;
use integrations_docai::mocks::{MockHttpTransport, StreamScript};
use integrations_docai::streaming::{decode_chat_stream, ChatAccumulator, ChatStream};
use integrations_docai::transport::{ChunkedStream, HttpMethod, HttpRequest, HttpTransport, TransportError};
use integrations_docai::types::{ChatStreamEvent, DeltaKind, DeltaPrecedence, StreamMetadata};
use integrations_docai::{DocAiError, StreamError};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

fn chunked(chunks: Vec<Bytes>) -> ChunkedStream {
    Box::pin(stream::iter(chunks.into_iter().map(Ok::<_, TransportError>)))
}

fn decode(chunks: &[&'static str]) -> ChatStream {
    let chunks = chunks.iter().map(|c| Bytes::from_static(c.as_bytes())).collect();
    decode_chat_stream(chunked(chunks), CancellationToken::new(), DeltaPrecedence::default())
}

fn decode_fixture(name: &str, chunk_size: usize, precedence: DeltaPrecedence) -> ChatStream {
    decode_chat_stream(
        chunked(load_sse_chunks(name, chunk_size)),
        CancellationToken::new(),
        precedence,
    )
}

async fn collect(stream: ChatStream) -> (Vec<(DeltaKind, String)>, Option<StreamMetadata>) {
    let events: Vec<ChatStreamEvent> = stream.map(|e| e.unwrap()).collect().await;
    let mut deltas = Vec::new();
    let mut finished = None;
    for event in events {
        match event {
            ChatStreamEvent::Delta(d) => deltas.push((d.kind, d.text)),
            ChatStreamEvent::Finished(m) => finished = Some(m),
        }
    }
    (deltas, finished)
}

fn texts(deltas: &[(DeltaKind, String)]) -> Vec<&str> {
    deltas.iter().map(|(_, t)| t.as_str()).collect()
}

fn request() -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Post,
        url: "https://api.example.com/v1/document-chat".to_string(),
        headers: HashMap::new(),
        body: None,
    }
}

#[tokio::test]
async fn test_multibyte_character_split_across_chunks() {
    let line = "data: {\"type\":\"response.output_text.delta\",\"delta\":\"42 € über\"}\n".as_bytes();
    let euro = line.iter().position(|&b| b == 0xE2).unwrap();
    let umlaut = line.iter().position(|&b| b == 0xC3).unwrap();

    let chunks = vec![
        Bytes::copy_from_slice(&line[..euro + 1]),
        Bytes::copy_from_slice(&line[euro + 1..euro + 2]),
        Bytes::copy_from_slice(&line[euro + 2..umlaut + 1]),
        Bytes::copy_from_slice(&line[umlaut + 1..]),
    ];

    let stream = decode_chat_stream(chunked(chunks), CancellationToken::new(), DeltaPrecedence::default());
    let (deltas, _) = collect(stream).await;
    assert_eq!(texts(&deltas), vec!["42 € über"]);
}

#[tokio::test]
async fn test_every_chunk_size_yields_identical_text() {
    let mut expected = None;
    for size in 1..=24 {
        let stream = decode_fixture("chat/stream_output.sse", size, DeltaPrecedence::default());
        let message = ChatAccumulator::collect(stream).await.unwrap();
        assert!(!message.text.contains('\u{FFFD}'), "chunk size {}", size);
        match &expected {
            None => expected = Some(message.text),
            Some(text) => assert_eq!(&message.text, text, "chunk size {}", size),
        }
    }
    assert_eq!(expected.as_deref(), Some("The total is 42,00 € (über Netto)."));
}

#[tokio::test]
async fn test_invalid_line_between_valid_lines_is_skipped() {
    let stream = decode_fixture("chat/stream_with_malformed.sse", 64, DeltaPrecedence::default());

    let (deltas, finished) = collect(stream).await;
    assert_eq!(texts(&deltas), vec!["first", "second"]);
    let metadata = finished.unwrap();
    assert_eq!(metadata.frames_skipped, 1);
    assert_eq!(metadata.deltas_emitted, 2);
}

#[tokio::test]
async fn test_reasoning_only_stream_surfaces_reasoning() {
    let stream = decode_fixture("chat/stream_reasoning_only.sse", 10, DeltaPrecedence::default());

    let (deltas, finished) = collect(stream).await;
    assert_eq!(
        deltas,
        vec![
            (DeltaKind::ReasoningSummary, "The document ".to_string()),
            (DeltaKind::ReasoningSummary, "has no total.".to_string()),
        ]
    );
    assert_eq!(finished.unwrap().deltas_emitted, 2);
}

#[tokio::test]
async fn test_reasoning_only_stream_with_output_only_precedence() {
    let stream = decode_fixture("chat/stream_reasoning_only.sse", 10, DeltaPrecedence::OutputTextOnly);

    let (deltas, finished) = collect(stream).await;
    assert!(deltas.is_empty());
    assert!(finished.is_some());
}

#[tokio::test]
async fn test_mixed_stream_emits_only_output_text() {
    let stream = decode_fixture("chat/stream_output.sse", 4096, DeltaPrecedence::default());

    let (deltas, finished) = collect(stream).await;
    assert!(deltas.iter().all(|(kind, _)| *kind == DeltaKind::OutputText));
    assert_eq!(texts(&deltas), vec!["The total is ", "42,00 € (über Netto)."]);

    let metadata = finished.unwrap();
    assert_eq!(metadata.conversation_id.as_deref(), Some("conv_abc"));
    assert_eq!(metadata.usage.and_then(|u| u.total_tokens), Some(1512));
}

#[tokio::test]
async fn test_done_sentinel_does_not_end_stream() {
    let (deltas, finished) = collect(decode(&[
        "data: {\"type\":\"response.output_text.delta\",\"delta\":\"a\"}\n",
        "data: [DONE]\n",
        "data: {\"type\":\"response.output_text.delta\",\"delta\":\"b\"}\n",
    ]))
    .await;
    assert_eq!(texts(&deltas), vec!["a", "b"]);
    assert!(finished.is_some());
}

#[tokio::test]
async fn test_consolidated_frame_and_ignored_lines() {
    let (deltas, finished) = collect(decode(&[
        ": keep-alive\n\nevent: message\nid: 7\ndata:{\"no\":\"space\"}\n",
        "data: {\"conversation_id\":\"c1\",\"output\":[{\"type\":\"message\",\"content\":[{\"text\":\"whole answer\"}]}]}\r\n",
    ]))
    .await;
    assert_eq!(deltas, vec![(DeltaKind::Consolidated, "whole answer".to_string())]);
    assert_eq!(finished.unwrap().conversation_id.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_empty_stream_finishes_with_no_deltas() {
    let (deltas, finished) = collect(decode(&[])).await;
    assert!(deltas.is_empty());
    assert_eq!(finished, Some(StreamMetadata::default()));
}

#[tokio::test]
async fn test_cancellation_stops_emission_and_releases_reader() {
    let transport = MockHttpTransport::new();
    transport.enqueue_stream_script(StreamScript::ChunksThenHang(vec![Bytes::from_static(
        b"data: {\"type\":\"response.output_text.delta\",\"delta\":\"partial\"}\n",
    )]));
    let response = transport.send_streaming(request()).await.unwrap();

    let cancel = CancellationToken::new();
    let mut stream = decode_chat_stream(response.body.unwrap(), cancel.clone(), DeltaPrecedence::default());

    let first = stream.next().await.unwrap().unwrap();
    assert!(matches!(first, ChatStreamEvent::Delta(ref d) if d.text == "partial"));
    assert!(!transport.body_dropped());

    cancel.cancel();
    assert!(stream.next().await.is_none());
    assert!(transport.body_dropped());
}

#[tokio::test]
async fn test_cancellation_while_waiting_for_read() {
    let transport = MockHttpTransport::new();
    transport.enqueue_stream_script(StreamScript::ChunksThenHang(Vec::new()));
    let response = transport.send_streaming(request()).await.unwrap();

    let cancel = CancellationToken::new();
    let mut stream = decode_chat_stream(response.body.unwrap(), cancel.clone(), DeltaPrecedence::default());

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            cancel.cancel();
        })
    };

    let next = tokio::time::timeout(std::time::Duration::from_secs(5), stream.next())
        .await
        .expect("stream should end after cancellation");
    assert!(next.is_none());
    assert!(transport.body_dropped());
    canceller.await.unwrap();
}

#[tokio::test]
async fn test_read_error_propagates_and_releases_reader() {
    let transport = MockHttpTransport::new();
    transport.enqueue_stream_script(StreamScript::Chunks(vec![
        Ok(Bytes::from_static(
            b"data: {\"type\":\"response.output_text.delta\",\"delta\":\"ok\"}\n",
        )),
        Err(TransportError::Request("connection reset".to_string())),
        Ok(Bytes::from_static(
            b"data: {\"type\":\"response.output_text.delta\",\"delta\":\"never\"}\n",
        )),
    ]));
    let response = transport.send_streaming(request()).await.unwrap();
    let mut stream = decode_chat_stream(
        response.body.unwrap(),
        CancellationToken::new(),
        DeltaPrecedence::default(),
    );

    assert!(matches!(stream.next().await, Some(Ok(ChatStreamEvent::Delta(_)))));
    match stream.next().await {
        Some(Err(DocAiError::Stream(StreamError::Transport { message, status }))) => {
            assert!(message.contains("connection reset"));
            assert_eq!(status, None);
        }
        other => panic!("unexpected item {:?}", other),
    }
    assert!(stream.next().await.is_none());
    assert!(transport.body_dropped());
}

#[tokio::test]
async fn test_delta_carries_frame_metadata() {
    let mut stream = decode(&[
        "data: {\"type\":\"response.output_text.delta\",\"delta\":\"x\",\"conversation_id\":\"c9\",\"usage\":{\"output_tokens\":1}}\n",
    ]);
    match stream.next().await {
        Some(Ok(ChatStreamEvent::Delta(delta))) => {
            assert_eq!(delta.conversation_id.as_deref(), Some("c9"));
            assert_eq!(delta.usage.and_then(|u| u.output_tokens), Some(1));
        }
        other => panic!("unexpected item {:?}", other),
    }
}
