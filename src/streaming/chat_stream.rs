//! Chat stream decoding: bytes in, [`ChatStreamEvent`]s out.

use futures::{Stream, StreamExt};
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

use super::decoder::DecoderState;
use super::frame::{SseLine, StreamEvent};
use crate::error::{DocAiError, DocAiResult, StreamError};
use crate::transport::ChunkedStream;
use crate::types::{ChatDelta, ChatStreamEvent, DeltaKind, DeltaPrecedence, StreamMetadata};

/// Boxed stream of chat events.
pub type ChatStream = Pin<Box<dyn Stream<Item = DocAiResult<ChatStreamEvent>> + Send>>;

/// Synchronous core of the chat stream: feed chunks, collect deltas.
///
/// Output-text deltas are returned as soon as their line completes.
/// Reasoning-summary deltas are held until [`finish`](Self::finish) and only
/// released if no output text was seen. A consolidated `output` frame counts
/// as output text and is ignored once output-text deltas have started.
#[derive(Debug)]
pub struct ChatStreamDecoder {
    state: DecoderState,
    precedence: DeltaPrecedence,
    reasoning: Vec<ChatDelta>,
    output_seen: bool,
    metadata: StreamMetadata,
}

impl ChatStreamDecoder {
    /// Creates a decoder with the given precedence.
    pub fn new(precedence: DeltaPrecedence) -> Self {
        Self {
            state: DecoderState::new(),
            precedence,
            reasoning: Vec::new(),
            output_seen: false,
            metadata: StreamMetadata::default(),
        }
    }

    /// Feeds a chunk, returning deltas ready for emission.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ChatDelta> {
        let mut out = Vec::new();
        for line in self.state.push(chunk) {
            self.process_line(&line, &mut out);
        }
        out
    }

    /// Flushes a trailing unterminated line and any reasoning fallback.
    pub fn finish(mut self) -> (Vec<ChatDelta>, StreamMetadata) {
        let mut out = Vec::new();
        if let Some(line) = self.state.finish() {
            self.process_line(&line, &mut out);
        }

        if !self.output_seen && !self.reasoning.is_empty() {
            tracing::debug!(
                deltas = self.reasoning.len(),
                "no output text in stream, surfacing reasoning summary"
            );
            self.metadata.deltas_emitted += self.reasoning.len();
            out.append(&mut self.reasoning);
        }

        (out, self.metadata)
    }

    fn process_line(&mut self, line: &str, out: &mut Vec<ChatDelta>) {
        let payload = match SseLine::classify(line) {
            SseLine::Data(payload) => payload,
            SseLine::Done => {
                tracing::trace!("end-of-data sentinel");
                return;
            }
            SseLine::Ignored => return,
        };

        let frame = match serde_json::from_str::<serde_json::Value>(payload) {
            Ok(frame) => frame,
            Err(e) => {
                self.metadata.frames_skipped += 1;
                tracing::debug!(error = %e, payload_len = payload.len(), "skipping malformed SSE frame");
                return;
            }
        };

        let event = StreamEvent::from_value(&frame);
        if event.usage.is_some() {
            self.metadata.usage.clone_from(&event.usage);
        }
        if event.conversation_id.is_some() {
            self.metadata.conversation_id.clone_from(&event.conversation_id);
        }

        let Some((kind, text)) = event.text else {
            return;
        };
        let delta = ChatDelta {
            text,
            kind,
            usage: event.usage,
            conversation_id: event.conversation_id,
        };

        match kind {
            DeltaKind::OutputText => {
                self.output_seen = true;
                self.reasoning.clear();
            }
            DeltaKind::Consolidated if self.output_seen => return,
            DeltaKind::Consolidated => {
                self.output_seen = true;
                self.reasoning.clear();
            }
            DeltaKind::ReasoningSummary => {
                if self.precedence == DeltaPrecedence::OutputTextWithReasoningFallback && !self.output_seen {
                    self.reasoning.push(delta);
                }
                return;
            }
        }

        self.metadata.deltas_emitted += 1;
        out.push(delta);
    }
}

enum Read {
    Cancelled,
    Item(Option<Result<bytes::Bytes, crate::transport::TransportError>>),
}

/// Decodes an SSE body into chat events.
///
/// Ends with [`ChatStreamEvent::Finished`] when the body is exhausted. On
/// cancellation the body is dropped and the stream ends without `Finished`.
/// A read error is yielded once, after which the stream ends.
pub fn decode_chat_stream(
    body: ChunkedStream,
    cancel: CancellationToken,
    precedence: DeltaPrecedence,
) -> ChatStream {
    Box::pin(async_stream::stream! {
        let mut body = body;
        let mut decoder = ChatStreamDecoder::new(precedence);

        loop {
            let read = tokio::select! {
                biased;
                () = cancel.cancelled() => Read::Cancelled,
                item = body.next() => Read::Item(item),
            };

            match read {
                Read::Cancelled => {
                    tracing::debug!("chat stream cancelled");
                    drop(body);
                    return;
                }
                Read::Item(Some(Ok(chunk))) => {
                    for delta in decoder.feed(&chunk) {
                        if cancel.is_cancelled() {
                            drop(body);
                            return;
                        }
                        yield Ok(ChatStreamEvent::Delta(delta));
                    }
                }
                Read::Item(Some(Err(e))) => {
                    drop(body);
                    tracing::debug!(error = %e, "chat stream read failed");
                    yield Err(DocAiError::Stream(StreamError::Transport {
                        message: e.to_string(),
                        status: None,
                    }));
                    return;
                }
                Read::Item(None) => break,
            }
        }

        drop(body);
        let (deltas, metadata) = decoder.finish();
        for delta in deltas {
            if cancel.is_cancelled() {
                return;
            }
            yield Ok(ChatStreamEvent::Delta(delta));
        }
        tracing::debug!(
            deltas = metadata.deltas_emitted,
            skipped = metadata.frames_skipped,
            "chat stream finished"
        );
        yield Ok(ChatStreamEvent::Finished(metadata));
    })
}
