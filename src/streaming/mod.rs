//! Streaming support for document chat.
//!
//! The chat endpoint streams Server-Sent Events. Each `data: ` line carries a
//! JSON frame; the frames of interest are `response.output_text.delta`,
//! `response.reasoning_summary_text.delta`, and a consolidated frame with a
//! top-level `output` array. Malformed frames are skipped, never surfaced.
//!
//! ```rust,no_run
//! use integrations_docai::streaming::{decode_chat_stream, ChatAccumulator};
//! use integrations_docai::types::DeltaPrecedence;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(body: integrations_docai::transport::ChunkedStream) -> integrations_docai::DocAiResult<()> {
//! let stream = decode_chat_stream(body, CancellationToken::new(), DeltaPrecedence::default());
//! let message = ChatAccumulator::collect(stream).await?;
//! println!("{}", message.text);
//! # Ok(())
//! # }
//! ```

mod accumulator;
mod chat_stream;
mod decoder;
mod frame;

pub use accumulator::ChatAccumulator;
pub use chat_stream::{decode_chat_stream, ChatStream, ChatStreamDecoder};
pub use decoder::DecoderState;
pub use frame::{SseLine, StreamEvent};
