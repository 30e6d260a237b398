//! SSE line classification and per-frame field extraction.

use serde_json::Value;

use crate::types::{DeltaKind, Usage};

const OUTPUT_TEXT_DELTA: &str = "response.output_text.delta";
const REASONING_SUMMARY_DELTA: &str = "response.reasoning_summary_text.delta";
const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// A complete SSE line, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// Payload of a `data: ` line, trimmed.
    Data(&'a str),
    /// The `[DONE]` sentinel.
    Done,
    /// Blank, `event:`, comment or anything else.
    Ignored,
}

impl<'a> SseLine<'a> {
    /// Classifies one line.
    pub fn classify(line: &'a str) -> Self {
        match line.strip_prefix(DATA_PREFIX) {
            Some(payload) => match payload.trim() {
                DONE_SENTINEL => SseLine::Done,
                payload => SseLine::Data(payload),
            },
            None => SseLine::Ignored,
        }
    }
}

/// Fields of interest from one decoded `data:` frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamEvent {
    /// The frame's `type` tag.
    pub event_type: Option<String>,
    /// Extracted text and where it came from.
    pub text: Option<(DeltaKind, String)>,
    /// `usage` or `response.usage`.
    pub usage: Option<Usage>,
    /// `conversation_id`, `conversation` or `conversation.id`, top level or
    /// under `response`.
    pub conversation_id: Option<String>,
}

impl StreamEvent {
    /// Extracts the event from a parsed frame.
    pub fn from_value(frame: &Value) -> Self {
        let event_type = frame.get("type").and_then(Value::as_str);

        Self {
            event_type: event_type.map(str::to_string),
            text: extract_text(frame, event_type),
            usage: extract_usage(frame),
            conversation_id: conversation_id(frame)
                .or_else(|| frame.get("response").and_then(conversation_id)),
        }
    }
}

fn extract_text(frame: &Value, event_type: Option<&str>) -> Option<(DeltaKind, String)> {
    let delta = frame
        .get("delta")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty());

    match (event_type, delta) {
        (Some(OUTPUT_TEXT_DELTA), Some(d)) => Some((DeltaKind::OutputText, d.to_string())),
        (Some(REASONING_SUMMARY_DELTA), Some(d)) => Some((DeltaKind::ReasoningSummary, d.to_string())),
        _ => consolidated_text(frame).map(|t| (DeltaKind::Consolidated, t.to_string())),
    }
}

/// First content text of the first `message` item in a top-level `output`.
fn consolidated_text(frame: &Value) -> Option<&str> {
    frame
        .get("output")?
        .as_array()?
        .iter()
        .find(|item| item.get("type").and_then(Value::as_str) == Some("message"))?
        .get("content")?
        .get(0)?
        .get("text")?
        .as_str()
}

fn extract_usage(frame: &Value) -> Option<Usage> {
    let usage = frame
        .get("usage")
        .or_else(|| frame.get("response").and_then(|r| r.get("usage")))
        .filter(|u| u.is_object())?;
    serde_json::from_value(usage.clone()).ok()
}

fn conversation_id(value: &Value) -> Option<String> {
    if let Some(id) = value.get("conversation_id").and_then(Value::as_str) {
        return Some(id.to_string());
    }
    match value.get("conversation")? {
        Value::String(id) => Some(id.clone()),
        conversation => conversation.get("id").and_then(Value::as_str).map(str::to_string),
    }
}
