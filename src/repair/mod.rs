//! Lenient parsing of `response_format` schema strings.
//!
//! User- and model-authored schema strings are frequently almost-JSON: a stray
//! closing brace, a missing one, a zero-width space pasted from a web page.
//! [`repair_response_format`] escalates through progressively more invasive
//! fixes and stops at the first one that parses:
//!
//! 1. cleansing (always applied)
//! 2. direct parse
//! 3. whitespace compression
//! 4. brace/bracket balancing
//! 5. pattern fixes
//!
//! If none parse, the untouched input is handed back as
//! [`RepairOutcome::Fallback`]. [`parse_response_format`] layers required-field
//! validation on top and is what the services call.

mod stages;

pub use stages::cleanse;

use serde_json::Value;

use crate::error::{DocAiError, DocAiResult, SchemaStage};
use crate::types::ResponseFormat;

/// Result of running the repair stages over a string.
#[derive(Debug, Clone, PartialEq)]
pub enum RepairOutcome {
    /// A stage produced valid JSON.
    Repaired {
        /// The parsed value.
        value: Value,
        /// The stage whose output parsed.
        stage: SchemaStage,
    },
    /// Nothing parsed. Holds the original, unmodified input.
    Fallback(String),
}

impl RepairOutcome {
    /// The stage that produced the value, or `Fallback`.
    pub fn stage(&self) -> SchemaStage {
        match self {
            RepairOutcome::Repaired { stage, .. } => *stage,
            RepairOutcome::Fallback(_) => SchemaStage::Fallback,
        }
    }

    /// The repaired value, if any stage succeeded.
    pub fn into_value(self) -> Option<Value> {
        match self {
            RepairOutcome::Repaired { value, .. } => Some(value),
            RepairOutcome::Fallback(_) => None,
        }
    }
}

/// Runs the repair stages in order and returns the first successful parse.
///
/// Deterministic, and idempotent over its own output: feeding the serialized
/// value back in parses on the direct stage to the same value.
pub fn repair_response_format(input: &str) -> RepairOutcome {
    let mut candidate = cleanse(input);
    tracing::debug!(
        input_len = input.len(),
        cleansed_len = candidate.len(),
        "repairing response format"
    );

    for stage in [
        SchemaStage::Direct,
        SchemaStage::Compressed,
        SchemaStage::Balanced,
        SchemaStage::PatternFixed,
    ] {
        candidate = match stage {
            SchemaStage::Compressed => stages::compress(&candidate),
            SchemaStage::Balanced => stages::balance(&candidate),
            SchemaStage::PatternFixed => stages::fix_patterns(&candidate),
            _ => candidate,
        };

        match serde_json::from_str::<Value>(&candidate) {
            Ok(value) => {
                tracing::debug!(%stage, candidate_len = candidate.len(), "response format parsed");
                return RepairOutcome::Repaired { value, stage };
            }
            Err(e) => {
                tracing::trace!(%stage, error = %e, "repair stage did not parse");
            }
        }
    }

    tracing::debug!("all repair stages failed, returning original input");
    RepairOutcome::Fallback(input.to_string())
}

/// Repairs and validates a `response_format` string.
///
/// Fails with `SchemaError::InvalidSchemaFormat` when nothing parses or the
/// parsed value lacks `type == "json_schema"` or a `json_schema` object with
/// `name` and `schema`.
pub fn parse_response_format(input: &str) -> DocAiResult<ResponseFormat> {
    let value = match repair_response_format(input) {
        RepairOutcome::Repaired { value, .. } => value,
        RepairOutcome::Fallback(original) => match serde_json::from_str::<Value>(&original) {
            Ok(value) => value,
            Err(e) => {
                return Err(DocAiError::invalid_schema(
                    SchemaStage::Fallback,
                    format!("unable to repair response format: {}", e),
                    Some(byte_offset(&original, e.line(), e.column())),
                ));
            }
        },
    };

    validate(value)
}

/// Validates an already-parsed value as a `ResponseFormat`.
pub fn validate(value: Value) -> DocAiResult<ResponseFormat> {
    let invalid = |message: String| DocAiError::invalid_schema(SchemaStage::Validation, message, None);

    let object = value
        .as_object()
        .ok_or_else(|| invalid("response format must be a JSON object".to_string()))?;

    match object.get("type") {
        None => return Err(invalid("missing field `type`".to_string())),
        Some(Value::String(t)) if t == "json_schema" => {}
        Some(other) => {
            return Err(invalid(format!(
                "unsupported type {}, expected \"json_schema\"",
                other
            )))
        }
    }

    let schema = match object.get("json_schema") {
        None => return Err(invalid("missing field `json_schema`".to_string())),
        Some(Value::Object(schema)) => schema,
        Some(_) => return Err(invalid("`json_schema` must be an object".to_string())),
    };
    if !schema.get("schema").is_some_and(Value::is_object) {
        return Err(invalid("`json_schema.schema` must be an object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
}

/// Parses a JSON document whose only damage may be missing or surplus
/// trailing closers, as in truncated model output.
///
/// Only closers are touched, so string contents reach the caller unchanged.
/// Returns the value and whether closers had to be adjusted, or `None` if
/// the input still does not parse.
pub fn parse_with_closers(input: &str) -> Option<(Value, bool)> {
    let trimmed = input.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some((value, false));
    }

    let balanced = stages::balance(trimmed);
    match serde_json::from_str::<Value>(&balanced) {
        Ok(value) => Some((value, true)),
        Err(e) => {
            tracing::trace!(error = %e, "closer balancing did not parse");
            None
        }
    }
}

/// Converts serde_json's 1-based line/column into a byte offset.
fn byte_offset(input: &str, line: usize, column: usize) -> usize {
    let line_start: usize = input
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closer_parse_keeps_string_whitespace() {
        let (value, adjusted) =
            parse_with_closers("{\"address\": \"Main St. , Berlin\",\n \"note\": \"a : b\"").unwrap();
        assert!(adjusted);
        assert_eq!(value, json!({"address": "Main St. , Berlin", "note": "a : b"}));
    }

    #[test]
    fn test_closer_parse_valid_input_untouched() {
        let (value, adjusted) = parse_with_closers("  {\"a\": \" x \"}\n").unwrap();
        assert!(!adjusted);
        assert_eq!(value, json!({"a": " x "}));
    }

    #[test]
    fn test_closer_parse_gives_up_on_prose() {
        assert!(parse_with_closers("The total is 42.").is_none());
    }

    #[test]
    fn test_direct_stage_for_valid_input() {
        let outcome = repair_response_format(r#"{"type":"json_schema","json_schema":{"name":"x","schema":{}}}"#);
        assert_eq!(outcome.stage(), SchemaStage::Direct);
    }

    #[test]
    fn test_compressed_stage_handles_raw_newline_in_string() {
        let outcome = repair_response_format("{\"a\":\"line one\nline two\"}");
        assert_eq!(outcome.stage(), SchemaStage::Compressed);
        assert_eq!(outcome.into_value(), Some(json!({"a": "line one line two"})));
    }

    #[test]
    fn test_fallback_returns_original() {
        let input = "  not json at all \u{200B}";
        assert_eq!(
            repair_response_format(input),
            RepairOutcome::Fallback(input.to_string())
        );
    }

    #[test]
    fn test_byte_offset_multiline() {
        assert_eq!(byte_offset("ab\ncd", 2, 2), 4);
        assert_eq!(byte_offset("ab", 1, 0), 0);
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let err = validate(json!({"type": "text", "json_schema": {"name": "x", "schema": {}}})).unwrap_err();
        assert!(err.to_string().contains("unsupported type"));
    }

    #[test]
    fn test_validate_requires_schema_object() {
        let err = validate(json!({"type": "json_schema", "json_schema": {"name": "x", "schema": []}})).unwrap_err();
        assert!(err.to_string().contains("json_schema.schema"));
    }
}
