//! Structured, leveled logging.

use serde_json::Value;

use crate::config::LogLevel;

const REDACTED: &str = "***REDACTED***";
const SENSITIVE_KEYS: [&str; 8] = [
    "api_key",
    "apikey",
    "token",
    "access_token",
    "secret",
    "password",
    "authorization",
    "credential",
];

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Logger that emits `tracing` events, filtered by level, with sensitive keys
/// redacted.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger with the given name.
    ///
    /// ```
    /// use integrations_docai::observability::StructuredLogger;
    ///
    /// let logger = StructuredLogger::new("docai.chat");
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum level emitted.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Logger name, recorded on every event.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level.rank() <= self.level.rank()
    }
}

/// Replaces values of sensitive keys, recursing into objects and arrays.
pub(crate) fn redact(mut fields: Value) -> Value {
    match &mut fields {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                if SENSITIVE_KEYS.contains(&key.to_ascii_lowercase().as_str()) {
                    *value = Value::String(REDACTED.to_string());
                } else {
                    *value = redact(std::mem::take(value));
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                *item = redact(std::mem::take(item));
            }
        }
        _ => {}
    }
    fields
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Debug) {
            tracing::debug!(logger = %self.name, fields = %redact(fields), "{}", message);
        }
    }

    fn info(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Info) {
            tracing::info!(logger = %self.name, fields = %redact(fields), "{}", message);
        }
    }

    fn warn(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Warn) {
            tracing::warn!(logger = %self.name, fields = %redact(fields), "{}", message);
        }
    }

    fn error(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Error) {
            tracing::error!(logger = %self.name, fields = %redact(fields), "{}", message);
        }
    }
}

impl<L: Logger + ?Sized> Logger for std::sync::Arc<L> {
    fn debug(&self, message: &str, fields: Value) {
        (**self).debug(message, fields);
    }

    fn info(&self, message: &str, fields: Value) {
        (**self).info(message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        (**self).warn(message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        (**self).error(message, fields);
    }
}

/// Logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redacts_nested_and_case_insensitive() {
        let fields = json!({
            "Authorization": "Bearer abc",
            "request": {"api_key": "k", "model": "document-chat"},
            "items": [{"token": "t"}]
        });
        assert_eq!(
            redact(fields),
            json!({
                "Authorization": REDACTED,
                "request": {"api_key": REDACTED, "model": "document-chat"},
                "items": [{"token": REDACTED}]
            })
        );
    }

    #[test]
    fn test_level_filter() {
        let logger = StructuredLogger::new("test").with_level(LogLevel::Warn);
        assert!(logger.enabled(LogLevel::Error));
        assert!(logger.enabled(LogLevel::Warn));
        assert!(!logger.enabled(LogLevel::Info));
        assert!(!logger.enabled(LogLevel::Debug));
    }
}
