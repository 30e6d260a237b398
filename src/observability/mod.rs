//! Logging for the document-AI client.
//!
//! Services take a [`Logger`] collaborator instead of writing to global
//! output. [`StructuredLogger`] forwards to `tracing`; install a subscriber
//! (e.g. `tracing-subscriber`) to see the events.

mod logging;

pub use logging::{Logger, NoopLogger, StructuredLogger};
