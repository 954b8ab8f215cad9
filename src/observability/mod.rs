//! Tracing with OpenTelemetry span export to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider → FileSpanExporter → omnisearch-traces.jsonl
//! ```
//!
//! The sandbox has no collector to talk to, so spans are written as JSON
//! lines next to the history file and rotated at 5 MiB. Worker messages carry
//! a [`TraceContext`](crate::worker::TraceContext) so spans from the history
//! worker join the plugin's trace.
//!
//! # Modules
//!
//! - [`init`]: subscriber installation
//! - [`exporter`]: span exporter and rotating writer

pub mod exporter;
mod init;

pub use init::{init_tracing, SERVICE_NAME};
