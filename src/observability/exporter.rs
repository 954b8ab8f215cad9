//! Span export to a size-capped JSON-lines file.
//!
//! Every finished span becomes one flat JSON object on its own line:
//!
//! ```json
//! {"service":"OmniSearch","trace_id":"…","span_id":"…","parent_span_id":"…",
//!  "name":"handle_event","start_unix_ms":1700000000000,"duration_us":412,
//!  "attributes":{"event_type":"Submit"},"events":[],"status":"unset"}
//! ```
//!
//! When the file grows past [`MAX_FILE_SIZE_BYTES`] it is moved to
//! `<name>.1`, replacing any previous backup.

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size past which the trace file is rotated (5 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Append-only line writer keeping a single `.1` backup.
pub struct RotatingFile {
    path: PathBuf,
    limit: u64,
    file: Mutex<Option<fs::File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, limit: u64) -> Self {
        Self {
            path,
            limit,
            file: Mutex::new(None),
        }
    }

    /// Path of the rotated backup, e.g. `traces.jsonl.1`.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".1");
        self.path.with_file_name(name)
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, or an error if the lock is poisoned.
    pub fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.limit) {
            *file = None;
            fs::rename(&self.path, self.backup_path())?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "No file available"))?;

        writeln!(handle, "{line}")?;
        handle.flush()
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// `SpanExporter` writing one JSON line per span.
#[derive(Debug)]
pub struct FileSpanExporter {
    writer: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    #[must_use]
    pub fn new(path: PathBuf, service: impl Into<String>) -> Self {
        Self {
            writer: RotatingFile::new(path, MAX_FILE_SIZE_BYTES),
            service: service.into(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn span_line(&self, span: &SpanData) -> JsonValue {
        let parent = if span.parent_span_id == SpanId::INVALID {
            JsonValue::Null
        } else {
            json!(format!("{:016x}", span.parent_span_id))
        };

        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "unix_ms": unix_ms(event.timestamp),
                    "attributes": attributes(&event.attributes),
                })
            })
            .collect();

        json!({
            "service": self.service,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent,
            "name": span.name,
            "start_unix_ms": unix_ms(span.start_time),
            "duration_us": duration_us,
            "attributes": attributes(&span.attributes),
            "events": events,
            "status": status(&span.status),
        })
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.writer.append_line(&self.span_line(span).to_string()))
            .map_err(|e| TraceError::from(e.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

/// Builds a tracer provider that exports synchronously to `path`.
#[must_use]
pub fn file_tracer_provider(path: PathBuf, service: &'static str) -> TracerProvider {
    let resource = Resource::new(vec![KeyValue::new("service.name", service)]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(FileSpanExporter::new(path, service))
        .build()
}

fn unix_ms(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

fn attributes(pairs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = pairs
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        _ => json!(value.as_str()),
    }
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rotates_into_a_single_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("traces.jsonl");
        let writer = RotatingFile::new(path.clone(), 16);

        writer.append_line("first line here").unwrap();
        assert!(!writer.backup_path().exists());

        writer.append_line("second").unwrap();
        writer.append_line("third").unwrap();

        assert!(writer.backup_path().exists());
        assert_eq!(fs::read_to_string(writer.backup_path()).unwrap(), "first line here\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\nthird\n");
    }

    #[test]
    fn backup_name_appends_suffix() {
        let writer = RotatingFile::new(PathBuf::from("/data/omnisearch-traces.jsonl"), 1);
        assert_eq!(writer.backup_path(), PathBuf::from("/data/omnisearch-traces.jsonl.1"));
    }

    #[test]
    fn attributes_keep_their_json_types() {
        let value = attributes(&[
            KeyValue::new("ticket", 7_i64),
            KeyValue::new("searching", true),
            KeyValue::new("query", "rust"),
        ]);
        assert_eq!(value, json!({ "ticket": 7, "searching": true, "query": "rust" }));
    }

    #[test]
    fn error_status_carries_its_description() {
        assert_eq!(status(&Status::error("boom")), json!({ "error": "boom" }));
        assert_eq!(status(&Status::Ok), json!("ok"));
    }
}
