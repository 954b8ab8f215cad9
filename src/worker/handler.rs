//! History worker: owns the query history and answers plugin requests.
//!
//! Runs on the thread Zellij spawns for registered workers, so file I/O never
//! blocks rendering.

use crate::domain::{OmniSearchError, RecentQuery, Result};
use crate::infrastructure::paths;
use crate::storage::{frecency, HistoryStore, JsonHistoryStore, QueryRecord};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker state. The store is opened lazily on the first message.
#[derive(Serialize, Deserialize, Default)]
pub struct HistoryWorker {
    #[serde(skip)]
    store: Option<Box<dyn HistoryStore>>,
}

impl HistoryWorker {
    /// Creates a worker backed by the history file in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be opened.
    pub fn new() -> Result<Self> {
        let store: Box<dyn HistoryStore> = Box::new(JsonHistoryStore::new(paths::history_file())?);
        Ok(Self { store: Some(store) })
    }

    /// Creates a worker over an explicit store.
    #[must_use]
    pub fn with_store(store: Box<dyn HistoryStore>) -> Self {
        Self { store: Some(store) }
    }

    fn get_store(&mut self) -> Result<&mut Box<dyn HistoryStore>> {
        self.store
            .as_mut()
            .ok_or_else(|| OmniSearchError::Worker("History not initialized".to_string()))
    }

    fn to_recent(record: QueryRecord) -> RecentQuery {
        RecentQuery {
            text: record.query,
            count: record.count,
            last_searched: record.last_searched,
        }
    }

    fn ranked(records: Vec<QueryRecord>, limit: usize) -> Vec<RecentQuery> {
        let now = chrono::Utc::now().timestamp();
        frecency::rank(records, now, limit)
            .into_iter()
            .map(Self::to_recent)
            .collect()
    }

    /// Standardizes logging and error mapping for storage results.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_history(&mut self, limit: usize) -> WorkerResponse {
        Self::handle_db_result(
            "load history",
            self.get_store().and_then(|store| store.all()),
            |records| {
                let entries = Self::ranked(records, limit);
                tracing::debug!(entry_count = entries.len(), "history loaded");
                WorkerResponse::HistoryLoaded { entries }
            },
        )
    }

    fn handle_record_query(&mut self, query: &str, limit: usize) -> WorkerResponse {
        let timestamp = chrono::Utc::now().timestamp();

        Self::handle_db_result(
            "record query",
            self.get_store().and_then(|store| {
                store.record(query, timestamp)?;
                store.all()
            }),
            |records| WorkerResponse::HistoryLoaded {
                entries: Self::ranked(records, limit),
            },
        )
    }

    fn handle_clear_history(&mut self) -> WorkerResponse {
        Self::handle_db_result(
            "clear history",
            self.get_store().and_then(|store| store.clear()),
            |()| WorkerResponse::HistoryCleared,
        )
    }

    /// Rebuilds the plugin-side span context so worker spans nest under it.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadHistory { limit, .. } => self.handle_load_history(limit),
            WorkerMessage::RecordQuery { query, limit, .. } => self.handle_record_query(&query, limit),
            WorkerMessage::ClearHistory { .. } => self.handle_clear_history(),
        }
    }
}

/// Set once the worker thread has installed its own subscriber.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for HistoryWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        if self.store.is_none() {
            match Self::new() {
                Ok(worker) => self.store = worker.store,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to open history");
                    let error_response = WorkerResponse::Error {
                        message: format!("Failed to open history: {e}"),
                    };
                    if let Ok(payload) = serde_json::to_string(&error_response) {
                        post_message_to_plugin(PluginMessage {
                            name: message,
                            payload,
                            worker_name: None,
                        });
                    }
                    return;
                }
            }
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn worker(dir: &TempDir) -> HistoryWorker {
        let store = JsonHistoryStore::new(dir.path().join("history.json")).unwrap();
        HistoryWorker::with_store(Box::new(store))
    }

    fn texts(response: &WorkerResponse) -> Vec<&str> {
        match response {
            WorkerResponse::HistoryLoaded { entries } => entries.iter().map(|e| e.text.as_str()).collect(),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn recording_returns_ranked_history() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);

        worker.handle_message(WorkerMessage::record_query("tokio".into(), 10));
        worker.handle_message(WorkerMessage::record_query("rust".into(), 10));
        let response = worker.handle_message(WorkerMessage::record_query("Rust".into(), 10));

        assert_eq!(texts(&response), ["Rust", "tokio"]);
    }

    #[test]
    fn load_respects_the_limit() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);
        for query in ["a", "b", "c"] {
            worker.handle_message(WorkerMessage::record_query(query.into(), 10));
        }

        let response = worker.handle_message(WorkerMessage::load_history(2));
        assert_eq!(texts(&response).len(), 2);
    }

    #[test]
    fn clear_then_load_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);
        worker.handle_message(WorkerMessage::record_query("a".into(), 10));

        assert_eq!(
            worker.handle_message(WorkerMessage::clear_history()),
            WorkerResponse::HistoryCleared
        );
        assert!(texts(&worker.handle_message(WorkerMessage::load_history(10))).is_empty());
    }

    #[test]
    fn uninitialized_worker_reports_an_error() {
        let mut worker = HistoryWorker::default();
        assert!(matches!(
            worker.handle_message(WorkerMessage::load_history(5)),
            WorkerResponse::Error { .. }
        ));
    }

    #[test]
    fn blank_query_surfaces_as_error_response() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);
        let response = worker.handle_message(WorkerMessage::record_query("  ".into(), 10));
        assert!(matches!(response, WorkerResponse::Error { message } if message.starts_with("record query")));
    }
}
