//! Worker thread message types for cross-thread communication.
//!
//! Defines the request and response protocol between the plugin and the
//! history worker, plus the trace context that lets worker spans join the
//! plugin's trace.

use crate::domain::RecentQuery;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use omnisearch::worker::TraceContext;
    ///
    /// let context = TraceContext::from_current();
    /// if let Some(ctx) = context {
    ///     println!("Trace ID: {}", ctx.trace_id);
    /// }
    /// ```
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::debug!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            tracing::debug!("span context is not valid");
            None
        }
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_history(LoadHistory { limit: usize }),
    record_query(RecordQuery { query: String, limit: usize }),
    clear_history(ClearHistory {}),
}

/// Messages sent from the plugin to the history worker.
///
/// Every variant carries an optional trace context for span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Return the `limit` best-ranked recent queries.
    LoadHistory {
        limit: usize,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Record a delivered search, then return the refreshed history.
    RecordQuery {
        /// Query text as submitted.
        query: String,

        /// How many entries to return.
        limit: usize,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Forget every recorded query.
    ClearHistory {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadHistory { trace_context, .. }
            | Self::RecordQuery { trace_context, .. }
            | Self::ClearHistory { trace_context } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Recent queries in frecency order.
    HistoryLoaded { entries: Vec<RecentQuery> },

    /// The history file was emptied.
    HistoryCleared,

    /// An error occurred during the worker operation.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_survive_the_json_hop() {
        let message = WorkerMessage::record_query("rust".to_string(), 20);
        let payload = serde_json::to_string(&message).unwrap();
        let back: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn missing_trace_context_is_omitted() {
        let message = WorkerMessage::ClearHistory { trace_context: None };
        let payload = serde_json::to_string(&message).unwrap();
        assert_eq!(payload, r#"{"ClearHistory":{}}"#);
        assert!(message.trace_context().is_none());
    }
}
