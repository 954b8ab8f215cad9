//! Background worker for the recent-query history.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: the worker and its message processing

pub mod handler;
pub mod messages;

pub use handler::HistoryWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
