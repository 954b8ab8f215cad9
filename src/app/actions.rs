//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns a `Vec<Action>` and the
//! plugin shim performs each one in order: HTTP through `web_request`, timers
//! through `set_timeout`, URLs through `run_command`.

use crate::service::ServiceRequest;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Performs an HTTP request; the answer comes back as a
    /// `SearchResponded` or `TrendingResponded` event.
    Request(ServiceRequest),

    /// Asks for a `Tick` event after `after_ms` milliseconds.
    ArmTimeout { after_ms: u64 },

    /// Opens a URL with the host's default handler.
    OpenUrl { url: String },

    /// Posts a message to the history worker.
    PostToWorker(WorkerMessage),
}
