//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the search core. All
//! decisions are made here; the runtime only translates host events in and
//! [`Action`]s out.
//!
//! ```text
//! Host Event → Event → handle_event → AppState / ViewController → Actions → Host Calls
//!                 ↑                                                    ↓
//!                 └────────── web results, timers, worker ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode
//! - [`state`]: Application state, canvas suggestions, view model computation
//! - [`view`]: Screen state machine (canvas, results, focus)

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod view;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, Suggestion, SuggestionSource, DEFAULT_HISTORY_LIMIT};
pub use view::{FocusView, ResultsView, SearchOutcome, ViewController, ViewState};
