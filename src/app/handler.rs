//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that happens to
//! the plugin: keystrokes already mapped to intents by the shim, web request
//! results, timer ticks, and worker responses. It mutates [`AppState`] and
//! returns the side effects to perform as [`Action`]s.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`, `Escape`
//! - **Navigation**: `KeyDown`, `KeyUp`, `Back`, `OpenResult`, `OpenQueryBar`
//! - **Filtering**: `ToggleFilter`
//! - **Search lifecycle**: `SearchResponded`, `Tick`
//! - **Start-up**: `PermissionsGranted`, `TrendingResponded`
//! - **Worker**: `WorkerResponse`, `ClearHistory`
//!
//! # Example
//!
//! ```
//! use omnisearch::app::{handle_event, Action, AppState, Event};
//! use omnisearch::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! for c in "rust".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (render, actions) = handle_event(&mut state, &Event::Submit { now_ms: 0 })?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Request(_)));
//! assert_eq!(actions[1], Action::ArmTimeout { after_ms: 15_000 });
//! # Ok::<(), omnisearch::domain::OmniSearchError>(())
//! ```

use super::modes::InputMode;
use super::view::{SearchOutcome, ViewState};
use crate::app::{Action, AppState};
use crate::domain::error::{OmniSearchError, Result};
use crate::search::{FilterToggle, Ticket};
use crate::service::{decode_search_response, decode_trending, RequestContext};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the input.
    Char(char),
    /// Removes the last character of the input.
    Backspace,
    /// Enter: searches from the canvas or the query bar, opens the
    /// highlighted result on the results screen.
    Submit {
        /// Host time in milliseconds.
        now_ms: u64,
    },
    /// Moves the suggestion or result cursor down (wraps to top).
    KeyDown,
    /// Moves the suggestion or result cursor up (wraps to bottom).
    KeyUp,
    /// Cancels whatever is innermost: the search in flight, the query bar,
    /// the focus screen, then the canvas input. Hides the plugin once there
    /// is nothing left to cancel.
    Escape,
    /// Returns from focus to results.
    Back,
    /// Applies a filter chip.
    ToggleFilter(FilterToggle),
    /// Opens the new-query bar over results or focus.
    OpenQueryBar,
    /// Opens the focused result's URL on the host.
    OpenResult,
    /// Hides the plugin pane.
    CloseFocus,
    /// Forgets every recent query.
    ClearHistory,

    /// The search request sent under `ticket` finished.
    ///
    /// Transport errors arrive here too, as a non-2xx `status`.
    SearchResponded { ticket: Ticket, status: u16, body: Vec<u8> },

    /// The trending-topics request finished.
    TrendingResponded { status: u16, body: Vec<u8> },

    /// Timer fired; checks the in-flight search against its deadline.
    Tick {
        /// Host time in milliseconds.
        now_ms: u64,
    },

    /// Wraps a response from the history worker.
    WorkerResponse(WorkerResponse),

    /// Web, filesystem and command permissions were granted.
    PermissionsGranted,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the state changed in a way that needs a
/// re-render.
///
/// # Errors
///
/// Returns [`OmniSearchError::EmptyQuery`] when a blank query is submitted,
/// [`OmniSearchError::InvalidTransition`] when the event makes no sense on the
/// current screen, and encoding errors from building the search request. The
/// state is left untouched in each case.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }

            let mut input = std::mem::take(&mut state.input);
            input.push(*c);
            state.set_input(input);

            tracing::trace!(input = %state.input, char = %c, "input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }

            let mut input = std::mem::take(&mut state.input);
            input.pop();
            state.set_input(input);
            Ok((true, vec![]))
        }
        Event::Submit { now_ms } => match (state.view.state(), state.input_mode) {
            (ViewState::Results(_), InputMode::Browsing) => {
                state.view.select_current()?;
                Ok((true, vec![]))
            }
            (ViewState::Focus(_), InputMode::Browsing) => Ok((false, vec![])),
            _ => submit_search(state, *now_ms),
        },
        Event::KeyDown | Event::KeyUp => {
            let down = matches!(event, Event::KeyDown);
            match state.view.state() {
                ViewState::Canvas if down => state.move_suggestion_down(),
                ViewState::Canvas => state.move_suggestion_up(),
                ViewState::Results(_) => {
                    state.view.move_cursor(down);
                }
                ViewState::Focus(_) => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }
        Event::Escape => handle_escape(state),
        Event::Back => {
            state.view.back()?;
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::ToggleFilter(toggle) => {
            state.view.change_filter(*toggle)?;
            Ok((true, vec![]))
        }
        Event::OpenQueryBar => {
            if matches!(state.view.state(), ViewState::Canvas) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Typing;
            state.set_input(String::new());
            Ok((true, vec![]))
        }
        Event::OpenResult => {
            let ViewState::Focus(focus) = state.view.state() else {
                return Err(OmniSearchError::InvalidTransition {
                    transition: "open a result",
                    state: state.view.state().name(),
                });
            };
            let url = focus.result().url.clone();
            tracing::debug!(url = %url, "opening result");
            Ok((false, vec![Action::OpenUrl { url }]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::ClearHistory => Ok((false, vec![Action::PostToWorker(WorkerMessage::clear_history())])),
        Event::SearchResponded { ticket, status, body } => {
            let decoded = decode_search_response(*status, body);
            let outcome = state.view.complete_search(*ticket, decoded);
            Ok(apply_outcome(state, outcome))
        }
        Event::Tick { now_ms } => {
            if let Some(outcome) = state.view.expire_search(*now_ms) {
                return Ok(apply_outcome(state, outcome));
            }

            // Ticks armed by superseded searches land early; wait out the rest.
            match state.view.dispatcher().deadline_ms() {
                Some(deadline) => Ok((
                    false,
                    vec![Action::ArmTimeout {
                        after_ms: deadline.saturating_sub(*now_ms).max(1),
                    }],
                )),
                None => Ok((false, vec![])),
            }
        }
        Event::TrendingResponded { status, body } => match decode_trending(*status, body) {
            Ok(topics) if !topics.is_empty() => {
                tracing::debug!(topic_count = topics.len(), "trending topics loaded");
                state.topics = topics;
                state.suggestion_cursor = None;
                Ok((true, vec![]))
            }
            Ok(_) => {
                tracing::debug!("trending response was empty, keeping built-in topics");
                Ok((false, vec![]))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load trending topics");
                Ok((false, vec![]))
            }
        },
        Event::WorkerResponse(response) => match response {
            WorkerResponse::HistoryLoaded { entries } => {
                if &state.history == entries {
                    tracing::debug!("history unchanged, skipping render");
                    return Ok((false, vec![]));
                }
                state.history.clone_from(entries);
                state.suggestion_cursor = None;
                Ok((true, vec![]))
            }
            WorkerResponse::HistoryCleared => {
                state.history.clear();
                state.suggestion_cursor = None;
                Ok((true, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::warn!(message = %message, "history worker error");
                Ok((false, vec![]))
            }
        },
        Event::PermissionsGranted => {
            let mut actions = vec![Action::PostToWorker(WorkerMessage::load_history(state.history_limit))];
            if state.fetch_trending {
                actions.push(Action::Request(state.endpoint.trending_request()));
            }
            Ok((false, actions))
        }
    }
}

/// Dispatches the highlighted suggestion, or the typed input.
fn submit_search(state: &mut AppState, now_ms: u64) -> Result<(bool, Vec<Action>)> {
    let raw = match (state.view.state(), state.selected_suggestion()) {
        (ViewState::Canvas, Some(suggestion)) => suggestion.text,
        _ => state.input.clone(),
    };

    let pending = state.view.search(&raw, now_ms)?;
    let request = state.endpoint.search_request(
        &pending.request,
        RequestContext::Search {
            ticket: pending.ticket,
        },
    )?;
    let after_ms = state.view.dispatcher().settings().timeout_secs.saturating_mul(1000);

    tracing::debug!(ticket = pending.ticket, query = %pending.query, "search submitted");
    state.banner = None;

    Ok((true, vec![Action::Request(request), Action::ArmTimeout { after_ms }]))
}

fn handle_escape(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if let Some(ticket) = state.view.cancel_search() {
        tracing::debug!(ticket = ticket, "search cancelled by user");
        return Ok((true, vec![]));
    }

    match state.view.state() {
        ViewState::Canvas if state.input.is_empty() => Ok((false, vec![Action::CloseFocus])),
        ViewState::Canvas => {
            state.set_input(String::new());
            Ok((true, vec![]))
        }
        _ if state.input_mode == InputMode::Typing => {
            state.input_mode = InputMode::Browsing;
            state.set_input(String::new());
            Ok((true, vec![]))
        }
        ViewState::Focus(_) => {
            state.view.back()?;
            Ok((true, vec![]))
        }
        ViewState::Results(_) => Ok((false, vec![])),
    }
}

fn apply_outcome(state: &mut AppState, outcome: SearchOutcome) -> (bool, Vec<Action>) {
    match outcome {
        SearchOutcome::Stale => (false, vec![]),
        SearchOutcome::Installed { query, fallback } => {
            state.input_mode = InputMode::Browsing;
            state.set_input(String::new());

            match fallback {
                None => {
                    state.banner = None;
                    let record = WorkerMessage::record_query(query.into_string(), state.history_limit);
                    (true, vec![Action::PostToWorker(record)])
                }
                Some(failure) => {
                    tracing::warn!(query = %query, failure = %failure, "search failed, showing fallback links");
                    state.banner = Some(format!("{failure}; showing fallback links"));
                    (true, vec![])
                }
            }
        }
        SearchOutcome::Failed { query, failure } => {
            tracing::warn!(query = %query, failure = %failure, "search failed");
            state.banner = Some(failure.to_string());
            (true, vec![])
        }
    }
}
