//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the OmniSearch library and the
//! Zellij plugin system. It implements `ZellijPlugin` and registers the
//! history worker; everything else happens in the library.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Zellij Main Thread      │
//! │  ┌────────────────────────┐  │       web_request
//! │  │     State (plugin)     │──┼────────────────────▶ aggregation service
//! │  └────────────────────────┘  │◀─────────────────── WebRequestResult
//! │              │ IPC           │
//! │              ▼               │
//! │  ┌────────────────────────┐  │
//! │  │ HistoryWorker (thread) │  │  ← history.json
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: once granted, load history and trending topics
//! 3. **Update**: map host events to library events, execute the returned actions
//! 4. **Render**: call the library renderer
//!
//! # Keybindings
//!
//! Everywhere:
//! - `Up`/`Down`, `Ctrl+p`/`Ctrl+n`: move
//! - `Enter`: search, or open the highlighted result
//! - `Esc`: cancel the search in flight, close the query bar, leave focus,
//!   clear the input, then hide the plugin
//!
//! On the canvas everything else is typed; `Ctrl+x` clears the history.
//!
//! On results (while not typing):
//! - `j`/`k`: move
//! - `0`/`a`: show all kinds; `1`-`4`: toggle code, videos, papers, datasets
//! - `/`: new query; `q`: hide
//!
//! On focus (while not typing):
//! - `h`/`Backspace`: back to results; `o`: open the URL; `/`: new query; `q`: hide

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Duration;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use omnisearch::search::FilterToggle;
use omnisearch::service::{Method, RequestContext, ServiceRequest};
use omnisearch::worker::{HistoryWorker, WorkerMessage, WorkerResponse};
use omnisearch::{handle_event, Action, Config, ContentKind, Event, InputMode, ViewState};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(HistoryWorker, history_worker, HISTORY_WORKER);

/// Plugin state wrapper.
struct State {
    /// Core application state from the library layer.
    app: omnisearch::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: omnisearch::initialize(&Config::default()),
            worker_name: "history".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the state, requests permissions and
    /// subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: search and trending requests
    /// - `FullHdAccess`: the history file under `/host`
    /// - `RunCommands`: `xdg-open` for result URLs
    /// - `ChangeApplicationState`: hiding the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        omnisearch::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(service_url = %config.service_url, on_failure = ?config.on_failure, "parsed configuration");
        self.app = omnisearch::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::FullHdAccess,
            PermissionType::RunCommands,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a host event, delegates to `handle_event`, and executes the
    /// resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick { now_ms: now_ms() },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => match permissions {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted");
                    Event::PermissionsGranted
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - searches and history unavailable");
                    return false;
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        omnisearch::ui::render(&self.app, rows, cols);
    }
}

/// Host wall-clock time in milliseconds.
fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current screen
    /// and input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        let on_canvas = matches!(self.app.view.state(), ViewState::Canvas);

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('x') if on_canvas => Some(Event::ClearHistory),
                _ => None,
            };
        }

        match key.bare_key {
            BareKey::Esc => return Some(Event::Escape),
            BareKey::Down => return Some(Event::KeyDown),
            BareKey::Up => return Some(Event::KeyUp),
            BareKey::Enter => return Some(Event::Submit { now_ms: now_ms() }),
            _ => {}
        }

        if self.app.input_mode == InputMode::Typing {
            return match key.bare_key {
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            };
        }

        match (self.app.view.state(), key.bare_key) {
            (_, BareKey::Char('/')) => Some(Event::OpenQueryBar),
            (_, BareKey::Char('q')) => Some(Event::CloseFocus),
            (ViewState::Results(_), BareKey::Char('j')) => Some(Event::KeyDown),
            (ViewState::Results(_), BareKey::Char('k')) => Some(Event::KeyUp),
            (ViewState::Results(_), BareKey::Char('0' | 'a')) => Some(Event::ToggleFilter(FilterToggle::All)),
            (ViewState::Results(_), BareKey::Char(c)) => {
                ContentKind::from_hotkey(c).map(|kind| Event::ToggleFilter(FilterToggle::Kind(kind)))
            }
            (ViewState::Focus(_), BareKey::Char('h') | BareKey::Backspace) => Some(Event::Back),
            (ViewState::Focus(_), BareKey::Char('o')) => Some(Event::OpenResult),
            _ => None,
        }
    }

    /// Maps a finished web request back to the request that produced it.
    fn map_web_request_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        tracing::debug!(status = status, body_len = body.len(), "web request result");

        match RequestContext::from_map(context) {
            Some(RequestContext::Search { ticket }) => Some(Event::SearchResponded { ticket, status, body }),
            Some(RequestContext::Trending) => Some(Event::TrendingResponded { status, body }),
            None => {
                tracing::debug!("ignoring web request result without a known context");
                None
            }
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => {
                    tracing::debug!(response = ?response, "worker response received");
                    Some(Event::WorkerResponse(response))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Serializes `message` as JSON and posts it to the worker thread.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    fn send_request(request: &ServiceRequest) {
        let verb = match request.method {
            Method::Get => HttpVerb::Get,
            Method::Post => HttpVerb::Post,
        };
        tracing::debug!(url = %request.url, verb = ?request.method, "sending web request");
        web_request(
            &request.url,
            verb,
            request.headers.clone(),
            request.body.clone(),
            request.context.to_map(),
        );
    }

    /// Translates a library action into Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Request(request) => Self::send_request(request),
            Action::ArmTimeout { after_ms } => {
                set_timeout(Duration::from_millis(*after_ms).as_secs_f64());
            }
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, "opening url on host");
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
        }
    }
}
