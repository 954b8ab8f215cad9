//! OmniSearch: a Zellij plugin for searching code, videos, papers, and
//! datasets in one place.
//!
//! The plugin sends each query to an external aggregation service, groups the
//! results by content kind, and lets the user narrow them with filter chips
//! and inspect one result at a time:
//!
//! - A discovery canvas with recent queries and topics
//! - A results screen with per-kind counts and a toggleable kind filter
//! - A focus screen with kind-specific detail fields
//! - Cancel-on-supersede dispatch with a request timeout and fallback links
//! - Recent-query history persisted by a background worker
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host events, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← events → state → actions
//! │  - ViewController (canvas / results / focus)        │
//! │  - Canvas suggestions, view model computation       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search core   │   │ UI Layer      │   │ Worker Layer  │
//! │ (search/)     │   │ (ui/)         │   │ (worker/)     │
//! │ - Dispatcher  │   │ - Rendering   │   │ - History I/O │
//! │ - Classifier  │   │ - Theming     │   │ - Frecency    │
//! │ - Filters     │   │ - Components  │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                                         │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Service contract          │   │ Storage (storage/)        │
//! │ (service/)                │   │ - JSON history file       │
//! └───────────────────────────┘   └───────────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), paths (infrastructure/),         │
//! │  tracing (observability/)                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use omnisearch::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "climate".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_render, actions) = handle_event(&mut state, &Event::Submit { now_ms: 0 })?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), omnisearch::OmniSearchError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod service;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewController, ViewState};
pub use domain::{ContentKind, OmniSearchError, Query, Result, SearchResponse, SearchResult};
pub use ui::Theme;

use search::{DispatchSettings, FailurePolicy};
use service::ServiceEndpoint;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Built-in theme used when none is configured.
pub const DEFAULT_THEME: &str = "omni-dark";

/// Plugin configuration, parsed from the Zellij layout's plugin block.
///
/// ```kdl
/// plugin location="file:omnisearch.wasm" {
///     service_url "http://localhost:8001"
///     result_limit "50"
///     request_timeout_secs "15"
///     on_failure "fallback"
///     fetch_trending "true"
///     history_limit "20"
///     theme "omni-dark"
///     trace_level "omnisearch=debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the aggregation service.
    pub service_url: String,

    /// `limit` sent with every search.
    pub result_limit: u32,

    /// Seconds before an unanswered search fails with a timeout.
    pub request_timeout_secs: u64,

    /// What a failed search shows.
    pub on_failure: FailurePolicy,

    /// Whether trending topics replace the built-in canvas topics at start.
    pub fetch_trending: bool,

    /// Number of recent queries shown on the canvas.
    pub history_limit: usize,

    /// Built-in theme name (`omni-dark`, `omni-light`).
    pub theme_name: String,

    /// Path to a TOML theme file; wins over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing (e.g. `info`, `omnisearch=debug`).
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: service::DEFAULT_SERVICE_URL.to_string(),
            result_limit: search::dispatcher::DEFAULT_RESULT_LIMIT,
            request_timeout_secs: search::dispatcher::DEFAULT_TIMEOUT_SECS,
            on_failure: FailurePolicy::default(),
            fetch_trending: true,
            history_limit: app::DEFAULT_HISTORY_LIMIT,
            theme_name: DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses Zellij's string map. Missing keys and unparseable values fall
    /// back to the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use omnisearch::search::FailurePolicy;
    /// use omnisearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("on_failure".to_string(), "surface".to_string());
    /// map.insert("result_limit".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.on_failure, FailurePolicy::Surface);
    /// assert_eq!(config.result_limit, 50);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let on_failure = config.get("on_failure").map_or(defaults.on_failure, |value| {
            FailurePolicy::from_name(value).unwrap_or_else(|| {
                tracing::warn!(key = "on_failure", value = %value, "invalid value, using default");
                defaults.on_failure
            })
        });

        let service_url = config
            .get("service_url")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.service_url);

        Self {
            service_url,
            result_limit: parse_or(config, "result_limit", defaults.result_limit),
            request_timeout_secs: parse_or(config, "request_timeout_secs", defaults.request_timeout_secs),
            on_failure,
            fetch_trending: parse_or(config, "fetch_trending", defaults.fetch_trending),
            history_limit: parse_or(config, "history_limit", defaults.history_limit),
            theme_name: config.get("theme").cloned().unwrap_or(defaults.theme_name),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned().unwrap_or(defaults.trace_level),
        }
    }

    /// Dispatcher settings derived from this configuration.
    #[must_use]
    pub const fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            limit: self.result_limit,
            timeout_secs: self.request_timeout_secs,
            policy: self.on_failure,
        }
    }
}

fn parse_or<T: FromStr + Copy>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    let Some(value) = config.get(key) else {
        return default;
    };
    value.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key = key, value = %value, "invalid value, using default");
        default
    })
}

/// Builds the initial application state from configuration.
///
/// Loads the theme (file, then name, then the default) and wires the
/// dispatcher and service endpoint.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing omnisearch plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            Theme::from_name(&config.theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %config.theme_name, "unknown theme, using default");
                Theme::default()
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = AppState::new(theme);
    state.view = ViewController::new(config.dispatch_settings());
    state.endpoint = ServiceEndpoint::new(&config.service_url);
    state.history_limit = config.history_limit;
    state.fetch_trending = config.fetch_trending;
    state
}
