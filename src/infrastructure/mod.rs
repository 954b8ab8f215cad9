//! Sandbox filesystem locations.
//!
//! Inside the Zellij plugin sandbox the host filesystem is mounted under
//! `/host`; everything the plugin persists lives below [`get_data_dir`].

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, history_file, trace_file};
