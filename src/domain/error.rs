//! Error types for the OmniSearch plugin.
//!
//! This module defines the centralized error type [`OmniSearchError`] and a type
//! alias [`Result`] used throughout the crate. Errors are implemented with the
//! `thiserror` crate.
//!
//! Service failures during a search are deliberately absent here: they are
//! recovered by the dispatcher and travel as
//! [`DispatchFailure`](crate::search::DispatchFailure) values.

use thiserror::Error;

/// The main error type for OmniSearch operations.
///
/// Usage errors (`EmptyQuery`, `InvalidTransition`, `SelectionOutOfRange`) are
/// returned synchronously before any state is touched. The remaining variants
/// cover storage, worker, theme, and configuration failures.
///
/// # Examples
///
/// ```
/// use omnisearch::domain::{OmniSearchError, Query};
///
/// let err = Query::parse("   ").unwrap_err();
/// assert!(matches!(err, OmniSearchError::EmptyQuery));
/// ```
#[derive(Debug, Error)]
pub enum OmniSearchError {
    /// A query was empty or whitespace-only.
    #[error("query is empty")]
    EmptyQuery,

    /// A view transition was requested from a state that does not allow it.
    #[error("cannot {transition} from the {state} screen")]
    InvalidTransition {
        /// Name of the requested transition.
        transition: &'static str,
        /// Name of the screen the controller was on.
        state: &'static str,
    },

    /// A result index outside the currently visible results was selected.
    #[error("result {index} is out of range ({visible} visible)")]
    SelectionOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of visible results.
        visible: usize,
    },

    /// A payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for OmniSearch operations.
pub type Result<T> = std::result::Result<T, OmniSearchError>;
