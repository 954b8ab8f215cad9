//! Query orchestration core: dispatch, classification, and filtering.
//!
//! Everything in this module is synchronous and free of host calls, so the
//! whole search flow can be driven from tests.
//!
//! # Modules
//!
//! - [`dispatcher`]: single in-flight search, tickets, timeout, failure policy
//! - [`classifier`]: maps service kinds to [`ContentKind`](crate::domain::ContentKind), groups and filters
//! - [`filter`]: the visible-kinds set and its toggle transition
//! - [`fallback`]: synthetic responses for failed searches

pub mod classifier;
pub mod dispatcher;
pub mod fallback;
pub mod filter;

pub use dispatcher::{
    DispatchFailure, DispatchSettings, FailurePolicy, PendingSearch, QueryDispatcher, Resolution, Ticket,
};
pub use filter::{FilterSet, FilterToggle};
