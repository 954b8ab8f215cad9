//! Storage layer for the recent-query history.
//!
//! # Modules
//!
//! - `backend`: [`HistoryStore`] trait
//! - `json`: JSON file implementation
//! - `frecency`: count × recency ranking
//! - `models`: on-disk record types

pub mod backend;
pub mod frecency;
pub mod json;
pub mod models;

pub use backend::HistoryStore;
pub use frecency::{calculate_score, rank};
pub use json::JsonHistoryStore;
pub use models::QueryRecord;
