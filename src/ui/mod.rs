//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`detail`]: kind-specific metadata formatting (badges, detail fields)
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: header, query box, canvas, results, focus, overlays
//! - [`helpers`]: cursor positioning, truncation, match highlighting
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod detail;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CanvasModel, EmptyState, FilterChip, FocusModel, FooterInfo, HeaderInfo, LoadingInfo, QueryBarInfo, ResultRow,
    ResultsModel, ScreenModel, SuggestionItem, UIViewModel,
};
