//! View model types representing renderable UI state.
//!
//! View models are computed by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They hold display-ready data only: text is
//! already formatted, windows are already cut, and selection is already
//! resolved to a row.

use crate::domain::ContentKind;
use crate::ui::detail::DetailField;

/// Complete UI view model for rendering one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Query input, shown on the canvas and when a new query is being typed
    /// over the results.
    pub query_bar: Option<QueryBarInfo>,

    /// Body of the current screen.
    pub screen: ScreenModel,

    /// One-line notice, e.g. a failed search.
    pub banner: Option<String>,

    /// Present while a search is in flight.
    pub loading: Option<LoadingInfo>,

    pub footer: FooterInfo,
}

/// Screen-specific body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenModel {
    Canvas(CanvasModel),
    Results(ResultsModel),
    Focus(FocusModel),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, centered.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Query input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBarInfo {
    pub query: String,
    /// Whether keystrokes currently go to the box.
    pub active: bool,
}

/// Loading overlay contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingInfo {
    pub query: String,
}

/// Empty state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Discovery canvas body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasModel {
    /// Windowed suggestions.
    pub suggestions: Vec<SuggestionItem>,
    /// Shown instead of the list when nothing matches the input.
    pub empty_state: Option<EmptyState>,
}

/// A recent query or discovery topic on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub text: String,
    /// Short tag shown after the text (`recent`, `code`, `papers`, ...).
    pub tag: String,
    pub kind: Option<ContentKind>,
    pub is_selected: bool,
    /// Character ranges matching the typed input, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Results screen body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsModel {
    pub chips: Vec<FilterChip>,
    /// Windowed rows of the visible results.
    pub rows: Vec<ResultRow>,
    /// `3/12` style position of the cursor among visible results.
    pub position: String,
    pub empty_state: Option<EmptyState>,
}

/// One filter toggle in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    /// `All (12)`, `Code (4)`, ...
    pub label: String,
    pub hotkey: char,
    pub kind: Option<ContentKind>,
    pub active: bool,
}

/// One result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub kind: Option<ContentKind>,
    /// Kind glyph, or `?` for unrecognized kinds.
    pub glyph: String,
    pub title: String,
    pub badge: Option<String>,
    pub relevance: u8,
    pub is_selected: bool,
}

/// Focus screen body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusModel {
    pub title: String,
    pub kind: Option<ContentKind>,
    /// Kind display name, or the raw service label when unrecognized.
    pub kind_label: String,
    pub url: String,
    /// Description wrapped to the pane width.
    pub description: Vec<String>,
    pub relevance: u8,
    pub fields: Vec<DetailField>,
    /// Set for the synthetic links shown after a failed search.
    pub is_fallback: bool,
}
