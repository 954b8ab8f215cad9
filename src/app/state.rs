//! Application state and view model computation.
//!
//! [`AppState`] wraps the [`ViewController`] with everything the screens need
//! but the controller does not own: the typed input, canvas suggestions,
//! recent queries, the failure banner, and the theme.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a
//! [`UIViewModel`]: it cuts long lists into a window centered on the cursor,
//! computes fuzzy match highlights for suggestions, and picks footer help for
//! the current screen and input mode.
//!
//! # Example
//!
//! ```
//! use omnisearch::app::AppState;
//! use omnisearch::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! state.input = "data".to_string();
//! let names: Vec<String> = state.suggestions().into_iter().map(|s| s.text).collect();
//! assert!(names.contains(&"Climate Data".to_string()));
//! ```

use super::modes::InputMode;
use super::view::{FocusView, ResultsView, ViewController, ViewState};
use crate::domain::{ContentKind, RecentQuery, Topic};
use crate::search::{classifier, FilterToggle};
use crate::service::ServiceEndpoint;
use crate::ui::detail;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CanvasModel, EmptyState, FilterChip, FocusModel, FooterInfo, HeaderInfo, LoadingInfo, QueryBarInfo,
    ResultRow, ResultsModel, ScreenModel, SuggestionItem, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// Number of recent queries kept and shown by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Blank line, header and border on top; border, footer and blank line below.
const CHROME_ROWS: usize = 6;
const QUERY_BAR_ROWS: usize = 3;
const BANNER_ROWS: usize = 1;
/// Section title above the suggestion list.
const CANVAS_TITLE_ROWS: usize = 1;
/// Filter bar plus the blank line under it.
const FILTER_BAR_ROWS: usize = 2;
/// Title, kind line, URL, and the two blank separators on the focus screen.
const FOCUS_FIXED_ROWS: usize = 5;
/// Horizontal inset of the focus screen body.
const FOCUS_MARGIN: usize = 4;

/// Where a canvas suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    /// A previously searched query.
    Recent,
    /// A discovery topic associated with one kind.
    Topic(ContentKind),
}

/// A canvas entry that submits its text when chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub source: SuggestionSource,
    /// Character ranges matching the typed input, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Central application state container.
///
/// Mutated only by [`handle_event`](super::handle_event); rendered through
/// [`AppState::compute_viewmodel`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// Screen state and the search dispatcher.
    pub view: ViewController,

    /// Whether printable keys edit [`AppState::input`].
    ///
    /// Always [`InputMode::Typing`] on the canvas.
    pub input_mode: InputMode,

    /// Text typed on the canvas or in the new-query bar.
    pub input: String,

    /// Highlighted canvas suggestion, an index into [`AppState::suggestions`].
    ///
    /// Reset whenever the input changes.
    pub suggestion_cursor: Option<usize>,

    /// Recent queries, frecency-ranked by the worker.
    pub history: Vec<RecentQuery>,

    /// Discovery topics, built-in until trending topics arrive.
    pub topics: Vec<Topic>,

    /// One-line notice about the last failed search.
    pub banner: Option<String>,

    /// Aggregation service location.
    pub endpoint: ServiceEndpoint,

    /// Number of recent queries requested from the worker.
    pub history_limit: usize,

    /// Whether trending topics are requested once permissions are granted.
    pub fetch_trending: bool,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state on the canvas with built-in topics and default settings.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            view: ViewController::default(),
            input_mode: InputMode::Typing,
            input: String::new(),
            suggestion_cursor: None,
            history: Vec::new(),
            topics: Topic::builtin(),
            banner: None,
            endpoint: ServiceEndpoint::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            fetch_trending: true,
            theme,
        }
    }

    /// Canvas suggestions matching the current input.
    ///
    /// Recent queries come first, then topics, each in their stored order.
    /// Texts repeated case-insensitively are shown once, keeping the first.
    /// With a non-blank input only fuzzy matches remain; the order is not
    /// changed by match score.
    #[must_use]
    pub fn suggestions(&self) -> Vec<Suggestion> {
        use fuzzy_matcher::FuzzyMatcher;

        let needle = self.input.trim();
        let matcher = SkimMatcherV2::default();
        let mut seen = HashSet::new();

        let recent = self
            .history
            .iter()
            .map(|entry| (entry.text.as_str(), SuggestionSource::Recent));
        let topics = self
            .topics
            .iter()
            .map(|topic| (topic.name.as_str(), SuggestionSource::Topic(topic.kind)));

        recent
            .chain(topics)
            .filter(|(text, _)| seen.insert(text.to_lowercase()))
            .filter_map(|(text, source)| {
                let highlight_ranges = if needle.is_empty() {
                    Vec::new()
                } else {
                    let (_score, indices) = matcher.fuzzy_indices(text, needle)?;
                    coalesce_ranges(&indices)
                };
                Some(Suggestion {
                    text: text.to_string(),
                    source,
                    highlight_ranges,
                })
            })
            .collect()
    }

    /// The highlighted suggestion, if the cursor is on one.
    #[must_use]
    pub fn selected_suggestion(&self) -> Option<Suggestion> {
        let index = self.suggestion_cursor?;
        self.suggestions().into_iter().nth(index)
    }

    /// Moves the suggestion cursor down, wrapping to the top.
    ///
    /// With no highlight yet, the first suggestion becomes highlighted.
    pub fn move_suggestion_down(&mut self) {
        let len = self.suggestions().len();
        if len == 0 {
            self.suggestion_cursor = None;
            return;
        }
        self.suggestion_cursor = Some(self.suggestion_cursor.map_or(0, |i| (i + 1) % len));
    }

    /// Moves the suggestion cursor up, wrapping to the bottom.
    pub fn move_suggestion_up(&mut self) {
        let len = self.suggestions().len();
        if len == 0 {
            self.suggestion_cursor = None;
            return;
        }
        self.suggestion_cursor = Some(match self.suggestion_cursor {
            None | Some(0) => len - 1,
            Some(i) => (i - 1).min(len - 1),
        });
    }

    /// Replaces the input and drops the suggestion highlight.
    pub fn set_input(&mut self, input: String) {
        self.input = input;
        self.suggestion_cursor = None;
    }

    /// Computes a renderable UI view model for a `rows` × `cols` pane.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract the chrome (header, footer, query bar, banner, and the
    ///    screen's own fixed rows) from `rows`
    /// 2. Center the window on the cursor
    /// 3. Near the end of the list, slide the window back so it stays full
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let query_bar = self.compute_query_bar();
        let banner = self.banner.clone();

        let mut chrome = CHROME_ROWS;
        if query_bar.is_some() {
            chrome += QUERY_BAR_ROWS;
        }
        if banner.is_some() {
            chrome += BANNER_ROWS;
        }
        let available = rows.saturating_sub(chrome);

        let screen = match self.view.state() {
            ViewState::Canvas => ScreenModel::Canvas(self.compute_canvas(available.saturating_sub(CANVAS_TITLE_ROWS))),
            ViewState::Results(results) => {
                ScreenModel::Results(Self::compute_results(results, available.saturating_sub(FILTER_BAR_ROWS)))
            }
            ViewState::Focus(focus) => ScreenModel::Focus(Self::compute_focus(focus, available, cols)),
        };

        UIViewModel {
            header: self.compute_header(),
            query_bar,
            screen,
            banner,
            loading: self.compute_loading(),
            footer: self.compute_footer(),
        }
    }

    fn compute_canvas(&self, available: usize) -> CanvasModel {
        let suggestions = self.suggestions();

        if suggestions.is_empty() {
            let empty_state = if self.input.trim().is_empty() {
                EmptyState {
                    message: "Nothing to suggest yet".to_string(),
                    subtitle: "Type a query and press Enter".to_string(),
                }
            } else {
                EmptyState {
                    message: "No matching suggestions".to_string(),
                    subtitle: format!("Press Enter to search for \"{}\"", self.input.trim()),
                }
            };
            return CanvasModel {
                suggestions: Vec::new(),
                empty_state: Some(empty_state),
            };
        }

        let (start, end) = window(suggestions.len(), self.suggestion_cursor.unwrap_or(0), available);

        let items = suggestions
            .into_iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(index, suggestion)| {
                let (tag, kind) = match suggestion.source {
                    SuggestionSource::Recent => ("recent".to_string(), None),
                    SuggestionSource::Topic(kind) => (kind.label().to_string(), Some(kind)),
                };
                SuggestionItem {
                    text: suggestion.text,
                    tag,
                    kind,
                    is_selected: self.suggestion_cursor == Some(index),
                    highlight_ranges: suggestion.highlight_ranges,
                }
            })
            .collect();

        CanvasModel {
            suggestions: items,
            empty_state: None,
        }
    }

    fn compute_results(results: &ResultsView, available: usize) -> ResultsModel {
        let filters = results.filters();
        let counts = results.counts();

        let mut chips = vec![FilterChip {
            label: format!("All ({})", results.response().results.len()),
            hotkey: '0',
            kind: None,
            active: filters.is_selected(FilterToggle::All),
        }];
        chips.extend(ContentKind::ALL.into_iter().map(|kind| FilterChip {
            label: format!("{} ({})", kind.display_name(), counts.get(&kind).copied().unwrap_or(0)),
            hotkey: kind.hotkey(),
            kind: Some(kind),
            active: filters.is_selected(FilterToggle::Kind(kind)),
        }));

        let visible = results.visible();
        if visible.is_empty() {
            let empty_state = if results.response().results.is_empty() {
                EmptyState {
                    message: format!("No results for \"{}\"", results.response().query),
                    subtitle: "Press / to try another query".to_string(),
                }
            } else {
                EmptyState {
                    message: "Nothing matches the active filter".to_string(),
                    subtitle: "Press 0 to show every kind".to_string(),
                }
            };
            return ResultsModel {
                chips,
                rows: Vec::new(),
                position: "0/0".to_string(),
                empty_state: Some(empty_state),
            };
        }

        let cursor = results.cursor();
        let (start, end) = window(visible.len(), cursor, available);

        let rows = visible[start..end]
            .iter()
            .enumerate()
            .map(|(relative_idx, result)| {
                let kind = classifier::kind_of(result);
                ResultRow {
                    kind,
                    glyph: kind.map_or("?", ContentKind::glyph).to_string(),
                    title: result.title.clone(),
                    badge: detail::badge(result),
                    relevance: result.relevance_percent(),
                    is_selected: start + relative_idx == cursor,
                }
            })
            .collect();

        ResultsModel {
            chips,
            rows,
            position: format!("{}/{}", cursor + 1, visible.len()),
            empty_state: None,
        }
    }

    fn compute_focus(focus: &FocusView, available: usize, cols: usize) -> FocusModel {
        let result = focus.result();
        let kind = classifier::kind_of(result);
        let fields = detail::detail_fields(result);

        let max_lines = available.saturating_sub(FOCUS_FIXED_ROWS + fields.len());
        let mut description = wrap(&result.description, cols.saturating_sub(FOCUS_MARGIN * 2));
        description.truncate(max_lines);

        FocusModel {
            title: result.title.clone(),
            kind,
            kind_label: kind.map_or_else(|| result.source_type.clone(), |k| k.display_name().to_string()),
            url: result.url.clone(),
            description,
            relevance: result.relevance_percent(),
            fields,
            is_fallback: detail::is_fallback(result),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view.state() {
            ViewState::Canvas => " OmniSearch ".to_string(),
            ViewState::Results(results) => {
                let response = results.response();
                format!(" {} results for \"{}\" ", response.total_results, response.query)
            }
            ViewState::Focus(focus) => format!(" OmniSearch · {} ", focus.origin().response().query),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.view.is_searching() {
            "Searching...  Esc: cancel"
        } else {
            match (self.view.state(), self.input_mode) {
                (ViewState::Canvas, _) => {
                    "Type to search  ↑/↓: suggestions  Enter: search  Ctrl+x: clear history  Esc: clear/quit"
                }
                (_, InputMode::Typing) => "Enter: search  Esc: cancel",
                (ViewState::Results(_), InputMode::Browsing) => {
                    "j/k: move  Enter: open  0-4: filter  /: new search  q: quit"
                }
                (ViewState::Focus(_), InputMode::Browsing) => "o: open in browser  Esc/h: back  /: new search  q: quit",
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_query_bar(&self) -> Option<QueryBarInfo> {
        let on_canvas = matches!(self.view.state(), ViewState::Canvas);
        if !on_canvas && self.input_mode == InputMode::Browsing {
            return None;
        }
        Some(QueryBarInfo {
            query: self.input.clone(),
            active: self.input_mode == InputMode::Typing,
        })
    }

    fn compute_loading(&self) -> Option<LoadingInfo> {
        self.view.dispatcher().in_flight_query().map(|query| LoadingInfo {
            query: query.to_string(),
        })
    }
}

/// Visible `[start, end)` window of `len` items, centered on `selected`.
fn window(len: usize, selected: usize, available: usize) -> (usize, usize) {
    let mut visible_start = selected.saturating_sub(available / 2);
    let visible_end = (visible_start + available).min(len);

    let actual_count = visible_end - visible_start;
    if actual_count < available && len >= available {
        visible_start = visible_end.saturating_sub(available);
    }

    (visible_start, visible_end)
}

/// Coalesces sorted match indices into `(start, end)` runs, end exclusive.
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in indices {
        match (start, prev) {
            (None, _) => {
                start = Some(idx);
                prev = Some(idx);
            }
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {}
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }

    ranges
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SearchResponse, SearchResult};
    use serde_json::Map;

    fn state() -> AppState {
        AppState::new(Theme::default())
    }

    fn recent(text: &str) -> RecentQuery {
        RecentQuery {
            text: text.to_string(),
            count: 1,
            last_searched: 0,
        }
    }

    fn result(id: &str, source_type: &str) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: format!("title {id}"),
            description: "a few words of description".to_string(),
            url: format!("https://example.com/{id}"),
            source_type: source_type.to_string(),
            thumbnail_url: None,
            metadata: Map::new(),
            relevance_score: 0.5,
        }
    }

    fn on_results(results: Vec<SearchResult>) -> AppState {
        let mut state = state();
        let pending = state.view.search("rust", 0).unwrap();
        let response = SearchResponse {
            query: "rust".to_string(),
            total_results: results.len() as u64,
            results,
        };
        state.view.complete_search(pending.ticket, Ok(response));
        state.input_mode = InputMode::Browsing;
        state
    }

    fn results_model(vm: &UIViewModel) -> &ResultsModel {
        match &vm.screen {
            ScreenModel::Results(model) => model,
            other => panic!("not on results: {other:?}"),
        }
    }

    #[test]
    fn recent_queries_come_before_topics_without_duplicates() {
        let mut state = state();
        state.history = vec![recent("tokio"), recent("python")];

        let suggestions = state.suggestions();
        assert_eq!(suggestions[0].text, "tokio");
        assert_eq!(suggestions[0].source, SuggestionSource::Recent);
        assert_eq!(suggestions[1].text, "python");
        assert_eq!(
            suggestions.iter().filter(|s| s.text.eq_ignore_ascii_case("python")).count(),
            1
        );
        assert_eq!(suggestions.len(), 2 + Topic::builtin().len() - 1);
    }

    #[test]
    fn input_filters_suggestions_and_highlights_matches() {
        let mut state = state();
        state.set_input("climate".to_string());

        let suggestions = state.suggestions();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].text, "Climate Data");
        assert_eq!(suggestions[0].source, SuggestionSource::Topic(ContentKind::Datasets));
        assert_eq!(suggestions[0].highlight_ranges, vec![(0, 7)]);
    }

    #[test]
    fn suggestion_cursor_wraps_both_ways() {
        let mut state = state();
        state.topics = vec![Topic::new("a", ContentKind::Code), Topic::new("b", ContentKind::Papers)];

        state.move_suggestion_up();
        assert_eq!(state.suggestion_cursor, Some(1));
        state.move_suggestion_down();
        assert_eq!(state.suggestion_cursor, Some(0));
        state.move_suggestion_down();
        assert_eq!(state.selected_suggestion().map(|s| s.text), Some("b".to_string()));

        state.set_input("zzz".to_string());
        assert_eq!(state.suggestion_cursor, None);
        state.move_suggestion_down();
        assert_eq!(state.suggestion_cursor, None);
    }

    #[test]
    fn chips_show_counts_and_the_active_filter() {
        let mut state = on_results(vec![result("1", "video"), result("2", "code"), result("3", "podcast")]);
        state.view.change_filter(ContentKind::Videos).unwrap();

        let vm = state.compute_viewmodel(24, 80);
        let model = results_model(&vm);
        let labels: Vec<&str> = model.chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["All (3)", "Code (1)", "Videos (1)", "Papers (0)", "Datasets (0)"]);
        let active: Vec<bool> = model.chips.iter().map(|c| c.active).collect();
        assert_eq!(active, [false, false, true, false, false]);
        assert_eq!(model.rows.len(), 1);
        assert_eq!(model.rows[0].glyph, "▶");
    }

    #[test]
    fn unrecognized_kinds_get_a_question_mark() {
        let state = on_results(vec![result("1", "podcast")]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(results_model(&vm).rows[0].glyph, "?");
        assert_eq!(results_model(&vm).rows[0].kind, None);
    }

    #[test]
    fn results_window_follows_the_cursor() {
        let results = (0..30).map(|i| result(&i.to_string(), "code")).collect();
        let mut state = on_results(results);
        for _ in 0..29 {
            state.view.move_cursor(true);
        }

        let vm = state.compute_viewmodel(20, 80);
        let model = results_model(&vm);
        assert_eq!(model.rows.len(), 20 - CHROME_ROWS - FILTER_BAR_ROWS);
        assert!(model.rows.last().unwrap().is_selected);
        assert_eq!(model.position, "30/30");
    }

    #[test]
    fn empty_filter_result_explains_itself() {
        let mut state = on_results(vec![result("1", "code")]);
        state.view.change_filter(ContentKind::Papers).unwrap();

        let vm = state.compute_viewmodel(24, 80);
        let model = results_model(&vm);
        assert!(model.rows.is_empty());
        assert_eq!(model.empty_state.as_ref().unwrap().message, "Nothing matches the active filter");
    }

    #[test]
    fn query_bar_only_over_results_while_typing() {
        let mut state = on_results(vec![result("1", "code")]);
        assert!(state.compute_viewmodel(24, 80).query_bar.is_none());

        state.input_mode = InputMode::Typing;
        assert!(state.compute_viewmodel(24, 80).query_bar.is_some());
        assert!(AppState::new(Theme::default()).compute_viewmodel(24, 80).query_bar.is_some());
    }

    #[test]
    fn loading_and_banner_are_carried_through() {
        let mut state = state();
        state.view.search("rust", 0).unwrap();
        state.banner = Some("search timed out after 15s".to_string());

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.loading, Some(LoadingInfo { query: "rust".to_string() }));
        assert_eq!(vm.banner.as_deref(), Some("search timed out after 15s"));
        assert!(vm.footer.keybindings.starts_with("Searching"));
    }

    #[test]
    fn focus_wraps_the_description() {
        let mut state = on_results(vec![result("1", "code")]);
        state.view.select_current().unwrap();

        let vm = state.compute_viewmodel(24, 20);
        let ScreenModel::Focus(focus) = vm.screen else {
            panic!("not on focus");
        };
        assert_eq!(focus.kind_label, "Code");
        assert_eq!(focus.description, ["a few words", "of", "description"]);
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh ij", 3), ["abc", "def", "gh", "ij"]);
        assert!(wrap("anything", 0).is_empty());
    }

    #[test]
    fn coalesces_consecutive_indices() {
        assert_eq!(coalesce_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce_ranges(&[]).is_empty());
    }
}
