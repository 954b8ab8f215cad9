//! Screen state and the transitions between screens.
//!
//! [`ViewController`] is the only owner of [`ViewState`]. Every transition is
//! a method that checks the current screen first and returns
//! [`OmniSearchError::InvalidTransition`] without side effects when called
//! from the wrong one.
//!
//! ```text
//! Canvas ──search──▶ Results ──select──▶ Focus
//!                     ▲  │ ▲               │
//!                     │  └─┘ change_filter │
//!                     └────────back────────┘
//! ```
//!
//! A completed search installs a fresh [`ResultsView`] from any screen.

use crate::domain::{ContentKind, OmniSearchError, Query, Result, SearchResponse, SearchResult};
use crate::search::classifier;
use crate::search::{
    DispatchFailure, DispatchSettings, FilterSet, FilterToggle, PendingSearch, QueryDispatcher, Resolution, Ticket,
};
use std::collections::BTreeMap;

/// Result list state: the installed response, the active filter, and the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    response: SearchResponse,
    filters: FilterSet,
    cursor: usize,
}

impl ResultsView {
    /// A freshly installed response: unfiltered, cursor on the first result.
    #[must_use]
    pub fn new(response: SearchResponse) -> Self {
        Self {
            response,
            filters: FilterSet::all(),
            cursor: 0,
        }
    }

    #[must_use]
    pub const fn response(&self) -> &SearchResponse {
        &self.response
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Index of the highlighted result within [`ResultsView::visible`].
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Results passing the active filter, in relevance order.
    #[must_use]
    pub fn visible(&self) -> Vec<&SearchResult> {
        classifier::filter(&self.response, &self.filters)
    }

    /// Per-kind result counts for the filter bar.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<ContentKind, usize> {
        classifier::counts(&self.response)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SearchResult> {
        self.visible().get(self.cursor).copied()
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    fn apply(&mut self, toggle: FilterToggle) {
        self.filters = self.filters.toggle(toggle);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

/// The detail screen for one result, remembering where it was entered from.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusView {
    result: SearchResult,
    origin: ResultsView,
}

impl FocusView {
    #[must_use]
    pub const fn result(&self) -> &SearchResult {
        &self.result
    }

    /// The results screen that `back` returns to.
    #[must_use]
    pub const fn origin(&self) -> &ResultsView {
        &self.origin
    }
}

/// The current screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    /// Discovery canvas, the initial screen.
    #[default]
    Canvas,
    Results(ResultsView),
    Focus(FocusView),
}

impl ViewState {
    /// Screen name used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Canvas => "canvas",
            Self::Results(_) => "results",
            Self::Focus(_) => "focus",
        }
    }
}

/// What a finished (or timed out) search did to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The answer belonged to a superseded or cancelled search.
    Stale,
    /// A response was installed; `fallback` is set when it was synthesized.
    Installed {
        query: Query,
        fallback: Option<DispatchFailure>,
    },
    /// The search failed and the view was left unchanged.
    Failed { query: Query, failure: DispatchFailure },
}

/// Owns the screen state and the dispatcher that feeds it.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
    dispatcher: QueryDispatcher,
}

impl ViewController {
    #[must_use]
    pub fn new(settings: DispatchSettings) -> Self {
        Self {
            state: ViewState::Canvas,
            dispatcher: QueryDispatcher::new(settings),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &QueryDispatcher {
        &self.dispatcher
    }

    /// Loading flag: true between dispatch and resolution.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.dispatcher.is_searching()
    }

    /// Starts a search. The screen does not change until it completes.
    ///
    /// # Errors
    ///
    /// Returns [`OmniSearchError::EmptyQuery`] for blank input; nothing is
    /// dispatched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::app::view::{ViewController, ViewState};
    ///
    /// let mut view = ViewController::default();
    /// assert!(view.search("   ", 0).is_err());
    /// assert!(!view.is_searching());
    ///
    /// view.search("Rust", 0).unwrap();
    /// assert!(view.is_searching());
    /// assert_eq!(view.state(), &ViewState::Canvas);
    /// ```
    pub fn search(&mut self, raw: &str, now_ms: u64) -> Result<PendingSearch> {
        let query = Query::parse(raw)?;
        Ok(self.dispatcher.dispatch(query, now_ms))
    }

    /// Applies the outcome of the request sent under `ticket`.
    pub fn complete_search(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<SearchResponse, DispatchFailure>,
    ) -> SearchOutcome {
        let resolution = self.dispatcher.resolve(ticket, outcome);
        self.apply_resolution(resolution)
    }

    /// Times out the pending search if its deadline has passed.
    pub fn expire_search(&mut self, now_ms: u64) -> Option<SearchOutcome> {
        let resolution = self.dispatcher.expire(now_ms)?;
        Some(self.apply_resolution(resolution))
    }

    /// Abandons the pending search without changing the screen.
    pub fn cancel_search(&mut self) -> Option<Ticket> {
        self.dispatcher.cancel()
    }

    /// Opens the result at `index` of the visible list in the focus screen.
    ///
    /// # Errors
    ///
    /// Returns [`OmniSearchError::InvalidTransition`] outside the results
    /// screen and [`OmniSearchError::SelectionOutOfRange`] for an index past
    /// the visible results.
    pub fn select_result(&mut self, index: usize) -> Result<()> {
        let ViewState::Results(results) = &self.state else {
            return Err(self.invalid("select a result"));
        };

        let visible = results.visible();
        let Some(result) = visible.get(index).map(|r| (*r).clone()) else {
            return Err(OmniSearchError::SelectionOutOfRange {
                index,
                visible: visible.len(),
            });
        };

        let mut origin = results.clone();
        origin.cursor = index;
        tracing::debug!(result_id = %result.id, index = index, "entering focus");
        self.state = ViewState::Focus(FocusView { result, origin });
        Ok(())
    }

    /// Opens the highlighted result.
    ///
    /// # Errors
    ///
    /// Same as [`ViewController::select_result`].
    pub fn select_current(&mut self) -> Result<()> {
        let cursor = match &self.state {
            ViewState::Results(results) => results.cursor,
            _ => return Err(self.invalid("select a result")),
        };
        self.select_result(cursor)
    }

    /// Returns from focus to the results screen it was entered from.
    ///
    /// # Errors
    ///
    /// Returns [`OmniSearchError::InvalidTransition`] outside the focus screen.
    pub fn back(&mut self) -> Result<()> {
        if !matches!(self.state, ViewState::Focus(_)) {
            return Err(self.invalid("go back"));
        }

        if let ViewState::Focus(focus) = std::mem::take(&mut self.state) {
            self.state = ViewState::Results(focus.origin);
        }
        Ok(())
    }

    /// Applies a filter toggle on the results screen.
    ///
    /// # Errors
    ///
    /// Returns [`OmniSearchError::InvalidTransition`] outside the results
    /// screen.
    pub fn change_filter(&mut self, toggle: impl Into<FilterToggle>) -> Result<&FilterSet> {
        let error = self.invalid("change the filter");
        let ViewState::Results(results) = &mut self.state else {
            return Err(error);
        };
        results.apply(toggle.into());
        tracing::debug!(filters = %results.filters, "filter changed");
        Ok(&results.filters)
    }

    /// Moves the results cursor; `false` when not on the results screen.
    pub fn move_cursor(&mut self, down: bool) -> bool {
        let ViewState::Results(results) = &mut self.state else {
            return false;
        };
        if down {
            results.move_down();
        } else {
            results.move_up();
        }
        true
    }

    fn apply_resolution(&mut self, resolution: Resolution) -> SearchOutcome {
        match resolution {
            Resolution::Stale { .. } => SearchOutcome::Stale,
            Resolution::Delivered { query, response } => {
                self.install(response);
                SearchOutcome::Installed { query, fallback: None }
            }
            Resolution::Fallback {
                query,
                response,
                failure,
            } => {
                self.install(response);
                SearchOutcome::Installed {
                    query,
                    fallback: Some(failure),
                }
            }
            Resolution::Failed { query, failure } => SearchOutcome::Failed { query, failure },
        }
    }

    fn install(&mut self, response: SearchResponse) {
        tracing::debug!(from = self.state.name(), results = response.results.len(), "installing results");
        self.state = ViewState::Results(ResultsView::new(response));
    }

    fn invalid(&self, transition: &'static str) -> OmniSearchError {
        OmniSearchError::InvalidTransition {
            transition,
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FailurePolicy;
    use serde_json::Map;
    use ContentKind::{Code, Papers, Videos};

    fn result(id: &str, source_type: &str) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: format!("{source_type} {id}"),
            description: String::new(),
            url: format!("https://example.com/{id}"),
            source_type: source_type.to_string(),
            thumbnail_url: None,
            metadata: Map::new(),
            relevance_score: 0.9,
        }
    }

    fn rust_response() -> SearchResponse {
        SearchResponse {
            query: "Rust".to_string(),
            total_results: 3,
            results: vec![result("v", "video"), result("c", "code"), result("p", "paper")],
        }
    }

    fn on_results() -> ViewController {
        let mut view = ViewController::default();
        let pending = view.search("Rust", 0).unwrap();
        view.complete_search(pending.ticket, Ok(rust_response()));
        view
    }

    fn visible_ids(view: &ViewController) -> Vec<String> {
        let ViewState::Results(results) = view.state() else {
            panic!("not on results: {}", view.state().name());
        };
        results.visible().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn rust_scenario_narrows_then_widens() {
        let mut view = on_results();
        assert_eq!(visible_ids(&view), ["v", "c", "p"]);

        assert_eq!(view.change_filter(Videos).unwrap(), &FilterSet::only([Videos]));
        assert_eq!(visible_ids(&view), ["v"]);

        assert_eq!(view.change_filter(Code).unwrap(), &FilterSet::only([Videos, Code]));
        assert_eq!(visible_ids(&view), ["v", "c"]);
    }

    #[test]
    fn back_restores_response_filters_and_cursor() {
        let mut view = on_results();
        view.change_filter(Papers).unwrap();
        view.change_filter(Code).unwrap();
        view.move_cursor(true);
        let before = view.state().clone();

        view.select_current().unwrap();
        let ViewState::Focus(focus) = view.state() else {
            panic!("expected focus");
        };
        assert_eq!(focus.result().id, "p");

        view.back().unwrap();
        assert_eq!(view.state(), &before);
    }

    #[test]
    fn transitions_from_the_wrong_screen_are_rejected() {
        let mut view = ViewController::default();
        assert!(matches!(
            view.select_result(0),
            Err(OmniSearchError::InvalidTransition { state: "canvas", .. })
        ));
        assert!(view.back().is_err());
        assert!(view.change_filter(FilterToggle::All).is_err());
        assert!(!view.move_cursor(true));

        let mut view = on_results();
        assert!(matches!(
            view.back(),
            Err(OmniSearchError::InvalidTransition { state: "results", .. })
        ));

        view.select_result(0).unwrap();
        assert!(view.change_filter(Code).is_err());
        assert!(view.select_current().is_err());
        assert_eq!(view.state().name(), "focus");
    }

    #[test]
    fn selection_past_the_visible_results_is_rejected() {
        let mut view = on_results();
        view.change_filter(Videos).unwrap();
        assert!(matches!(
            view.select_result(1),
            Err(OmniSearchError::SelectionOutOfRange { index: 1, visible: 1 })
        ));
        assert_eq!(view.state().name(), "results");
    }

    #[test]
    fn a_new_search_resets_the_filter() {
        let mut view = on_results();
        view.change_filter(Videos).unwrap();

        let pending = view.search("Rust", 10).unwrap();
        assert_eq!(view.state().name(), "results");
        view.complete_search(pending.ticket, Ok(rust_response()));

        let ViewState::Results(results) = view.state() else {
            panic!("expected results");
        };
        assert!(results.filters().is_all());
    }

    #[test]
    fn a_search_from_focus_replaces_it() {
        let mut view = on_results();
        view.select_result(2).unwrap();

        let pending = view.search("tokio", 0).unwrap();
        let outcome = view.complete_search(pending.ticket, Ok(rust_response()));
        assert!(matches!(outcome, SearchOutcome::Installed { fallback: None, .. }));
        assert_eq!(view.state().name(), "results");
    }

    #[test]
    fn cursor_is_clamped_when_the_filter_narrows() {
        let mut view = on_results();
        view.move_cursor(false);
        let ViewState::Results(results) = view.state() else {
            panic!("expected results");
        };
        assert_eq!(results.cursor(), 2);

        view.change_filter(Code).unwrap();
        let ViewState::Results(results) = view.state() else {
            panic!("expected results");
        };
        assert_eq!(results.cursor(), 0);
        assert_eq!(results.selected().map(|r| r.id.as_str()), Some("c"));
    }

    #[test]
    fn fallback_installs_results_for_the_query() {
        let mut view = ViewController::default();
        let pending = view.search("x", 0).unwrap();
        let outcome = view.complete_search(pending.ticket, Err(DispatchFailure::Decode("eof".into())));

        assert!(matches!(outcome, SearchOutcome::Installed { fallback: Some(_), .. }));
        let ViewState::Results(results) = view.state() else {
            panic!("expected results");
        };
        assert_eq!(results.response().query, "x");
        assert!(!view.is_searching());
    }

    #[test]
    fn surfaced_failure_keeps_the_screen() {
        let mut view = ViewController::new(DispatchSettings {
            policy: FailurePolicy::Surface,
            ..DispatchSettings::default()
        });
        let pending = view.search("x", 0).unwrap();
        let outcome = view.complete_search(pending.ticket, Err(DispatchFailure::Timeout { after_secs: 1 }));

        assert!(matches!(outcome, SearchOutcome::Failed { .. }));
        assert_eq!(view.state(), &ViewState::Canvas);
        assert!(view.dispatcher().last_error().is_some());
    }

    #[test]
    fn stale_response_leaves_the_screen_alone() {
        let mut view = on_results();
        let slow = view.search("slow", 0).unwrap();
        let fast = view.search("fast", 1).unwrap();

        let mut fast_response = rust_response();
        fast_response.query = "fast".into();
        view.complete_search(fast.ticket, Ok(fast_response));

        let mut slow_response = rust_response();
        slow_response.query = "slow".into();
        assert_eq!(view.complete_search(slow.ticket, Ok(slow_response)), SearchOutcome::Stale);

        let ViewState::Results(results) = view.state() else {
            panic!("expected results");
        };
        assert_eq!(results.response().query, "fast");
    }
}
