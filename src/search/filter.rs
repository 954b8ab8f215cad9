//! Active content-kind filter and its toggle transition.
//!
//! A [`FilterSet`] is either "all" (no restriction) or a non-empty set of
//! [`ContentKind`]s. There is no way to build an empty restricted set: removing
//! the last selected kind collapses back to "all".
//!
//! # Transition Rules
//!
//! | current        | toggle      | next                  |
//! |----------------|-------------|-----------------------|
//! | any            | `All`       | all                   |
//! | all            | `Kind(k)`   | `{k}`                 |
//! | `S`, `k ∈ S`   | `Kind(k)`   | `S \ {k}`, or all if empty |
//! | `S`, `k ∉ S`   | `Kind(k)`   | `S ∪ {k}`             |

use crate::domain::ContentKind;
use std::collections::BTreeSet;
use std::fmt;

/// Input to [`FilterSet::toggle`]: either the "all" chip or one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterToggle {
    All,
    Kind(ContentKind),
}

impl From<ContentKind> for FilterToggle {
    fn from(kind: ContentKind) -> Self {
        Self::Kind(kind)
    }
}

/// The set of content kinds currently visible.
///
/// Internally an empty set means "all", which makes the invariant "never
/// empty and restricted at the same time" hold by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet {
    kinds: BTreeSet<ContentKind>,
}

impl FilterSet {
    /// The unrestricted filter.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter restricted to `kinds`; an empty iterator yields [`FilterSet::all`].
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::domain::ContentKind;
    /// use omnisearch::search::FilterSet;
    ///
    /// assert!(FilterSet::only([]).is_all());
    /// assert!(!FilterSet::only([ContentKind::Papers]).is_all());
    /// ```
    #[must_use]
    pub fn only(kinds: impl IntoIterator<Item = ContentKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether results of `kind` pass this filter.
    #[must_use]
    pub fn allows(&self, kind: ContentKind) -> bool {
        self.is_all() || self.kinds.contains(&kind)
    }

    /// Whether the chip for `toggle` should be drawn as active.
    ///
    /// Unlike [`FilterSet::allows`], a kind chip is inactive while "all" is
    /// selected.
    #[must_use]
    pub fn is_selected(&self, toggle: FilterToggle) -> bool {
        match toggle {
            FilterToggle::All => self.is_all(),
            FilterToggle::Kind(kind) => self.kinds.contains(&kind),
        }
    }

    /// Selected kinds in presentation order; empty when "all" is active.
    pub fn kinds(&self) -> impl Iterator<Item = ContentKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Applies one toggle and returns the resulting filter.
    ///
    /// Total: every toggle is legal from every filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::domain::ContentKind;
    /// use omnisearch::search::{FilterSet, FilterToggle};
    ///
    /// let papers = FilterSet::all().toggle(FilterToggle::Kind(ContentKind::Papers));
    /// assert_eq!(papers, FilterSet::only([ContentKind::Papers]));
    /// assert!(papers.toggle(FilterToggle::Kind(ContentKind::Papers)).is_all());
    /// ```
    #[must_use]
    pub fn toggle(&self, toggle: FilterToggle) -> Self {
        let kind = match toggle {
            FilterToggle::All => return Self::all(),
            FilterToggle::Kind(kind) => kind,
        };

        if self.is_all() {
            return Self::only([kind]);
        }

        let mut kinds = self.kinds.clone();
        if !kinds.remove(&kind) {
            kinds.insert(kind);
        }
        Self { kinds }
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("all");
        }
        let labels: Vec<&str> = self.kinds().map(ContentKind::label).collect();
        f.write_str(&labels.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ContentKind::{Code, Datasets, Papers, Videos};

    fn any_toggle() -> impl Strategy<Value = FilterToggle> {
        prop_oneof![
            Just(FilterToggle::All),
            (0..ContentKind::ALL.len()).prop_map(|i| FilterToggle::Kind(ContentKind::ALL[i])),
        ]
    }

    fn any_kind() -> impl Strategy<Value = ContentKind> {
        (0..ContentKind::ALL.len()).prop_map(|i| ContentKind::ALL[i])
    }

    #[test]
    fn all_toggle_resets_any_selection() {
        let narrowed = FilterSet::only([Code, Papers]);
        assert!(narrowed.toggle(FilterToggle::All).is_all());
        assert!(FilterSet::all().toggle(FilterToggle::All).is_all());
    }

    #[test]
    fn selecting_a_kind_while_all_narrows_to_it() {
        assert_eq!(FilterSet::all().toggle(Videos.into()), FilterSet::only([Videos]));
    }

    #[test]
    fn adding_and_removing_kinds() {
        let filters = FilterSet::only([Videos]).toggle(Code.into());
        assert_eq!(filters, FilterSet::only([Videos, Code]));

        let filters = filters.toggle(Videos.into());
        assert_eq!(filters, FilterSet::only([Code]));

        assert!(filters.toggle(Code.into()).is_all());
    }

    #[test]
    fn chip_selection_differs_from_allows() {
        let all = FilterSet::all();
        assert!(all.allows(Datasets));
        assert!(!all.is_selected(Datasets.into()));
        assert!(all.is_selected(FilterToggle::All));
    }

    #[test]
    fn display_lists_labels() {
        assert_eq!(FilterSet::all().to_string(), "all");
        assert_eq!(FilterSet::only([Papers, Code]).to_string(), "code+papers");
    }

    proptest! {
        #[test]
        fn double_toggle_from_all_returns_to_all(kind in any_kind()) {
            let once = FilterSet::all().toggle(kind.into());
            prop_assert!(!once.is_all());
            prop_assert!(once.toggle(kind.into()).is_all());
        }

        #[test]
        fn toggle_is_self_inverse_on_restricted_sets(
            start in prop::collection::btree_set(any_kind(), 1..4),
            kind in any_kind(),
        ) {
            let filters = FilterSet::only(start);
            let back = filters.toggle(kind.into()).toggle(kind.into());
            prop_assert_eq!(back, filters);
        }

        #[test]
        fn any_sequence_keeps_a_consistent_set(toggles in prop::collection::vec(any_toggle(), 0..32)) {
            let mut filters = FilterSet::all();
            for toggle in toggles {
                filters = filters.toggle(toggle);
                prop_assert_eq!(filters.is_all(), filters.kinds().next().is_none());
                for kind in ContentKind::ALL {
                    prop_assert_eq!(filters.allows(kind), filters.is_all() || filters.is_selected(kind.into()));
                }
            }
        }
    }
}
