//! Client-side content kind vocabulary.
//!
//! The client groups and filters results by the plural labels `code`,
//! `videos`, `papers`, and `datasets`. The aggregation service labels results
//! with singular `source_type` strings instead; translating those is the job of
//! [`crate::search::classifier::normalize_kind`] and nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four content kinds a result can belong to.
///
/// Ordering follows the order the kinds are presented in: code, videos,
/// papers, datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Code repositories.
    Code,
    /// Videos.
    Videos,
    /// Research papers.
    Papers,
    /// Datasets.
    Datasets,
}

impl ContentKind {
    /// All kinds in presentation order.
    pub const ALL: [Self; 4] = [Self::Code, Self::Videos, Self::Papers, Self::Datasets];

    /// Returns the client-side label (`"code"`, `"videos"`, `"papers"`, `"datasets"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Videos => "videos",
            Self::Papers => "papers",
            Self::Datasets => "datasets",
        }
    }

    /// Parses a client-side label.
    ///
    /// Only the plural vocabulary is accepted; service `source_type` strings go
    /// through the classifier instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::domain::ContentKind;
    ///
    /// assert_eq!(ContentKind::from_label("videos"), Some(ContentKind::Videos));
    /// assert_eq!(ContentKind::from_label("video"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Human-readable name for headers and filter chips.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Videos => "Videos",
            Self::Papers => "Papers",
            Self::Datasets => "Datasets",
        }
    }

    /// Short glyph shown next to results of this kind.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Code => "{}",
            Self::Videos => "▶",
            Self::Papers => "¶",
            Self::Datasets => "▦",
        }
    }

    /// Number key toggling this kind in the results filter bar (1-4).
    #[must_use]
    pub const fn hotkey(self) -> char {
        match self {
            Self::Code => '1',
            Self::Videos => '2',
            Self::Papers => '3',
            Self::Datasets => '4',
        }
    }

    /// Inverse of [`ContentKind::hotkey`].
    #[must_use]
    pub fn from_hotkey(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.hotkey() == c)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_plural_labels() {
        let json = serde_json::to_string(&ContentKind::ALL).unwrap();
        assert_eq!(json, r#"["code","videos","papers","datasets"]"#);
    }

    #[test]
    fn hotkeys_round_trip() {
        for kind in ContentKind::ALL {
            assert_eq!(ContentKind::from_hotkey(kind.hotkey()), Some(kind));
        }
        assert_eq!(ContentKind::from_hotkey('0'), None);
    }
}
