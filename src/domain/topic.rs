//! Discovery topics shown on the canvas.

use super::kind::ContentKind;
use serde::{Deserialize, Serialize};

/// A clickable discovery topic, tagged with the content kind it is known for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub kind: ContentKind,
}

impl Topic {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The built-in topic list used until (or unless) trending topics arrive.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        use ContentKind::{Code, Datasets, Papers, Videos};

        [
            ("Machine Learning", Code),
            ("React Tutorials", Videos),
            ("Climate Data", Datasets),
            ("Deep Learning", Papers),
            ("FastAPI", Code),
            ("Data Science", Videos),
            ("COVID Research", Papers),
            ("Housing Data", Datasets),
            ("Python", Code),
            ("AI Ethics", Papers),
        ]
        .into_iter()
        .map(|(name, kind)| Self::new(name, kind))
        .collect()
    }
}
