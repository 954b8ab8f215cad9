//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML files; two are compiled in and any other can be loaded
//! from disk with the `theme_file` option.
//!
//! # Built-in Themes
//!
//! - `omni-dark`: dark background, saturated kind colors (default)
//! - `omni-light`: light background, muted kind colors
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0e6f0"
//! selection_fg = "#11141c"
//! selection_bg = "#7aa2f7"
//! text_normal = "#c0caf5"
//! text_dim = "#565f89"
//! border = "#2f3549"
//! query_bar_border = "#7aa2f7"
//! match_highlight_fg = "#11141c"
//! match_highlight_bg = "#e0af68"
//! empty_state_fg = "#7dcfff"
//! banner_fg = "#f7768e"
//! loading_fg = "#e0af68"
//!
//! [colors.kinds]
//! code = "#9ece6a"
//! videos = "#f7768e"
//! papers = "#7aa2f7"
//! datasets = "#bb9af7"
//! ```
//!
//! # Example
//!
//! ```rust
//! use omnisearch::ui::theme::Theme;
//!
//! let theme = Theme::from_name("omni-light").unwrap();
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! print!("{}colored", Theme::fg(&theme.colors.header_fg));
//! ```

use crate::domain::{ContentKind, OmniSearchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (`"#c0caf5"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: footer, badges, tags.
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,
    pub query_bar_border: String,

    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Failure banner color.
    pub banner_fg: String,
    /// Loading overlay color.
    pub loading_fg: String,

    /// Accent per content kind, used for glyphs, tags and active filter chips.
    pub kinds: KindColors,
}

/// One accent color per content kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KindColors {
    pub code: String,
    pub videos: String,
    pub papers: String,
    pub datasets: String,
}

impl Theme {
    /// Loads a built-in theme by name (`omni-dark`, `omni-light`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use omnisearch::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::from_name("omni-dark").unwrap().name, "omni-dark");
    /// assert!(Theme::from_name("nope").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "omni-dark" => include_str!("../../themes/omni-dark.toml"),
            "omni-light" => include_str!("../../themes/omni-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`OmniSearchError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| OmniSearchError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| OmniSearchError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Accent color for a content kind; unrecognized kinds use the dim color.
    #[must_use]
    pub fn kind_color(&self, kind: Option<ContentKind>) -> &str {
        match kind {
            Some(ContentKind::Code) => &self.colors.kinds.code,
            Some(ContentKind::Videos) => &self.colors.kinds.videos,
            Some(ContentKind::Papers) => &self.colors.kinds.papers,
            Some(ContentKind::Datasets) => &self.colors.kinds.datasets,
            None => &self.colors.text_dim,
        }
    }

    /// Parses `#rrggbb` (the `#` is optional); malformed input is white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns `omni-dark`.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("omni-dark").expect("Built-in omni-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["omni-dark", "omni-light"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn hex_colors_become_truecolor_escapes() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("0a0b0c"), "\u{1b}[48;2;10;11;12m");
        assert_eq!(Theme::fg("oops"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn kind_colors_fall_back_to_dim() {
        let theme = Theme::default();
        assert_eq!(theme.kind_color(Some(ContentKind::Papers)), theme.colors.kinds.papers);
        assert_eq!(theme.kind_color(None), theme.colors.text_dim);
    }

    #[test]
    fn theme_file_round_trip_and_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let toml = toml::to_string(&Theme::from_name("omni-light").unwrap()).unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        assert_eq!(Theme::from_file(file.path()).unwrap().name, "omni-light");

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        broken.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(broken.path()), Err(OmniSearchError::Theme(_))));
        assert!(matches!(Theme::from_file("/definitely/missing.toml"), Err(OmniSearchError::Theme(_))));
    }
}
