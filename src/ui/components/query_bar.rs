//! Boxed query input.

use crate::ui::helpers::{display_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::QueryBarInfo;

const QUERY_BOX_MARGIN: usize = 5;

/// Renders the three-line query box starting at `row`.
///
/// ```text
///      ┌──────────────────────────────┐
///      │ Search: climate data▏        │
///      └──────────────────────────────┘
/// ```
///
/// The text keeps its tail visible when it is wider than the box.
pub fn render_query_bar(row: usize, bar: &QueryBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(QUERY_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(QUERY_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let caret = if bar.active { "▏" } else { "" };
    let prefix = " Search: ";
    let room = inner_width.saturating_sub(display_len(prefix) + display_len(caret));
    let query_len = display_len(&bar.query);
    let shown: String = bar.query.chars().skip(query_len.saturating_sub(room)).collect();

    let search_text = format!("{prefix}{shown}{caret}");
    let padding = inner_width.saturating_sub(display_len(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(QUERY_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(QUERY_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
