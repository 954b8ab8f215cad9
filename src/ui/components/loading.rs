//! Loading overlay drawn over the body while a search is in flight.

use crate::ui::helpers::{display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoadingInfo;

/// Draws a small box centered between `top` and `bottom` (exclusive).
pub fn render_loading(top: usize, bottom: usize, loading: &LoadingInfo, theme: &Theme, cols: usize) {
    let message = truncate(&format!(" Searching for \"{}\"... ", loading.query), cols.saturating_sub(4));
    let inner_width = display_len(&message);
    let left = cols.saturating_sub(inner_width + 2) / 2 + 1;
    let middle = top + bottom.saturating_sub(top) / 2;
    let first = middle.saturating_sub(1).max(top);

    print!("{}", Theme::fg(&theme.colors.loading_fg));

    position_cursor(first, left);
    print!("┌{}┐", "─".repeat(inner_width));
    position_cursor(first + 1, left);
    print!("│{}{message}{}", Theme::bold(), Theme::reset());
    print!("{}│", Theme::fg(&theme.colors.loading_fg));
    position_cursor(first + 2, left);
    print!("└{}┘", "─".repeat(inner_width));

    print!("{}", Theme::reset());
}
