//! Results screen: filter bar and the windowed result list.

use super::empty::render_empty_state;
use crate::ui::helpers::{display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterChip, ResultRow, ResultsModel};

const MARKER_WIDTH: usize = 2;
const GLYPH_WIDTH: usize = 3;

/// Renders the filter bar, a blank line, then the rows, starting at `row`.
pub fn render_results(row: usize, model: &ResultsModel, theme: &Theme, cols: usize) -> usize {
    render_filter_bar(row, &model.chips, &model.position, theme, cols);

    if let Some(empty) = &model.empty_state {
        return render_empty_state(row + 2, empty, theme, cols);
    }

    let mut current_row = row + 2;
    for item in &model.rows {
        current_row = render_result_row(current_row, item, theme, cols);
    }
    current_row
}

/// ```text
///  [0] All (12)  [1] Code (4)  [2] Videos (3)  [3] Papers (5)  [4] Datasets (0)     3/12
/// ```
fn render_filter_bar(row: usize, chips: &[FilterChip], position: &str, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!(" ");
    let mut used = 1;

    for chip in chips {
        let text = format!("[{}] {}", chip.hotkey, chip.label);
        let width = display_len(&text) + 2;
        if used + width + display_len(position) > cols {
            break;
        }

        if chip.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(theme.kind_color(chip.kind)));
        }
        print!("{text}");
        print!("{}", Theme::reset());
        print!("  ");
        used += width;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used + display_len(position) + 1)));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{position} ");
    print!("{}", Theme::reset());
}

/// One result line: marker, kind glyph, title, then badge and relevance on
/// the right.
fn render_result_row(row: usize, item: &ResultRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let right = match &item.badge {
        Some(badge) => format!("{badge}  {:>3}% ", item.relevance),
        None => format!("{:>3}% ", item.relevance),
    };
    let right_len = display_len(&right);
    let title = truncate(&item.title, cols.saturating_sub(MARKER_WIDTH + GLYPH_WIDTH + right_len + 2));

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("▸ ");
    } else {
        print!("  ");
        print!("{}", Theme::fg(theme.kind_color(item.kind)));
    }

    let glyph = truncate(&item.glyph, GLYPH_WIDTH - 1);
    print!("{glyph}{}", " ".repeat(GLYPH_WIDTH - display_len(&glyph)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{title}");

    let used = MARKER_WIDTH + GLYPH_WIDTH + display_len(&title) + right_len;
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{right}");

    print!("{}", Theme::reset());
    row + 1
}
