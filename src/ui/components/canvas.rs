//! Discovery canvas: recent queries and topics under the query box.

use super::empty::render_empty_state;
use crate::ui::helpers::{self, display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CanvasModel, SuggestionItem};

const MARKER_WIDTH: usize = 2;

/// Renders the section title and the suggestion list starting at `row`.
pub fn render_canvas(row: usize, model: &CanvasModel, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    let title = truncate("  Recent & trending", cols);
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(display_len(&title))));
    print!("{}", Theme::reset());

    if let Some(empty) = &model.empty_state {
        return render_empty_state(row + 1, empty, theme, cols);
    }

    let mut current_row = row + 1;
    for item in &model.suggestions {
        current_row = render_suggestion(current_row, item, theme, cols);
    }
    current_row
}

/// One suggestion, with its tag right-aligned in the kind color.
///
/// ```text
/// ▸ Climate Data                                  datasets
/// ```
fn render_suggestion(row: usize, item: &SuggestionItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("▸ ");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  ");
    }

    let tag_width = display_len(&item.tag) + 1;
    let text = truncate(&item.text, cols.saturating_sub(MARKER_WIDTH + tag_width + 2));
    helpers::render_highlighted_text(&text, &item.highlight_ranges, theme, item.is_selected);

    let used = MARKER_WIDTH + display_len(&text) + tag_width;
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    if !item.is_selected {
        print!("{}", Theme::fg(theme.kind_color(item.kind)));
    }
    print!("{} ", item.tag);

    print!("{}", Theme::reset());
    row + 1
}
