//! Focus screen: one result in detail.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FocusModel;

const MARGIN: &str = "    ";
const LABEL_WIDTH: usize = 12;

/// Renders the detail view starting at `row`.
///
/// ```text
///     Attention Is All You Need
///     Papers · relevance 92%
///     https://arxiv.org/abs/1706.03762
///
///     The dominant sequence transduction models are based on ...
///
///          Authors  Vaswani, Shazeer, Parmar
///             Year  2017
/// ```
pub fn render_focus(row: usize, model: &FocusModel, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(MARGIN.len() * 2);
    let mut current_row = row;

    position_cursor(current_row, 1);
    print!("{MARGIN}");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate(&model.title, width));
    print!("{}", Theme::reset());
    current_row += 1;

    position_cursor(current_row, 1);
    print!("{MARGIN}");
    print!("{}", Theme::fg(theme.kind_color(model.kind)));
    print!("{}", model.kind_label);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" · relevance {}%", model.relevance);
    if model.is_fallback {
        print!("{}", Theme::fg(&theme.colors.banner_fg));
        print!(" · fallback link");
    }
    print!("{}", Theme::reset());
    current_row += 1;

    position_cursor(current_row, 1);
    print!("{MARGIN}");
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("{}", truncate(&model.url, width));
    print!("{}", Theme::reset());
    current_row += 2;

    print!("{}", Theme::fg(&theme.colors.text_normal));
    for line in &model.description {
        position_cursor(current_row, 1);
        print!("{MARGIN}{line}");
        current_row += 1;
    }
    print!("{}", Theme::reset());

    if model.fields.is_empty() {
        return current_row;
    }
    current_row += 1;

    for field in &model.fields {
        position_cursor(current_row, 1);
        print!("{MARGIN}");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{:>width$}  ", field.label, width = LABEL_WIDTH);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate(&field.value, width.saturating_sub(LABEL_WIDTH + 2)));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
