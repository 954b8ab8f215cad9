//! Composable UI component renderers.
//!
//! Each component takes the row to start at and returns the next free row,
//! so a frame is laid out top to bottom by threading the row through.
//!
//! ```text
//! row 1      (blank)
//! row 2      header
//! row 3      ─────────
//!            query box (3 rows, optional)
//!            banner (optional)
//!            canvas / results / focus body
//! rows-2     ─────────
//! rows-1     footer
//! ```

mod banner;
mod canvas;
mod empty;
mod focus;
mod footer;
mod header;
mod loading;
mod query_bar;
mod results;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenModel, UIViewModel};

use banner::render_banner;
use canvas::render_canvas;
use focus::render_focus;
use footer::render_footer;
use header::render_header;
use loading::render_loading;
use query_bar::render_query_bar;
use results::render_results;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders one complete frame.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(bar) = &vm.query_bar {
        current_row = render_query_bar(current_row, bar, theme, cols);
    }
    if let Some(message) = &vm.banner {
        current_row = render_banner(current_row, message, theme, cols);
    }

    let body_top = current_row;
    let _current_row = match &vm.screen {
        ScreenModel::Canvas(model) => render_canvas(current_row, model, theme, cols),
        ScreenModel::Results(model) => render_results(current_row, model, theme, cols),
        ScreenModel::Focus(model) => render_focus(current_row, model, theme, cols),
    };

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    if let Some(loading) = &vm.loading {
        render_loading(body_top, border_row, loading, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
