//! One-line failure notice.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;

pub fn render_banner(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.banner_fg));
    print_centered(&format!("! {message}"), cols);
    print!("{}", Theme::reset());
    row + 1
}
