//! Top-level rendering entry point.
//!
//! Rendering is a pure function of the view model: nothing here reads or
//! mutates application state beyond computing the view model once per frame.

use crate::app::AppState;
use crate::ui::components;

/// Renders the current state to stdout for a `rows` × `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, &state.theme, rows, cols);
}
