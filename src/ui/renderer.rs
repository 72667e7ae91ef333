//! Top-level rendering entry points.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin pane to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders one full frame as an ANSI string.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = String::with_capacity(rows * cols * 2);
    components::render_frame(&mut frame, &viewmodel, &state.theme, cols, rows);
    frame
}
