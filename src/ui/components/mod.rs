//! Composable UI component renderers.
//!
//! - [`header`]: Title bar with item count and store location
//! - [`search`]: Sticky search box
//! - [`list`]: Item rows with cursor and selection markers
//! - [`empty`]: Message shown when the pantry has no items
//! - [`form`]: Floating Add / Update form
//! - [`footer`]: Status line and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Item rows, or empty state]      ← form floats over the top of this area
//! [Status line]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod form;
mod header;
mod list;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, LIST_TOP_ROW};

use empty::render_empty_state;
use footer::{render_footer, render_status};
use form::render_form;
use header::render_header;
use list::render_item_rows;
use search::render_search_bar;

/// Renders a horizontal rule at `row` and returns the next free row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Clears rows `from..to` so stale content from a longer list disappears.
fn clear_rows(out: &mut String, from: usize, to: usize, cols: usize) {
    for row in from..to {
        position_cursor(out, row, 1);
        out.push_str(&" ".repeat(cols));
    }
}

/// Renders the whole pane into `out`.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    debug_assert_eq!(current_row, LIST_TOP_ROW);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    let list_end = match &vm.empty_state {
        Some(empty) => render_empty_state(out, current_row, empty, theme, cols),
        None => render_item_rows(out, current_row, &vm.display_items, theme, cols),
    };
    clear_rows(out, list_end, status_row, cols);

    if let Some(form) = &vm.form {
        render_form(out, LIST_TOP_ROW + 1, form, theme, cols);
    }

    render_status(out, status_row, vm.status.as_ref(), theme, cols);
    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
