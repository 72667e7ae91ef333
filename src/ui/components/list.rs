//! Pantry item list.

use crate::ui::helpers::{self, position_cursor, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders every visible item starting at `row` and returns the next free row.
pub fn render_item_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |current_row, item| render_item_row(out, current_row, item, theme, cols))
}

/// One row: cursor pointer, selection marker, then the name.
///
/// ```text
/// ▸ ● Brown Rice
///     Oats
/// ```
///
/// The cursor row is painted across the full width with the cursor colors.
/// Search highlights are drawn on every other row.
fn render_item_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let row_colors = if item.is_cursor {
        format!("{}{}", Theme::fg(&theme.colors.cursor_fg), Theme::bg(&theme.colors.cursor_bg))
    } else if item.is_selected {
        Theme::fg(&theme.colors.selected_fg)
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(out, row, 1);
    out.push_str(&row_colors);
    out.push_str(if item.is_cursor { "▸ " } else { "  " });
    out.push_str(if item.is_selected { "● " } else { "  " });

    if item.is_cursor {
        out.push_str(Theme::bold());
        out.push_str(&item.name);
    } else {
        helpers::render_highlighted_text(out, &item.name, &item.highlight_ranges, theme, &row_colors);
    }

    let used = 4 + item.name.chars().count();
    write_padded(out, "", cols.saturating_sub(used));
    out.push_str(Theme::reset());
    row + 1
}
