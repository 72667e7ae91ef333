//! Sticky search bar.

use crate::ui::helpers::{position_cursor, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin on each side of the search box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the three-line search box at `row` and returns the next free row.
///
/// ```text
/// ┌──────────────────────┐
/// │ Search: brown rice▏  │
/// └──────────────────────┘
/// ```
///
/// The border takes the focus color and a caret is drawn while the bar has
/// focus. An unfocused, empty bar shows a dim placeholder.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(out, row, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    if search.query.is_empty() && !search.focused {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        write_padded(out, " Search: press / to find an item by name", inner_width);
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        let caret = if search.focused { "▏" } else { "" };
        write_padded(out, &format!(" Search: {}{caret}", search.query), inner_width);
    }
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
