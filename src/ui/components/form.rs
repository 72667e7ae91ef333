//! Floating single-field form used for both Add and Update.

use crate::ui::helpers::{position_cursor, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormInfo;

const MAX_FORM_WIDTH: usize = 48;
const MIN_FORM_WIDTH: usize = 16;

/// Draws the form as a bordered box over whatever is at `row`.
///
/// ```text
///       ┌ Add item ──────────────┐
///       │ > Brown Rice▏          │
///       │ Enter: add  Esc: cancel│
///       └────────────────────────┘
/// ```
pub fn render_form(out: &mut String, row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(4).clamp(MIN_FORM_WIDTH, MAX_FORM_WIDTH);
    let inner_width = width - 2;
    let left = cols.saturating_sub(width) / 2 + 1;
    let border = Theme::fg(&theme.colors.form_border);

    position_cursor(out, row, left);
    out.push_str(&border);
    out.push('┌');
    out.push_str(Theme::bold());
    write_padded(out, &form.title, inner_width.min(form.title.chars().count()));
    out.push_str(Theme::reset());
    out.push_str(&border);
    out.push_str(&"─".repeat(inner_width.saturating_sub(form.title.chars().count())));
    out.push('┐');

    let field_line = format!(" > {}▏", form.value);
    let field_len = field_line.chars().count();
    let field_line = if field_len > inner_width {
        // Keep the end of long input visible, where the caret is.
        field_line.chars().skip(field_len - inner_width).collect()
    } else {
        field_line
    };

    position_cursor(out, row + 1, left);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    write_padded(out, &field_line, inner_width);
    out.push_str(&border);
    out.push('│');

    position_cursor(out, row + 2, left);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_padded(out, &format!(" {}", form.hint), inner_width);
    out.push_str(&border);
    out.push('│');

    position_cursor(out, row + 3, left);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 4
}
