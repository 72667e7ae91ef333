//! Footer keybinding hints and the status line above them.

use crate::ui::helpers::{position_cursor, write_centered, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, StatusLine};

/// Renders the centred keybinding hints at `row`.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_centered(out, &footer.keybindings, cols);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the status line at `row`; a blank line when there is no status.
pub fn render_status(out: &mut String, row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    match status {
        Some(status) => {
            let color = if status.is_error {
                &theme.colors.status_error_fg
            } else {
                &theme.colors.status_info_fg
            };
            out.push_str(&Theme::fg(color));
            write_padded(out, &format!(" {}", status.text), cols);
            out.push_str(Theme::reset());
        }
        None => write_padded(out, "", cols),
    }
    row + 1
}
