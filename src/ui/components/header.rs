//! Header bar: collection name, item count and store location.

use crate::ui::helpers::{position_cursor, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// The title is centred; the store location, when known, is right-aligned
/// in dim text if it fits beside the title.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&header.title);

    let remaining = cols.saturating_sub(padding + title_len);
    match &header.location {
        Some(location) if location.chars().count() + 2 <= remaining => {
            let location_len = location.chars().count();
            out.push_str(&" ".repeat(remaining - location_len - 1));
            out.push_str(Theme::dim());
            out.push_str(location);
            out.push(' ');
        }
        _ => write_padded(out, "", remaining),
    }

    out.push_str(Theme::reset());
    row + 1
}
