//! Shared rendering utilities.
//!
//! Components draw into a `String` frame rather than straight to stdout, so a
//! whole frame can be inspected in tests and printed in one go by the plugin.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Writes `text` padded with spaces to exactly `width` characters,
/// truncating if it is longer.
pub fn write_padded(out: &mut String, text: &str, width: usize) {
    let len = text.chars().count();
    if len > width {
        out.extend(text.chars().take(width));
    } else {
        out.push_str(text);
        out.push_str(&" ".repeat(width - len));
    }
}

/// Writes `text` centred in a line of `width` characters.
pub fn write_centered(out: &mut String, text: &str, width: usize) {
    let len = text.chars().count().min(width);
    let left = (width - len) / 2;
    out.push_str(&" ".repeat(left));
    write_padded(out, text, width - left);
}

/// Writes `text` with fuzzy-match ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlights are
/// skipped on the cursor row so they do not fight with its background; after
/// each highlight the row colors in `restore` are re-applied.
pub fn render_highlighted_text(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_counts_characters_not_bytes() {
        let mut out = String::new();
        write_padded(&mut out, "Épices", 8);
        assert_eq!(out, "Épices  ");

        out.clear();
        write_padded(&mut out, "Brown Rice", 5);
        assert_eq!(out, "Brown");
    }

    #[test]
    fn centred_text_fills_the_line() {
        let mut out = String::new();
        write_centered(&mut out, "ab", 6);
        assert_eq!(out, "  ab  ");
    }

    #[test]
    fn highlights_wrap_only_matched_characters() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Rice", &[(1, 3), (10, 12)], &theme, "");

        let plain: String = strip_escapes(&out);
        assert_eq!(plain, "Rice");
        assert!(out.starts_with('R'));
        assert!(out.ends_with('e'));
    }

    fn strip_escapes(s: &str) -> String {
        let mut plain = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, 'm') => in_escape = false,
                (true, _) => {}
                (false, c) => plain.push(c),
            }
        }
        plain
    }
}
