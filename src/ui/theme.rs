//! Color schemes and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two ship with the plugin (`pantry-dark`, the
//! default, and `pantry-light`); a custom file can be supplied with the
//! `theme_file` option.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0def4"
//! cursor_fg = "#191724"
//! cursor_bg = "#c4a7e7"
//! selected_fg = "#9ccfd8"
//! text_normal = "#e0def4"
//! text_dim = "#6e6a86"
//! border = "#403d52"
//! search_bar_border = "#524f67"
//! search_bar_focus = "#c4a7e7"
//! form_border = "#f6c177"
//! match_highlight_fg = "#191724"
//! match_highlight_bg = "#f6c177"
//! empty_state_fg = "#31748f"
//! status_info_fg = "#9ccfd8"
//! status_error_fg = "#eb6f92"
//! ```

use crate::domain::error::{PantryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when nothing else is configured.
pub const DEFAULT_THEME: &str = "pantry-dark";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Row under the list cursor.
    pub cursor_fg: String,
    pub cursor_bg: String,

    /// Marker and name of the selected item.
    pub selected_fg: String,

    pub text_normal: String,
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    /// Search bar border while it has focus.
    pub search_bar_focus: String,

    pub form_border: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub status_info_fg: String,
    pub status_error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, `None` if the name is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::ui::Theme;
    ///
    /// let theme = Theme::from_name("pantry-light").unwrap();
    /// assert_eq!(theme.name, "pantry-light");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "pantry-dark" => include_str!("../../themes/pantry-dark.toml"),
            "pantry-light" => include_str!("../../themes/pantry-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| PantryError::Theme(format!("failed to read {}: {e}", path.as_ref().display())))?;

        toml::from_str(&contents).map_err(|e| PantryError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; anything malformed renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The built-in `pantry-dark` theme.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme file fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("bundled pantry-dark theme should always parse")
    }
}
