//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: capitalised names,
//! pre-computed highlight ranges, the already-windowed slice of the list.

/// Rows taken by everything except the item list: leading blank, header,
/// border, three-line search bar, status line, border, footer, trailing blank.
pub const CHROME_ROWS: usize = 10;

/// First row of the item list (1-indexed).
pub const LIST_TOP_ROW: usize = 7;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// The search bar is always shown; it only changes style with focus.
    pub search_bar: SearchBarInfo,

    /// The visible window of the list.
    pub display_items: Vec<DisplayItem>,

    /// Index in the full list of the first visible row.
    pub window_start: usize,

    /// Shown in place of the list when the pantry has no items.
    pub empty_state: Option<EmptyState>,

    /// Floating Add or Update form, when one is open.
    pub form: Option<FormInfo>,

    pub status: Option<StatusLine>,

    pub footer: FooterInfo,
}

/// One row of the item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Display name, first character uppercased and truncated to fit.
    pub name: String,

    /// The list cursor is on this row.
    pub is_cursor: bool,

    /// This item is the current selection.
    pub is_selected: bool,

    /// Character ranges to highlight while the search bar has focus.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Store location, once the worker has reported it.
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    pub focused: bool,
}

/// A floating single-field form.
#[derive(Debug, Clone)]
pub struct FormInfo {
    pub title: String,
    pub value: String,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}
