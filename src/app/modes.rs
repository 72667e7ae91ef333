//! Input mode state machine.
//!
//! Exactly one mode owns the keyboard at a time. The two forms are never open
//! together: opening a form from Normal or Search takes over the keyboard,
//! while opening one with the other form already open is ignored. Each form
//! keeps its own text buffer in [`crate::app::AppState`].
//!
//! ```text
//!            /              a                u (with selection)
//!   Search <──── Normal ──────> AddForm   Normal ──────> UpdateForm
//!          ────>        <──────                  <──────
//!        Esc/Enter      Esc / saved            Esc / saved
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// List navigation and commands.
    ///
    /// j/k move, Space toggles selection, a/u/d act, / searches, q quits.
    #[default]
    Normal,

    /// Typing into the sticky search bar. Enter submits the query.
    Search,

    /// The floating Add form has focus.
    AddForm,

    /// The floating Update form has focus, pre-filled with the selected name.
    UpdateForm,
}

impl InputMode {
    /// Whether keystrokes are text input rather than commands.
    #[must_use]
    pub const fn is_text_entry(self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Whether a floating form is open.
    #[must_use]
    pub const fn is_form(self) -> bool {
        matches!(self, Self::AddForm | Self::UpdateForm)
    }
}
