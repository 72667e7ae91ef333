//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for everything the plugin pane
//! shows: the [`Pantry`] value, the list cursor, the active input mode, the
//! text buffers of the search bar and both forms, and the last status
//! message. The renderer never reads it directly; it goes through
//! [`AppState::compute_viewmodel`].

use super::modes::InputMode;
use super::pantry::Pantry;
use crate::domain::display_name;
use crate::storage::StoreSettings;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, FormInfo, HeaderInfo, SearchBarInfo, StatusLine, UIViewModel, CHROME_ROWS,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback shown above the footer until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Item list and selection, changed only on confirmed store operations.
    pub pantry: Pantry,

    /// Index of the highlighted row in `pantry.items()`.
    pub cursor: usize,

    pub input_mode: InputMode,

    /// Sticky search bar text. Kept when the bar loses focus.
    pub search_query: String,

    /// Add form buffer. Cancelling the form keeps it.
    pub add_input: String,

    /// Update form buffer, refilled from the selection on every open.
    pub update_input: String,

    pub status: Option<StatusMessage>,

    pub theme: Theme,

    /// Store settings sent to the worker on mount.
    pub settings: StoreSettings,

    /// Where the worker reports the data lives, once configured.
    pub location: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(settings: StoreSettings, theme: Theme) -> Self {
        Self {
            pantry: Pantry::new(),
            cursor: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            add_input: String::new(),
            update_input: String::new(),
            status: None,
            theme,
            settings,
            location: None,
        }
    }

    /// Replaces the pantry with the result of a transition and re-anchors
    /// the cursor.
    pub fn apply<F>(&mut self, transition: F)
    where
        F: FnOnce(Pantry) -> Pantry,
    {
        let before = self.pantry.selected().map(str::to_owned);
        self.pantry = transition(std::mem::take(&mut self.pantry));

        if self.pantry.selected() != before.as_deref() {
            self.snap_cursor_to_selection();
        }
        self.clamp_cursor();
    }

    /// Moves the cursor onto the selected item, if there is one.
    pub fn snap_cursor_to_selection(&mut self) {
        if let Some(index) = self.pantry.selected_position() {
            tracing::trace!(index, "cursor snapped to selection");
            self.cursor = index;
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.pantry.len().saturating_sub(1));
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        if self.pantry.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.pantry.len();
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        if self.pantry.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.pantry.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Name of the item under the cursor.
    #[must_use]
    pub fn cursor_item(&self) -> Option<&str> {
        self.pantry.items().get(self.cursor).map(String::as_str)
    }

    /// The listed name closest to `query` by fuzzy score, for "did you mean"
    /// hints. Never used to select anything.
    #[must_use]
    pub fn closest_item(&self, query: &str) -> Option<&str> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        self.pantry
            .items()
            .iter()
            .filter_map(|name| matcher.fuzzy_match(name, query).map(|score| (score, name)))
            .max_by_key(|(score, _)| *score)
            .map(|(_, name)| name.as_str())
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// The visible window of the list is centred on the cursor, and so on the
    /// selection whenever one exists, and pinned at the ends so it never
    /// shows blank rows while items remain above.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let items = self.pantry.items();

        let mut window_start = self.cursor.saturating_sub(available_rows / 2);
        let window_end = (window_start + available_rows).min(items.len());
        if window_end - window_start < available_rows && items.len() >= available_rows {
            window_start = window_end.saturating_sub(available_rows);
        }

        let matcher = (self.input_mode == InputMode::Search && !self.search_query.trim().is_empty())
            .then(SkimMatcherV2::default);

        let display_items = items
            .get(window_start..window_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(offset, name)| self.compute_display_item(name, window_start + offset, cols, matcher.as_ref()))
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search_query.clone(),
                focused: self.input_mode == InputMode::Search,
            },
            display_items,
            window_start,
            empty_state: self.compute_empty_state(),
            form: self.compute_form(),
            status: self.status.as_ref().map(|status| StatusLine {
                text: status.text.clone(),
                is_error: status.kind == StatusKind::Error,
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        name: &str,
        index: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        const ROW_PREFIX: usize = 4;

        let full = display_name(name);
        let max_width = cols.saturating_sub(ROW_PREFIX + 1).max(1);
        let (shown, visible) = if full.chars().count() > max_width {
            let visible = max_width.saturating_sub(1);
            let mut truncated: String = full.chars().take(visible).collect();
            truncated.push('…');
            (truncated, visible)
        } else {
            let visible = full.chars().count();
            (full.clone(), visible)
        };

        // Indices refer to the capitalised text the row actually shows.
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            m.fuzzy_indices(&full, self.search_query.trim())
                .map(|(_, indices)| {
                    let indices: Vec<usize> = indices.into_iter().filter(|&i| i < visible).collect();
                    coalesce_ranges(&indices)
                })
                .unwrap_or_default()
        });

        DisplayItem {
            name: shown,
            is_cursor: index == self.cursor,
            is_selected: self.pantry.selected() == Some(name),
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(" {} ({}) ", self.settings.collection, self.pantry.len()),
            location: self.location.clone(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        self.pantry.is_empty().then(|| EmptyState {
            message: "The pantry is empty".to_string(),
            subtitle: "Press 'a' to add an item".to_string(),
        })
    }

    fn compute_form(&self) -> Option<FormInfo> {
        match self.input_mode {
            InputMode::AddForm => Some(FormInfo {
                title: " Add item ".to_string(),
                value: self.add_input.clone(),
                hint: "Enter: add  Esc: cancel".to_string(),
            }),
            InputMode::UpdateForm => Some(FormInfo {
                title: format!(" Rename {} ", self.pantry.selected().map(display_name).unwrap_or_default()),
                value: self.update_input.clone(),
                hint: "Enter: rename  Esc: cancel".to_string(),
            }),
            InputMode::Normal | InputMode::Search => None,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal if self.pantry.selected().is_some() => {
                "j/k: move  Space: select  a: add  u: rename  d: delete  /: search  Esc: deselect  q: quit"
            }
            InputMode::Normal => "j/k: move  Space: select  a: add  /: search  r: reload  q: quit",
            InputMode::Search => "Type to search  Enter: find exact name  Esc: back to list",
            InputMode::AddForm | InputMode::UpdateForm => "Type a name  Enter: save  Esc: cancel",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Collapses sorted character indices into `(start, end)` runs.
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(names: &[&str]) -> AppState {
        let mut state = AppState::new(StoreSettings::default(), Theme::default());
        state.apply(|p| p.loaded(names.iter().map(|s| (*s).to_string()).collect()));
        state
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = state_with(&["a", "b", "c"]);
        state.move_cursor_up();
        assert_eq!(state.cursor, 2);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn selection_pulls_the_cursor() {
        let mut state = state_with(&["a", "b", "c"]);
        state.apply(|p| p.searched("c"));
        assert_eq!(state.cursor, 2);
        assert_eq!(state.cursor_item(), Some("c"));
    }

    #[test]
    fn cursor_stays_in_bounds_after_removal() {
        let mut state = state_with(&["a", "b"]);
        state.cursor = 1;
        state.apply(|p| p.deleted("b"));
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn window_is_centred_on_the_selection() {
        let names: Vec<String> = (0..50).map(|i| format!("item{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.apply(|p| p.searched("item25"));

        let vm = state.compute_viewmodel(20, 80);
        let visible = vm.display_items.len();
        assert_eq!(visible, 10);
        assert_eq!(vm.window_start, 20);
        let cursor_row = vm.display_items.iter().position(|i| i.is_cursor).unwrap();
        assert_eq!(cursor_row, visible / 2);
        assert!(vm.display_items[cursor_row].is_selected);
    }

    #[test]
    fn window_is_pinned_at_the_end() {
        let names: Vec<String> = (0..30).map(|i| format!("n{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.cursor = 29;

        let vm = state.compute_viewmodel(20, 80);
        assert_eq!(vm.window_start, 20);
        assert_eq!(vm.display_items.len(), 10);
    }

    #[test]
    fn names_are_shown_capitalised() {
        let state = state_with(&["rice"]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items[0].name, "Rice");
    }

    #[test]
    fn highlights_index_the_shown_name() {
        let mut state = state_with(&["ßrot"]);
        state.input_mode = InputMode::Search;
        state.search_query = "rot".to_string();

        let item = &state.compute_viewmodel(24, 80).display_items[0];
        assert_eq!(item.name, "SSrot");
        assert_eq!(item.highlight_ranges, vec![(2, 5)]);
    }

    #[test]
    fn highlights_stop_at_the_truncation() {
        let mut state = state_with(&["oats and barley"]);
        state.input_mode = InputMode::Search;
        state.search_query = "barley".to_string();

        let item = &state.compute_viewmodel(24, 10).display_items[0];
        assert_eq!(item.name, "Oats…");
        assert!(item.highlight_ranges.iter().all(|&(_, end)| end <= 4));
    }

    #[test]
    fn empty_pantry_has_an_empty_state() {
        let state = state_with(&[]);
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.empty_state.is_some());
        assert!(vm.display_items.is_empty());
    }

    #[test]
    fn closest_item_is_a_hint_only() {
        let state = state_with(&["Brown Rice", "Oats"]);
        assert_eq!(state.closest_item("rice"), Some("Brown Rice"));
        assert_eq!(state.closest_item("zzz"), None);
        assert_eq!(state.pantry.selected(), None);
    }

    #[test]
    fn ranges_coalesce() {
        assert_eq!(coalesce_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce_ranges(&[]).is_empty());
    }
}
