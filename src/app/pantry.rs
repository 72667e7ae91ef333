//! In-memory pantry list and selection.
//!
//! [`Pantry`] is a plain value. Each transition consumes the current state and
//! returns the next one, so every rule here is testable without a UI or a
//! store. The list is only ever changed after the store confirmed the
//! operation; the handler calls these transitions on worker responses.

/// Item names in display order plus the current selection.
///
/// Invariants:
/// - `items` holds no duplicate names
/// - `selected`, when set, names an item in `items` (search and toggle only
///   select listed names; delete and reload drop stale selections)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pantry {
    items: Vec<String>,
    selected: Option<String>,
}

impl Pantry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item == name)
    }

    /// Position of `name` in the list.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item == name)
    }

    /// Position of the selected item, if any.
    #[must_use]
    pub fn selected_position(&self) -> Option<usize> {
        self.selected.as_deref().and_then(|name| self.position(name))
    }

    /// Replaces the list with a fresh read from the store.
    ///
    /// Duplicate names collapse to their first occurrence. The selection
    /// survives only if the item is still present.
    #[must_use]
    pub fn loaded(self, names: Vec<String>) -> Self {
        let mut items: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !items.contains(&name) {
                items.push(name);
            }
        }

        let selected = self.selected.filter(|name| items.contains(name));
        Self { items, selected }
    }

    /// Appends a newly stored item. An overwrite of an existing item leaves
    /// the list unchanged.
    #[must_use]
    pub fn created(mut self, name: &str) -> Self {
        if !self.contains(name) {
            self.items.push(name.to_string());
        }
        self
    }

    /// Removes one occurrence of `name` and clears the selection.
    #[must_use]
    pub fn deleted(mut self, name: &str) -> Self {
        if let Some(index) = self.position(name) {
            self.items.remove(index);
        }
        self.selected = None;
        self
    }

    /// Drops `from`, appends `to` and selects it.
    #[must_use]
    pub fn renamed(mut self, from: &str, to: &str) -> Self {
        if from != to {
            if let Some(index) = self.position(from) {
                self.items.remove(index);
            }
        }
        if !self.contains(to) {
            self.items.push(to.to_string());
        }
        self.selected = Some(to.to_string());
        self
    }

    /// Selects `name`, or clears the selection if `name` is already selected.
    /// Names not in the list are ignored.
    #[must_use]
    pub fn toggled(mut self, name: &str) -> Self {
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        } else if self.contains(name) {
            self.selected = Some(name.to_string());
        }
        self
    }

    /// Selects the item whose name equals the trimmed query exactly
    /// (case-sensitive). No match clears the selection.
    #[must_use]
    pub fn searched(mut self, query: &str) -> Self {
        let query = query.trim();
        self.selected = self.items.iter().find(|item| item.as_str() == query).cloned();
        self
    }

    /// Clears the selection.
    #[must_use]
    pub fn deselected(mut self) -> Self {
        self.selected = None;
        self
    }
}
