//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place that changes [`AppState`]. It takes one
//! event (a key already mapped by the plugin shim, or a worker response),
//! updates the state, and returns whether to re-render plus the actions the
//! shim should execute.
//!
//! Store operations follow one rule: the handler posts a request and changes
//! nothing locally. The matching `WorkerResponse` success applies the change
//! to the pantry; a failure is logged, shown in the status line, and leaves
//! the pantry untouched.

use crate::app::modes::InputMode;
use crate::app::state::StatusMessage;
use crate::app::{Action, AppState};
use crate::domain::{display_name, normalize_name, Result};
use crate::worker::{FailureKind, OperationFailure, WorkerMessage, WorkerResponse};

/// Events delivered to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions granted; configure the worker and load the list.
    Mount,
    /// Re-reads the list from the store.
    Reload,

    CursorDown,
    CursorUp,
    /// Selects the item under the cursor, or clears the selection if it is
    /// already selected.
    ToggleSelect,

    OpenAddForm,
    /// Opens the Update form pre-filled with the selection. No-op without one.
    OpenUpdateForm,
    /// Deletes the selected item. No-op without a selection.
    DeleteSelected,
    FocusSearch,

    /// Text input for the focused field.
    Char(char),
    Backspace,
    /// Enter in a text field: run the search or save the form.
    Submit,
    /// Esc: leave the focused field, or clear the selection in normal mode.
    Cancel,

    CloseFocus,

    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// Any user event clears the previous status message.
///
/// # Errors
///
/// Reserved for failures that cannot be expressed as a status message; none
/// of the current events produce one.
///
/// # Examples
///
/// ```
/// use pantry::{handle_event, Action, AppState, Event};
/// use pantry::storage::StoreSettings;
/// use pantry::ui::Theme;
///
/// let mut state = AppState::new(StoreSettings::default(), Theme::default());
/// let (_, actions) = handle_event(&mut state, &Event::Mount)?;
/// assert_eq!(actions.len(), 2);
/// assert!(matches!(actions[0], Action::PostToWorker(_)));
/// # Ok::<(), pantry::PantryError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let cleared_status = if matches!(event, Event::WorkerResponse(_) | Event::Mount) {
        false
    } else {
        state.status.take().is_some()
    };

    let (render, actions) = match event {
        Event::WorkerResponse(response) => handle_worker_response(state, response),
        _ => handle_user_event(state, event),
    };

    Ok((render || cleared_status, actions))
}

fn handle_user_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Mount => {
            tracing::debug!(collection = %state.settings.collection, "configuring worker and loading items");
            (
                false,
                vec![
                    Action::PostToWorker(WorkerMessage::configure(state.settings.clone())),
                    Action::PostToWorker(WorkerMessage::load_items()),
                ],
            )
        }
        Event::Reload => (false, vec![Action::PostToWorker(WorkerMessage::load_items())]),
        Event::CursorDown => {
            state.move_cursor_down();
            (true, vec![])
        }
        Event::CursorUp => {
            state.move_cursor_up();
            (true, vec![])
        }
        Event::ToggleSelect => {
            let Some(name) = state.cursor_item().map(str::to_owned) else {
                return (false, vec![]);
            };
            state.apply(|p| p.toggled(&name));
            tracing::debug!(selected = ?state.pantry.selected(), "selection toggled");
            (true, vec![])
        }
        Event::OpenAddForm => {
            if state.input_mode.is_form() {
                return (false, vec![]);
            }
            state.input_mode = InputMode::AddForm;
            (true, vec![])
        }
        Event::OpenUpdateForm => {
            if state.input_mode.is_form() {
                return (false, vec![]);
            }
            let Some(selected) = state.pantry.selected() else {
                tracing::debug!("no selection to rename");
                return (false, vec![]);
            };
            state.update_input = selected.to_string();
            state.input_mode = InputMode::UpdateForm;
            (true, vec![])
        }
        Event::DeleteSelected => {
            let Some(selected) = state.pantry.selected() else {
                tracing::debug!("no selection to delete");
                return (false, vec![]);
            };
            tracing::debug!(name = %selected, "requesting delete");
            (false, vec![Action::PostToWorker(WorkerMessage::delete_item(selected.to_string()))])
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Search;
            (true, vec![])
        }
        Event::Char(c) => match focused_buffer(state) {
            Some(buffer) => {
                buffer.push(*c);
                (true, vec![])
            }
            None => (false, vec![]),
        },
        Event::Backspace => match focused_buffer(state) {
            Some(buffer) => (buffer.pop().is_some(), vec![]),
            None => (false, vec![]),
        },
        Event::Submit => submit(state),
        Event::Cancel => cancel(state),
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::WorkerResponse(_) => (false, vec![]),
    }
}

/// The text buffer that receives typing in the current mode.
fn focused_buffer(state: &mut AppState) -> Option<&mut String> {
    match state.input_mode {
        InputMode::Normal => None,
        InputMode::Search => Some(&mut state.search_query),
        InputMode::AddForm => Some(&mut state.add_input),
        InputMode::UpdateForm => Some(&mut state.update_input),
    }
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Normal => (false, vec![]),
        InputMode::Search => {
            let query = state.search_query.trim().to_string();
            state.apply(|p| p.searched(&query));
            state.input_mode = InputMode::Normal;

            if state.pantry.selected().is_none() && !query.is_empty() {
                let hint = state.closest_item(&query).map_or_else(
                    || format!("No item named '{query}'"),
                    |closest| format!("No item named '{query}'. Closest: '{}'", display_name(closest)),
                );
                state.status = Some(StatusMessage::info(hint));
            }

            tracing::debug!(query = %query, selected = ?state.pantry.selected(), "search submitted");
            (true, vec![])
        }
        InputMode::AddForm => match normalize_name(&state.add_input) {
            Ok(name) => {
                tracing::debug!(name = %name, "requesting create");
                (false, vec![Action::PostToWorker(WorkerMessage::create_item(name))])
            }
            Err(_) => (false, vec![]),
        },
        InputMode::UpdateForm => {
            let Some(from) = state.pantry.selected().map(str::to_owned) else {
                state.input_mode = InputMode::Normal;
                return (true, vec![]);
            };
            match normalize_name(&state.update_input) {
                Ok(to) => {
                    tracing::debug!(from = %from, to = %to, "requesting rename");
                    (false, vec![Action::PostToWorker(WorkerMessage::rename_item(from, to))])
                }
                Err(_) => (false, vec![]),
            }
        }
    }
}

fn cancel(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Normal => {
            if state.pantry.selected().is_none() {
                return (false, vec![]);
            }
            state.apply(crate::app::Pantry::deselected);
            (true, vec![])
        }
        InputMode::Search | InputMode::AddForm | InputMode::UpdateForm => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::Configured { collection, location } => {
            tracing::debug!(collection = %collection, location = %location, "worker configured");
            state.location = Some(location.clone());
            (true, vec![])
        }
        WorkerResponse::ItemsLoaded { names } => {
            if state.pantry.items() == names.as_slice() {
                tracing::debug!("items unchanged, skipping render");
                return (false, vec![]);
            }
            tracing::debug!(count = names.len(), "items loaded");
            let names = names.clone();
            state.apply(|p| p.loaded(names));
            (true, vec![])
        }
        WorkerResponse::ItemCreated { name, replaced } => {
            state.apply(|p| p.created(name));
            if state.input_mode == InputMode::AddForm {
                state.input_mode = InputMode::Normal;
            }
            state.add_input.clear();

            let verb = if *replaced { "Replaced" } else { "Added" };
            state.status = Some(StatusMessage::info(format!("{verb} {}", display_name(name))));
            (true, vec![])
        }
        WorkerResponse::ItemDeleted { name } => {
            state.apply(|p| p.deleted(name));
            state.status = Some(StatusMessage::info(format!("Deleted {}", display_name(name))));
            (true, vec![])
        }
        WorkerResponse::ItemRenamed { from, to } => {
            state.apply(|p| p.renamed(from, to));
            if state.input_mode == InputMode::UpdateForm {
                state.input_mode = InputMode::Normal;
            }
            state.update_input.clear();
            state.status = Some(StatusMessage::info(format!(
                "Renamed {} to {}",
                display_name(from),
                display_name(to)
            )));
            (true, vec![])
        }
        WorkerResponse::Failed(failure) => handle_failure(state, failure),
    }
}

fn handle_failure(state: &mut AppState, failure: &OperationFailure) -> (bool, Vec<Action>) {
    tracing::warn!(
        operation = %failure.operation,
        kind = ?failure.kind,
        reason = %failure.reason,
        "store operation failed"
    );
    state.status = Some(StatusMessage::error(failure.to_string()));

    match &failure.kind {
        FailureKind::PartialRename { from, to } => {
            tracing::debug!(from = %from, to = %to, "reloading after partial rename");
            (true, vec![Action::PostToWorker(WorkerMessage::load_items())])
        }
        FailureKind::Storage | FailureKind::NotFound | FailureKind::AlreadyExists | FailureKind::Invalid => {
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreSettings;
    use crate::ui::Theme;
    use crate::worker::Operation;

    fn state_with(names: &[&str]) -> AppState {
        let mut state = AppState::new(StoreSettings::default(), Theme::default());
        let names = names.iter().map(|s| (*s).to_string()).collect();
        handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::ItemsLoaded { names })).unwrap();
        state
    }

    fn send(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            send(state, Event::Char(c));
        }
    }

    fn only_message(actions: &[Action]) -> &WorkerMessage {
        assert_eq!(actions.len(), 1, "expected one action, got {actions:?}");
        actions[0].worker_message().unwrap()
    }

    #[test]
    fn mount_configures_then_loads() {
        let mut state = AppState::new(StoreSettings::default(), Theme::default());
        let actions = send(&mut state, Event::Mount);

        assert!(matches!(actions[0].worker_message(), Some(WorkerMessage::Configure { .. })));
        assert!(matches!(actions[1].worker_message(), Some(WorkerMessage::LoadItems { .. })));
    }

    #[test]
    fn add_form_posts_trimmed_name_and_waits_for_success() {
        let mut state = state_with(&[]);
        send(&mut state, Event::OpenAddForm);
        type_text(&mut state, "  Rice ");
        let actions = send(&mut state, Event::Submit);

        assert!(matches!(only_message(&actions), WorkerMessage::CreateItem { name, .. } if name == "Rice"));
        assert!(state.pantry.is_empty());
        assert_eq!(state.input_mode, InputMode::AddForm);

        send(&mut state, Event::WorkerResponse(WorkerResponse::ItemCreated { name: "Rice".into(), replaced: false }));
        assert_eq!(state.pantry.items(), ["Rice"]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.add_input.is_empty());
    }

    #[test]
    fn blank_add_does_nothing() {
        let mut state = state_with(&[]);
        send(&mut state, Event::OpenAddForm);
        type_text(&mut state, "   ");

        assert!(send(&mut state, Event::Submit).is_empty());
        assert_eq!(state.input_mode, InputMode::AddForm);
    }

    #[test]
    fn cancelled_add_keeps_its_text() {
        let mut state = state_with(&[]);
        send(&mut state, Event::OpenAddForm);
        type_text(&mut state, "Oat");
        send(&mut state, Event::Cancel);
        send(&mut state, Event::OpenAddForm);

        assert_eq!(state.add_input, "Oat");
    }

    #[test]
    fn forms_are_exclusive() {
        let mut state = state_with(&["Rice"]);
        send(&mut state, Event::ToggleSelect);
        send(&mut state, Event::OpenAddForm);
        send(&mut state, Event::Cancel);
        send(&mut state, Event::OpenUpdateForm);
        type_text(&mut state, "!");

        assert_eq!(state.input_mode, InputMode::UpdateForm);
        assert_eq!(state.update_input, "Rice!");
        assert!(state.add_input.is_empty());
    }

    #[test]
    fn open_form_cannot_be_replaced_by_the_other() {
        let mut state = state_with(&["Rice"]);
        send(&mut state, Event::ToggleSelect);
        send(&mut state, Event::OpenUpdateForm);
        send(&mut state, Event::OpenAddForm);
        assert_eq!(state.input_mode, InputMode::UpdateForm);

        send(&mut state, Event::Cancel);
        send(&mut state, Event::OpenAddForm);
        send(&mut state, Event::OpenUpdateForm);
        assert_eq!(state.input_mode, InputMode::AddForm);
    }

    #[test]
    fn opening_a_form_leaves_search() {
        let mut state = state_with(&["Rice"]);
        send(&mut state, Event::FocusSearch);
        send(&mut state, Event::OpenAddForm);
        assert_eq!(state.input_mode, InputMode::AddForm);
    }

    #[test]
    fn delete_without_selection_is_a_no_op() {
        let mut state = state_with(&["Rice"]);
        let before = state.pantry.clone();

        let (render, actions) = handle_event(&mut state, &Event::DeleteSelected).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.pantry, before);
    }

    #[test]
    fn update_without_selection_is_a_no_op() {
        let mut state = state_with(&["Rice"]);
        assert!(send(&mut state, Event::OpenUpdateForm).is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn delete_success_clears_selection() {
        let mut state = state_with(&["Rice", "Oats"]);
        send(&mut state, Event::ToggleSelect);
        let actions = send(&mut state, Event::DeleteSelected);
        assert!(matches!(only_message(&actions), WorkerMessage::DeleteItem { name, .. } if name == "Rice"));

        send(&mut state, Event::WorkerResponse(WorkerResponse::ItemDeleted { name: "Rice".into() }));
        assert_eq!(state.pantry.items(), ["Oats"]);
        assert_eq!(state.pantry.selected(), None);
    }

    #[test]
    fn update_form_is_prefilled_and_rename_selects_new_name() {
        let mut state = state_with(&["Rice", "rice"]);
        send(&mut state, Event::ToggleSelect);
        send(&mut state, Event::OpenUpdateForm);
        assert_eq!(state.update_input, "Rice");

        for _ in 0.."Rice".len() {
            send(&mut state, Event::Backspace);
        }
        type_text(&mut state, "Brown Rice");
        let actions = send(&mut state, Event::Submit);
        assert!(matches!(
            only_message(&actions),
            WorkerMessage::RenameItem { from, to, .. } if from == "Rice" && to == "Brown Rice"
        ));

        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ItemRenamed { from: "Rice".into(), to: "Brown Rice".into() }),
        );
        assert_eq!(state.pantry.items(), ["rice", "Brown Rice"]);
        assert_eq!(state.pantry.selected(), Some("Brown Rice"));
        assert_eq!(state.cursor, 1);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn search_selects_exact_match_only() {
        let mut state = state_with(&["Milk", "Rice"]);
        send(&mut state, Event::FocusSearch);
        type_text(&mut state, "milk");
        send(&mut state, Event::Submit);
        assert_eq!(state.pantry.selected(), None);
        assert!(state.status.as_ref().is_some_and(|s| s.text.contains("Closest: 'Milk'")));

        send(&mut state, Event::FocusSearch);
        for _ in 0..4 {
            send(&mut state, Event::Backspace);
        }
        type_text(&mut state, " Rice ");
        send(&mut state, Event::Submit);
        assert_eq!(state.pantry.selected(), Some("Rice"));
        assert_eq!(state.cursor, 1);
        assert_eq!(state.search_query, " Rice ");
    }

    #[test]
    fn search_miss_clears_previous_selection() {
        let mut state = state_with(&["Milk"]);
        send(&mut state, Event::ToggleSelect);
        send(&mut state, Event::FocusSearch);
        type_text(&mut state, "Bread");
        send(&mut state, Event::Submit);
        assert_eq!(state.pantry.selected(), None);
    }

    #[test]
    fn escape_in_normal_mode_deselects() {
        let mut state = state_with(&["Milk"]);
        send(&mut state, Event::ToggleSelect);
        send(&mut state, Event::Cancel);
        assert_eq!(state.pantry.selected(), None);
    }

    #[test]
    fn typing_in_normal_mode_is_ignored() {
        let mut state = state_with(&["Milk"]);
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn failure_leaves_state_and_reports_status() {
        let mut state = state_with(&["Rice"]);
        send(&mut state, Event::OpenAddForm);
        type_text(&mut state, "Oats");
        let before = state.pantry.clone();

        let failure = OperationFailure {
            operation: Operation::Create,
            kind: FailureKind::Storage,
            reason: "disk full".into(),
        };
        let actions = send(&mut state, Event::WorkerResponse(WorkerResponse::Failed(failure)));

        assert!(actions.is_empty());
        assert_eq!(state.pantry, before);
        assert_eq!(state.input_mode, InputMode::AddForm);
        assert_eq!(state.add_input, "Oats");
        assert!(state.status.as_ref().is_some_and(|s| s.text.contains("disk full")));
    }

    #[test]
    fn partial_rename_triggers_reload() {
        let mut state = state_with(&["Rice"]);
        let failure = OperationFailure {
            operation: Operation::Rename,
            kind: FailureKind::PartialRename { from: "Rice".into(), to: "Oats".into() },
            reason: "both remain".into(),
        };
        let actions = send(&mut state, Event::WorkerResponse(WorkerResponse::Failed(failure)));

        assert!(matches!(only_message(&actions), WorkerMessage::LoadItems { .. }));
        assert_eq!(state.pantry.items(), ["Rice"]);
    }

    #[test]
    fn next_key_press_clears_status() {
        let mut state = state_with(&["Rice"]);
        send(&mut state, Event::WorkerResponse(WorkerResponse::ItemDeleted { name: "Ghost".into() }));
        assert!(state.status.is_some());

        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(render);
        assert!(state.status.is_none());
    }

    #[test]
    fn identical_reload_skips_render() {
        let mut state = state_with(&["Rice"]);
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::ItemsLoaded { names: vec!["Rice".into()] }),
        )
        .unwrap();
        assert!(!render);
    }
}
