//! Zellij plugin entry point.
//!
//! Everything that touches `zellij-tile` lives here: plugin and worker
//! registration, mapping Zellij events to [`Event`]s, and executing the
//! [`Action`]s the handler returns. The library below stays host-agnostic.
//!
//! ```text
//! ┌──────────────────────────┐   WorkerMessage (JSON)   ┌──────────────────────┐
//! │ State (plugin thread)    │ ───────────────────────► │ PantryWorkerShim     │
//! │  key → Event → handler   │                          │  PantryWorker        │
//! │                          │ ◄─────────────────────── │  DocumentStore       │
//! └──────────────────────────┘   WorkerResponse (JSON)  └──────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Everywhere: `Ctrl+n` / `Ctrl+p` move the cursor.
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: move
//! - `Space`/`Enter`: select or deselect the item under the cursor
//! - `a`: add, `u`: rename the selection, `d`: delete the selection
//! - `/`: focus search, `r`: reload, `Esc`: deselect, `q`: hide
//!
//! Search bar and forms: type to edit, `Enter` submits, `Esc` leaves.

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use pantry::worker::{PantryWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use pantry::{handle_event, Action, AppState, Config, Event, InputMode};

register_plugin!(State);
register_worker!(PantryWorkerShim, pantry_worker, PANTRY_WORKER);

struct State {
    app: AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: pantry::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        pantry::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(store = ?config.store, "parsed configuration");

        self.app = pantry::initialize(&config);

        request_permission(&[PermissionType::ChangeApplicationState, PermissionType::FullHdAccess]);
        subscribe(&[EventType::Key, EventType::CustomMessage, EventType::PermissionRequestResult]);

        tracing::debug!("plugin loaded, waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let _span = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted, mounting");
                Event::Mount
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied, the pantry cannot reach its store");
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        pantry::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(name, _) => format!("CustomMessage({name})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::CursorDown),
                BareKey::Char('p') => Some(Event::CursorUp),
                _ => None,
            };
        }

        if self.app.input_mode.is_text_entry() {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Cancel,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        debug_assert_eq!(self.app.input_mode, InputMode::Normal);
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Enter | BareKey::Char(' ') => Event::ToggleSelect,
            BareKey::Char('a') => Event::OpenAddForm,
            BareKey::Char('u') => Event::OpenUpdateForm,
            BareKey::Char('d') => Event::DeleteSelected,
            BareKey::Char('/') => Event::FocusSearch,
            BareKey::Char('r') => Event::Reload,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Cancel,
            _ => return None,
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Zellij-facing wrapper that runs [`PantryWorker`] on the worker thread.
#[derive(Default, Serialize, Deserialize)]
struct PantryWorkerShim(PantryWorker);

impl ZellijWorker<'_> for PantryWorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            pantry::observability::init_tracing(&Config::default());
        }

        let reply = self.0.handle_payload(&payload);
        if reply.is_empty() {
            return;
        }

        post_message_to_plugin(PluginMessage {
            name: message,
            payload: reply,
            worker_name: None,
        });
    }
}
