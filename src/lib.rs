//! Pantry: a Zellij plugin for keeping a pantry inventory.
//!
//! Items live in a document store as one document per item, keyed by name.
//! The plugin pane lists them and lets you add, rename, delete and find
//! items by exact name. Store I/O runs on a Zellij worker thread, so the pane
//! never blocks on disk.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  key mapping, IPC
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Pantry value (items + selection)                 │
//! │  - Event handling, input modes                      │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Storage Layer │
//! │ (ui/)         │   │ (worker/)     │──►│ (storage/)    │
//! │ - Rendering   │   │ - Protocol    │   │ - Doc store   │
//! │ - Themes      │   │ - Dispatch    │   │ - JSON/memory │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  domain/ (item rules, errors)  infrastructure/      │
//! │  observability/ (OpenTelemetry file export)         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/pantry.wasm" {
//!         collection "Pantry"
//!         backend "json"
//!         store_path "~/.local/share/pantry/pantry.json"
//!         on_duplicate "overwrite"
//!         rename_mode "transactional"
//!         theme "pantry-dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::VecDeque;
//! use pantry::storage::MemoryDocumentStore;
//! use pantry::worker::PantryWorker;
//! use pantry::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config::default();
//! let mut state = initialize(&config);
//! let mut worker = PantryWorker::with_store(config.store.clone(), Box::new(MemoryDocumentStore::new()));
//!
//! let mut pending: VecDeque<Action> = handle_event(&mut state, &Event::Mount)?.1.into();
//! while let Some(Action::PostToWorker(message)) = pending.pop_front() {
//!     let response = worker.handle_message(message);
//!     pending.extend(handle_event(&mut state, &Event::WorkerResponse(response))?.1);
//! }
//! assert!(state.pantry.is_empty());
//! # Ok::<(), pantry::PantryError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Pantry};
pub use domain::{PantryError, PantryItem, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use storage::{BackendKind, DuplicatePolicy, RenameMode, StoreSettings};

/// Plugin configuration parsed from the Zellij plugin block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Store backend, collection and write policies. Sent to the worker.
    pub store: StoreSettings,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Missing keys and unrecognised values keep their defaults.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use pantry::storage::{BackendKind, RenameMode};
    /// use pantry::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("backend".to_string(), "memory".to_string()),
    ///     ("rename_mode".to_string(), "two-step".to_string()),
    ///     ("collection".to_string(), "Larder".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.store.backend, BackendKind::Memory);
    /// assert_eq!(config.store.rename_mode, RenameMode::TwoStep);
    /// assert_eq!(config.store.collection, "Larder");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let mut store = StoreSettings::default();

        if let Some(collection) = non_empty(config, "collection") {
            store.collection = collection.to_string();
        }
        if let Some(value) = non_empty(config, "backend") {
            store.backend = parse_or_default("backend", value, BackendKind::parse);
        }
        store.store_path = non_empty(config, "store_path").map(String::from);
        if let Some(value) = non_empty(config, "on_duplicate") {
            store.on_duplicate = parse_or_default("on_duplicate", value, DuplicatePolicy::parse);
        }
        if let Some(value) = non_empty(config, "rename_mode") {
            store.rename_mode = parse_or_default("rename_mode", value, RenameMode::parse);
        }

        Self {
            store,
            theme_name: non_empty(config, "theme").map(String::from),
            theme_file: non_empty(config, "theme_file").map(String::from),
            trace_level: non_empty(config, "trace_level").map(String::from),
        }
    }
}

fn non_empty<'a>(config: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_or_default<T: Default>(key: &str, value: &str, parse: fn(&str) -> Option<T>) -> T {
    parse(value).unwrap_or_else(|| {
        tracing::debug!(key, value, "unrecognised config value, using default");
        T::default()
    })
}

/// Builds the initial application state.
///
/// The theme comes from `theme_file`, then `theme`, then the built-in
/// default; a theme that fails to load falls through to the default.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(collection = %config.store.collection, "initializing pantry plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.store.clone(), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.store.collection, "Pantry");
        assert_eq!(config.store.on_duplicate, DuplicatePolicy::Overwrite);
        assert_eq!(config.store.rename_mode, RenameMode::Transactional);
    }

    #[test]
    fn unknown_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("backend", "postgres"),
            ("on_duplicate", "merge"),
            ("collection", "   "),
        ]));
        assert_eq!(config.store.backend, BackendKind::Json);
        assert_eq!(config.store.on_duplicate, DuplicatePolicy::Overwrite);
        assert_eq!(config.store.collection, "Pantry");
    }

    #[test]
    fn all_options_are_read() {
        let config = Config::from_zellij(&map(&[
            ("store_path", "~/pantry.json"),
            ("on_duplicate", "reject"),
            ("theme", "pantry-light"),
            ("theme_file", "/tmp/theme.toml"),
            ("trace_level", "debug"),
        ]));
        assert_eq!(config.store.store_path.as_deref(), Some("~/pantry.json"));
        assert_eq!(config.store.on_duplicate, DuplicatePolicy::Reject);
        assert_eq!(config.theme_name.as_deref(), Some("pantry-light"));
        assert_eq!(config.theme_file.as_deref(), Some("/tmp/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn theme_resolution_falls_back_to_default() {
        let light = Config {
            theme_name: Some("pantry-light".into()),
            ..Config::default()
        };
        assert_eq!(initialize(&light).theme.name, "pantry-light");

        let missing_file = Config {
            theme_name: Some("pantry-light".into()),
            theme_file: Some("/nonexistent/theme.toml".into()),
            ..Config::default()
        };
        assert_eq!(initialize(&missing_file).theme.name, "pantry-dark");

        let unknown = Config {
            theme_name: Some("solarized".into()),
            ..Config::default()
        };
        assert_eq!(initialize(&unknown).theme.name, "pantry-dark");
    }

    #[test]
    fn initial_state_carries_store_settings() {
        let config = Config::from_zellij(&map(&[("collection", "Larder")]));
        let state = initialize(&config);
        assert_eq!(state.settings.collection, "Larder");
        assert!(state.pantry.is_empty());
    }
}
