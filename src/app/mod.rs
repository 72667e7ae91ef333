//! Application layer: state, events and the actions they produce.
//!
//! ```text
//! key press ──► Event ──► handle_event ──► AppState
//!                              │
//!                              └──► Action::PostToWorker ──► worker
//!                                                              │
//! Event::WorkerResponse ◄──────────────────────────────────────┘
//! ```
//!
//! - [`pantry`]: the item list and selection as a plain value
//! - [`state`]: everything the pane shows, plus view model computation
//! - [`handler`]: the event state machine
//! - [`actions`]: side effects for the plugin shim to run
//! - [`modes`]: which field has keyboard focus
//!
//! ```
//! use pantry::app::{handle_event, AppState, Event};
//! use pantry::storage::StoreSettings;
//! use pantry::ui::Theme;
//!
//! let mut state = AppState::new(StoreSettings::default(), Theme::default());
//! let (render, _actions) = handle_event(&mut state, &Event::FocusSearch)?;
//! assert!(render);
//! # Ok::<(), pantry::PantryError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod pantry;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use pantry::Pantry;
pub use state::{AppState, StatusKind, StatusMessage};
