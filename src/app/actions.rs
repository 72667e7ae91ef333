//! Side effects requested by the event handler.
//!
//! The handler never talks to Zellij or the worker directly. It returns a
//! `Vec<Action>` and the plugin shim executes them in order.

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a store request to the background worker.
    PostToWorker(WorkerMessage),
}

impl Action {
    /// The worker request carried by this action, if any.
    #[must_use]
    pub const fn worker_message(&self) -> Option<&WorkerMessage> {
        match self {
            Self::PostToWorker(message) => Some(message),
            Self::CloseFocus => None,
        }
    }
}
