//! Worker-side request processing.
//!
//! [`PantryWorker`] owns the document store for the lifetime of the worker
//! thread and turns each [`WorkerMessage`] into exactly one
//! [`WorkerResponse`]. It has no Zellij dependency; the plugin binary wraps it
//! in the `ZellijWorker` shim that moves payloads across threads.

use crate::domain::error::{PantryError, Result};
use crate::infrastructure::paths;
use crate::storage::{BackendKind, DocumentStore, PantryCollection, StoreSettings};
use crate::worker::messages::{Operation, OperationFailure, TraceContext, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};

/// Worker thread state.
///
/// The store is opened lazily: on `Configure`, or with default settings on
/// the first other request. After that the same handle serves every request.
#[derive(Serialize, Deserialize, Default)]
pub struct PantryWorker {
    #[serde(skip)]
    settings: StoreSettings,

    #[serde(skip)]
    store: Option<Box<dyn DocumentStore>>,
}

impl std::fmt::Debug for PantryWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PantryWorker")
            .field("settings", &self.settings)
            .field("store_open", &self.store.is_some())
            .finish()
    }
}

impl PantryWorker {
    /// Creates a worker that will open its store from `settings`.
    #[must_use]
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            settings,
            store: None,
        }
    }

    /// Creates a worker around an already-open store.
    #[must_use]
    pub fn with_store(settings: StoreSettings, store: Box<dyn DocumentStore>) -> Self {
        Self {
            settings,
            store: Some(store),
        }
    }

    /// Returns the store, opening it on first use.
    fn store(&mut self) -> Result<&mut dyn DocumentStore> {
        if self.store.is_none() {
            self.store = Some(self.settings.open_store()?);
        }
        match self.store.as_mut() {
            Some(store) => {
                let store: &mut dyn DocumentStore = store.as_mut();
                Ok(store)
            }
            None => Err(PantryError::Worker("store not initialized".to_string())),
        }
    }

    fn location(&self) -> String {
        match self.settings.backend {
            BackendKind::Json => paths::strip_host_prefix(&self.settings.resolved_store_path()),
            BackendKind::Memory => "memory".to_string(),
        }
    }

    /// Runs `op` against the item collection with the configured policies.
    fn with_collection<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut PantryCollection<'_>) -> Result<T>,
    {
        let collection = self.settings.collection.clone();
        let on_duplicate = self.settings.on_duplicate;
        let rename_mode = self.settings.rename_mode;

        let store = self.store()?;
        let mut pantry = PantryCollection::new(store, &collection)
            .with_duplicate_policy(on_duplicate)
            .with_rename_mode(rename_mode);
        op(&mut pantry)
    }

    fn handle_configure(&mut self, settings: StoreSettings) -> Result<WorkerResponse> {
        if self.store.is_some() && settings == self.settings {
            tracing::debug!("settings unchanged, keeping open store");
        } else {
            // Later requests retry against these settings, never the defaults.
            self.settings = settings;
            self.store = None;
            self.store = Some(self.settings.open_store()?);
        }

        Ok(WorkerResponse::Configured {
            collection: self.settings.collection.clone(),
            location: self.location(),
        })
    }

    fn dispatch(&mut self, message: WorkerMessage) -> Result<WorkerResponse> {
        match message {
            WorkerMessage::Configure { settings, .. } => self.handle_configure(settings),

            WorkerMessage::LoadItems { .. } => {
                let names = self.with_collection(|pantry| pantry.load_item_names())?;
                Ok(WorkerResponse::ItemsLoaded { names })
            }

            WorkerMessage::CreateItem { name, .. } => {
                let created = self.with_collection(|pantry| pantry.create_item(&name))?;
                Ok(WorkerResponse::ItemCreated {
                    name: created.name,
                    replaced: created.replaced,
                })
            }

            WorkerMessage::DeleteItem { name, .. } => {
                let name = self.with_collection(|pantry| pantry.delete_item(&name))?;
                Ok(WorkerResponse::ItemDeleted { name })
            }

            WorkerMessage::RenameItem { from, to, .. } => {
                let to = self.with_collection(|pantry| pantry.rename_item(&from, &to))?;
                Ok(WorkerResponse::ItemRenamed {
                    from: from.trim().to_string(),
                    to,
                })
            }
        }
    }

    /// Rebuilds the plugin-side OpenTelemetry context from a message so
    /// worker spans become its children. The guard must outlive the work.
    fn attach_parent_trace_context(context: Option<&TraceContext>) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let context = context?;
        let trace_id = TraceId::from_hex(&context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one request. Never panics on store errors: every failure
    /// becomes [`WorkerResponse::Failed`].
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(message.trace_context());

        let operation = message.operation();
        let span = tracing::debug_span!("worker_handle_message", operation = %operation);
        let _guard = span.entered();

        match self.dispatch(message) {
            Ok(response) => {
                tracing::debug!("worker operation successful");
                response
            }
            Err(e) => {
                tracing::debug!(error = %e, "worker operation failed");
                WorkerResponse::Failed(OperationFailure::from_error(operation, &e))
            }
        }
    }

    /// Decodes a JSON request, handles it, and encodes the response.
    ///
    /// A payload that is not a valid request still yields a `Failed`
    /// response so the plugin is never left waiting.
    pub fn handle_payload(&mut self, payload: &str) -> String {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Failed(OperationFailure::from_error(
                    Operation::Decode,
                    &PantryError::Worker(format!("unreadable request: {e}")),
                ))
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "failed to serialize worker response");
            String::new()
        })
    }
}
