//! Request/response protocol between the plugin and its worker.
//!
//! Messages cross the thread boundary as JSON, so every type here is
//! serializable. Each request carries an optional [`TraceContext`] that lets
//! worker-side spans join the trace of the key press that caused them.

use crate::domain::error::PantryError;
use crate::storage::StoreSettings;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no valid OpenTelemetry context is active, which is
    /// the case whenever tracing has not been initialised (tests included).
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    configure(Configure { settings: StoreSettings }),
    load_items(LoadItems {}),
    create_item(CreateItem { name: String }),
    delete_item(DeleteItem { name: String }),
    rename_item(RenameItem { from: String, to: String }),
}

/// Requests sent from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Selects the backend and policies. Reopens the store if they changed.
    Configure {
        settings: StoreSettings,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Lists every item name in the collection.
    LoadItems {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Writes a new item.
    CreateItem {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Removes an item.
    DeleteItem {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Renames an item, carrying its fields across.
    RenameItem {
        from: String,
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to this message, if any.
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Configure { trace_context, .. }
            | Self::LoadItems { trace_context }
            | Self::CreateItem { trace_context, .. }
            | Self::DeleteItem { trace_context, .. }
            | Self::RenameItem { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Which operation this request performs.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::Configure { .. } => Operation::Configure,
            Self::LoadItems { .. } => Operation::Load,
            Self::CreateItem { .. } => Operation::Create,
            Self::DeleteItem { .. } => Operation::Delete,
            Self::RenameItem { .. } => Operation::Rename,
        }
    }
}

/// Store operation names, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Configure,
    Load,
    Create,
    Delete,
    Rename,
    /// Decoding the request payload itself.
    Decode,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Configure => "open store",
            Self::Load => "load items",
            Self::Create => "add item",
            Self::Delete => "delete item",
            Self::Rename => "rename item",
            Self::Decode => "read request",
        };
        f.write_str(label)
    }
}

/// Coarse failure classification the plugin reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The store could not be read or written.
    Storage,
    /// The target item does not exist.
    NotFound,
    /// The target name is taken and duplicates are rejected.
    AlreadyExists,
    /// A two-step rename left both documents behind.
    PartialRename { from: String, to: String },
    /// The request itself was malformed (blank name, bad payload).
    Invalid,
}

/// A failed worker operation, ready to log or show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationFailure {
    pub operation: Operation,
    pub kind: FailureKind,
    /// Human-readable cause.
    pub reason: String,
}

impl OperationFailure {
    /// Classifies a [`PantryError`] raised while performing `operation`.
    #[must_use]
    pub fn from_error(operation: Operation, error: &PantryError) -> Self {
        let kind = match error {
            PantryError::NotFound(_) => FailureKind::NotFound,
            PantryError::AlreadyExists(_) => FailureKind::AlreadyExists,
            PantryError::PartialRename { from, to } => FailureKind::PartialRename {
                from: from.clone(),
                to: to.clone(),
            },
            PantryError::InvalidName | PantryError::Worker(_) => FailureKind::Invalid,
            PantryError::Storage(_) | PantryError::Io(_) | PantryError::Serialization(_) | PantryError::Theme(_) => {
                FailureKind::Storage
            }
        };

        Self {
            operation,
            kind,
            reason: error.to_string(),
        }
    }
}

impl std::fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.reason)
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The store is open.
    Configured {
        collection: String,
        /// Where the data lives, formatted for display.
        location: String,
    },

    /// Every item name in the collection, sorted by key.
    ItemsLoaded { names: Vec<String> },

    ItemCreated {
        name: String,
        /// An existing document was overwritten.
        replaced: bool,
    },

    ItemDeleted { name: String },

    ItemRenamed { from: String, to: String },

    Failed(OperationFailure),
}
