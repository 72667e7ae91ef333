//! Background worker for store I/O.
//!
//! Store operations run on a Zellij worker thread so the plugin never blocks
//! on disk. The two sides exchange JSON-encoded [`WorkerMessage`] and
//! [`WorkerResponse`] values.
//!
//! - `messages`: Protocol types with trace context propagation
//! - `handler`: The worker that executes requests against the store

pub mod handler;
pub mod messages;

pub use handler::PantryWorker;
pub use messages::{FailureKind, Operation, OperationFailure, TraceContext, WorkerMessage, WorkerResponse};

/// Name under which the plugin registers its worker and routes messages.
pub const WORKER_NAME: &str = "pantry";
