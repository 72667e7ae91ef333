//! Storage layer for pantry items.
//!
//! Items persist as documents in a named collection of a document store. The
//! store is reached only through the [`DocumentStore`] trait, so the JSON file
//! backend and the in-memory backend are interchangeable.
//!
//! # Modules
//!
//! - `backend`: Document store trait and document types
//! - `json`: JSON file store with atomic writes
//! - `memory`: Volatile store
//! - `collection`: Item operations and policies over a store
//! - `settings`: Backend selection and policy settings

pub mod backend;
pub mod collection;
pub mod json;
pub mod memory;
pub mod settings;

pub use backend::{Document, DocumentStore, Fields, WriteOp};
pub use collection::{Created, PantryCollection};
pub use json::JsonDocumentStore;
pub use memory::MemoryDocumentStore;
pub use settings::{BackendKind, DuplicatePolicy, RenameMode, StoreSettings};
