//! Document store abstraction.
//!
//! This module defines the [`DocumentStore`] trait, the document-database
//! collaborator the pantry talks to. It mirrors the four primitive calls of a
//! hosted document database (list, get, set, delete) plus an atomic batch
//! commit that stands in for the database's transaction primitive.
//!
//! # Design Philosophy
//!
//! The trait stays minimal and string-keyed. It knows about collections and
//! documents, never about pantry items; item rules live in
//! [`crate::storage::PantryCollection`].

use crate::domain::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The field set of a single document.
pub type Fields = Map<String, Value>;

/// One persisted record, identified by a key unique within its collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document key.
    pub id: String,
    /// Arbitrary JSON fields.
    pub fields: Fields,
}

impl Document {
    /// Creates a document from a key and its fields.
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// A single write inside an atomic [`DocumentStore::commit`] batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Upsert `fields` under `id`.
    Set {
        /// Target document key.
        id: String,
        /// Full replacement field set.
        fields: Fields,
    },
    /// Remove the document under `id` (absent ids are ignored).
    Delete {
        /// Target document key.
        id: String,
    },
}

/// Abstraction over document-database backends.
///
/// Implementations are used from a single worker thread, so they only need to
/// be `Send`.
///
/// # Implementations
///
/// - [`crate::storage::JsonDocumentStore`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryDocumentStore`]: volatile, process-local
///
/// # Examples
///
/// ```
/// use pantry::storage::{DocumentStore, MemoryDocumentStore};
///
/// let mut store = MemoryDocumentStore::default();
/// store.set_document("Pantry", "Rice", serde_json::Map::new())?;
/// assert_eq!(store.list_documents("Pantry")?.len(), 1);
/// # Ok::<(), pantry::domain::PantryError>(())
/// ```
pub trait DocumentStore: Send {
    /// Returns every document in the collection, ordered by key.
    ///
    /// An unknown collection is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list_documents(&self, collection: &str) -> Result<Vec<Document>>;

    /// Returns the document stored under `id`, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Writes `fields` under `id`, replacing any existing document (upsert).
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted. The store is left
    /// unchanged in that case.
    fn set_document(&mut self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Removes the document under `id`. Deleting an absent id succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete cannot be persisted.
    fn delete_document(&mut self, collection: &str, id: &str) -> Result<()>;

    /// Applies every write in `writes` atomically: all of them or none.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be persisted. No write from the
    /// batch is visible afterwards.
    fn commit(&mut self, collection: &str, writes: Vec<WriteOp>) -> Result<()>;
}
