//! Volatile in-memory document store.
//!
//! Same semantics as [`crate::storage::JsonDocumentStore`] without a backing
//! file. Contents are lost when the worker exits.

use crate::domain::error::Result;
use crate::storage::backend::{Document, DocumentStore, Fields, WriteOp};
use crate::storage::json::{apply_write, Collection};
use std::collections::BTreeMap;

/// Process-local document store.
#[derive(Debug, Default, Clone)]
pub struct MemoryDocumentStore {
    collections: BTreeMap<String, Collection>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    fn set_document(&mut self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    fn delete_document(&mut self, collection: &str, id: &str) -> Result<()> {
        if let Some(docs) = self.collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    fn commit(&mut self, collection: &str, writes: Vec<WriteOp>) -> Result<()> {
        let docs = self.collections.entry(collection.to_string()).or_default();
        for write in writes {
            apply_write(docs, write);
        }
        Ok(())
    }
}
