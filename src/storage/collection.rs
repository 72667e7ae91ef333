//! Pantry item operations on top of a [`DocumentStore`].
//!
//! [`PantryCollection`] turns the generic document calls into the four item
//! operations the plugin needs: load, create, delete and rename. It owns the
//! item rules (name normalisation, duplicate policy, rename mode) so the store
//! backends stay ignorant of them.

use crate::domain::error::{PantryError, Result};
use crate::domain::item::{normalize_name, renamed_fields, PantryItem};
use crate::storage::backend::{DocumentStore, WriteOp};
use crate::storage::settings::{DuplicatePolicy, RenameMode};

/// Outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    /// Normalised item name.
    pub name: String,
    /// Whether an existing document was overwritten.
    pub replaced: bool,
}

/// Item-level view over one collection of a document store.
pub struct PantryCollection<'a> {
    store: &'a mut dyn DocumentStore,
    collection: &'a str,
    on_duplicate: DuplicatePolicy,
    rename_mode: RenameMode,
}

impl<'a> PantryCollection<'a> {
    /// Wraps `store` with the default policies (overwrite, transactional).
    pub fn new(store: &'a mut dyn DocumentStore, collection: &'a str) -> Self {
        Self {
            store,
            collection,
            on_duplicate: DuplicatePolicy::default(),
            rename_mode: RenameMode::default(),
        }
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    #[must_use]
    pub fn with_rename_mode(mut self, mode: RenameMode) -> Self {
        self.rename_mode = mode;
        self
    }

    /// Returns every item name in the collection, sorted by key.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub fn load_item_names(&self) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .store
            .list_documents(self.collection)?
            .into_iter()
            .map(|doc| doc.id)
            .collect();

        tracing::debug!(count = names.len(), "item names loaded");
        Ok(names)
    }

    /// Writes `{name, createdAt}` under the normalised name.
    ///
    /// # Errors
    ///
    /// - [`PantryError::InvalidName`] if the name is blank
    /// - [`PantryError::AlreadyExists`] if the item exists and the policy is `Reject`
    /// - store errors from the existence check or the write
    pub fn create_item(&mut self, raw_name: &str) -> Result<Created> {
        let item = PantryItem::new(raw_name)?;
        let replaced = self.store.get_document(self.collection, &item.name)?.is_some();

        if replaced && self.on_duplicate == DuplicatePolicy::Reject {
            return Err(PantryError::AlreadyExists(item.name));
        }

        self.store
            .set_document(self.collection, &item.name, item.to_fields())?;

        tracing::debug!(name = %item.name, replaced, "item created");
        Ok(Created {
            name: item.name,
            replaced,
        })
    }

    /// Deletes the item. Deleting an absent item succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::InvalidName`] for a blank name, or the store error.
    pub fn delete_item(&mut self, raw_name: &str) -> Result<String> {
        let name = normalize_name(raw_name)?;
        self.store.delete_document(self.collection, &name)?;
        tracing::debug!(name = %name, "item deleted");
        Ok(name)
    }

    /// Moves `from` to `to`, carrying every field across and rewriting `name`.
    ///
    /// Returns the normalised new name. Renaming onto the same name touches
    /// nothing.
    ///
    /// # Errors
    ///
    /// - [`PantryError::InvalidName`] if either name is blank
    /// - [`PantryError::NotFound`] if `from` does not exist
    /// - [`PantryError::AlreadyExists`] if `to` exists and the policy is `Reject`
    /// - [`PantryError::PartialRename`] if, in two-step mode, the new document
    ///   was written but the old one could not be removed
    /// - store errors otherwise
    pub fn rename_item(&mut self, raw_from: &str, raw_to: &str) -> Result<String> {
        let from = normalize_name(raw_from)?;
        let to = normalize_name(raw_to)?;

        let _span = tracing::debug_span!("rename_item", from = %from, to = %to, mode = ?self.rename_mode).entered();

        let old = self
            .store
            .get_document(self.collection, &from)?
            .ok_or_else(|| PantryError::NotFound(from.clone()))?;

        if from == to {
            tracing::debug!("rename to identical name, nothing to write");
            return Ok(to);
        }

        if self.on_duplicate == DuplicatePolicy::Reject
            && self.store.get_document(self.collection, &to)?.is_some()
        {
            return Err(PantryError::AlreadyExists(to));
        }

        let fields = renamed_fields(old.fields, &to);

        match self.rename_mode {
            RenameMode::Transactional => {
                self.store.commit(
                    self.collection,
                    vec![
                        WriteOp::Set {
                            id: to.clone(),
                            fields,
                        },
                        WriteOp::Delete { id: from },
                    ],
                )?;
            }
            RenameMode::TwoStep => {
                self.store.set_document(self.collection, &to, fields)?;
                if let Err(e) = self.store.delete_document(self.collection, &from) {
                    tracing::warn!(error = %e, "new item written but old item could not be removed");
                    return Err(PantryError::PartialRename { from, to });
                }
            }
        }

        tracing::debug!("item renamed");
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{FIELD_CREATED_AT, FIELD_NAME};
    use crate::storage::backend::{Document, Fields};
    use crate::storage::memory::MemoryDocumentStore;
    use serde_json::Value;

    const COLLECTION: &str = "Pantry";

    /// Memory store whose writes can be made to fail on demand.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryDocumentStore,
        fail_set: bool,
        fail_delete: bool,
        fail_commit: bool,
    }

    impl DocumentStore for FlakyStore {
        fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
            self.inner.list_documents(collection)
        }

        fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
            self.inner.get_document(collection, id)
        }

        fn set_document(&mut self, collection: &str, id: &str, fields: Fields) -> Result<()> {
            if self.fail_set {
                return Err(PantryError::Storage("set refused".into()));
            }
            self.inner.set_document(collection, id, fields)
        }

        fn delete_document(&mut self, collection: &str, id: &str) -> Result<()> {
            if self.fail_delete {
                return Err(PantryError::Storage("delete refused".into()));
            }
            self.inner.delete_document(collection, id)
        }

        fn commit(&mut self, collection: &str, writes: Vec<WriteOp>) -> Result<()> {
            if self.fail_commit {
                return Err(PantryError::Storage("commit refused".into()));
            }
            self.inner.commit(collection, writes)
        }
    }

    fn names(store: &mut dyn DocumentStore) -> Vec<String> {
        PantryCollection::new(store, COLLECTION).load_item_names().unwrap()
    }

    #[test]
    fn create_writes_name_and_timestamp() {
        let mut store = MemoryDocumentStore::new();
        let created = PantryCollection::new(&mut store, COLLECTION)
            .create_item("  Rice ")
            .unwrap();

        assert_eq!(created, Created { name: "Rice".into(), replaced: false });
        let doc = store.get_document(COLLECTION, "Rice").unwrap().unwrap();
        assert_eq!(doc.fields.get(FIELD_NAME), Some(&Value::String("Rice".into())));
        assert!(doc.fields.contains_key(FIELD_CREATED_AT));
    }

    #[test]
    fn blank_create_never_reaches_the_store() {
        let mut store = FlakyStore { fail_set: true, ..FlakyStore::default() };
        let result = PantryCollection::new(&mut store, COLLECTION).create_item("   ");
        assert!(matches!(result, Err(PantryError::InvalidName)));
    }

    #[test]
    fn duplicate_create_overwrites_by_default() {
        let mut store = MemoryDocumentStore::new();
        let mut pantry = PantryCollection::new(&mut store, COLLECTION);
        pantry.create_item("Rice").unwrap();
        let second = pantry.create_item("Rice").unwrap();

        assert!(second.replaced);
        assert_eq!(names(&mut store), vec!["Rice"]);
    }

    #[test]
    fn duplicate_create_can_be_rejected() {
        let mut store = MemoryDocumentStore::new();
        let mut pantry =
            PantryCollection::new(&mut store, COLLECTION).with_duplicate_policy(DuplicatePolicy::Reject);
        pantry.create_item("Rice").unwrap();

        assert!(matches!(
            pantry.create_item("Rice"),
            Err(PantryError::AlreadyExists(name)) if name == "Rice"
        ));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut store = MemoryDocumentStore::new();
        let mut pantry = PantryCollection::new(&mut store, COLLECTION);
        pantry.create_item("Rice").unwrap();
        pantry.create_item("rice").unwrap();

        assert_eq!(names(&mut store), vec!["Rice", "rice"]);
    }

    #[test]
    fn delete_of_absent_item_is_ok() {
        let mut store = MemoryDocumentStore::new();
        let deleted = PantryCollection::new(&mut store, COLLECTION).delete_item("Ghost").unwrap();
        assert_eq!(deleted, "Ghost");
    }

    #[test]
    fn rename_moves_fields_to_the_new_key() {
        let mut store = MemoryDocumentStore::new();
        let mut extra = Fields::new();
        extra.insert(FIELD_NAME.into(), Value::String("Rice".into()));
        extra.insert("qty".into(), Value::from(2));
        store.set_document(COLLECTION, "Rice", extra).unwrap();

        let to = PantryCollection::new(&mut store, COLLECTION)
            .rename_item("Rice", " Brown Rice ")
            .unwrap();

        assert_eq!(to, "Brown Rice");
        assert!(store.get_document(COLLECTION, "Rice").unwrap().is_none());
        let moved = store.get_document(COLLECTION, "Brown Rice").unwrap().unwrap();
        assert_eq!(moved.fields.get(FIELD_NAME), Some(&Value::String("Brown Rice".into())));
        assert_eq!(moved.fields.get("qty"), Some(&Value::from(2)));
    }

    #[test]
    fn rename_of_missing_item_is_not_found() {
        let mut store = MemoryDocumentStore::new();
        let result = PantryCollection::new(&mut store, COLLECTION).rename_item("Rice", "Oats");
        assert!(matches!(result, Err(PantryError::NotFound(name)) if name == "Rice"));
        assert!(names(&mut store).is_empty());
    }

    #[test]
    fn rename_to_same_name_writes_nothing() {
        let mut store = FlakyStore { fail_set: true, fail_delete: true, fail_commit: true, ..FlakyStore::default() };
        store.inner.set_document(COLLECTION, "Rice", Fields::new()).unwrap();

        let to = PantryCollection::new(&mut store, COLLECTION).rename_item("Rice", "Rice").unwrap();
        assert_eq!(to, "Rice");
    }

    #[test]
    fn failed_transactional_rename_changes_nothing() {
        let mut store = FlakyStore { fail_commit: true, ..FlakyStore::default() };
        store.inner.set_document(COLLECTION, "Rice", Fields::new()).unwrap();

        let result = PantryCollection::new(&mut store, COLLECTION).rename_item("Rice", "Oats");

        assert!(matches!(result, Err(PantryError::Storage(_))));
        assert_eq!(names(&mut store), vec!["Rice"]);
    }

    #[test]
    fn two_step_rename_reports_partial_failure() {
        let mut store = FlakyStore { fail_delete: true, ..FlakyStore::default() };
        store.inner.set_document(COLLECTION, "Rice", Fields::new()).unwrap();

        let result = PantryCollection::new(&mut store, COLLECTION)
            .with_rename_mode(RenameMode::TwoStep)
            .rename_item("Rice", "Oats");

        assert!(matches!(
            result,
            Err(PantryError::PartialRename { ref from, ref to }) if from == "Rice" && to == "Oats"
        ));
        assert_eq!(names(&mut store), vec!["Oats", "Rice"]);
    }

    #[test]
    fn rename_onto_existing_item_follows_duplicate_policy() {
        let mut store = MemoryDocumentStore::new();
        {
            let mut pantry = PantryCollection::new(&mut store, COLLECTION);
            pantry.create_item("Rice").unwrap();
            pantry.create_item("Oats").unwrap();
        }

        let rejected = PantryCollection::new(&mut store, COLLECTION)
            .with_duplicate_policy(DuplicatePolicy::Reject)
            .rename_item("Rice", "Oats");
        assert!(matches!(rejected, Err(PantryError::AlreadyExists(_))));

        PantryCollection::new(&mut store, COLLECTION).rename_item("Rice", "Oats").unwrap();
        assert_eq!(names(&mut store), vec!["Oats"]);
    }
}
