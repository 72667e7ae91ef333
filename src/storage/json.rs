//! JSON file-based document store.
//!
//! Keeps every collection in memory and persists the whole dataset on each
//! mutation using atomic file writes (write-to-temp + rename), so the file is
//! never left half-written.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) lookups against the in-memory map
//! - **Write**: O(n), serializes the full dataset
//! - **Best for**: household-sized inventories, infrequent writes

use crate::domain::error::{PantryError, Result};
use crate::storage::backend::{Document, DocumentStore, Fields, WriteOp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Documents of one collection, keyed by document id.
pub(crate) type Collection = BTreeMap<String, Fields>;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoreData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Collections by name.
    #[serde(default)]
    collections: BTreeMap<String, Collection>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            collections: BTreeMap::new(),
        }
    }
}

/// JSON file document store.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "collections": {
///     "Pantry": {
///       "Rice": { "name": "Rice", "createdAt": "2024-05-01T10:00:00.000Z" }
///     }
///   }
/// }
/// ```
///
/// # Failure Semantics
///
/// Every mutation is staged on a copy of the dataset. The copy replaces the
/// live data only after it has been written to disk, so a failed write leaves
/// both the file and the in-memory view untouched.
#[derive(Debug)]
pub struct JsonDocumentStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonDocumentStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store; nothing is written until the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but is unreadable or not valid store JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pantry::storage::JsonDocumentStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonDocumentStore::open(PathBuf::from("/tmp/pantry.json"))?;
    /// # Ok::<(), pantry::domain::PantryError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON document store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no store file yet, starting empty");
            StoreData::default()
        };

        tracing::debug!(
            collection_count = data.collections.len(),
            "document store opened"
        );

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| PantryError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        if data.version > FORMAT_VERSION {
            return Err(PantryError::Storage(format!(
                "store format version {} is newer than supported version {FORMAT_VERSION}",
                data.version
            )));
        }

        Ok(data)
    }

    /// Sibling temp file: the full file name plus `.tmp`.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Writes `data` to a temporary file and renames it over the store file.
    ///
    /// The temporary file is removed again if either step fails.
    fn write_to_file(&self, data: &StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        let tmp_path = self.tmp_path();

        tracing::trace!(tmp_path = ?tmp_path, "writing temporary store file");
        let written = std::fs::write(&tmp_path, json).and_then(|()| std::fs::rename(&tmp_path, &self.file_path));
        if let Err(e) = written {
            if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                tracing::trace!(error = %cleanup, "no temporary store file to remove");
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Runs `mutate` against a copy of the dataset and swaps it in once the
    /// copy is safely on disk.
    fn stage<F>(&mut self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut StoreData),
    {
        let mut staged = self.data.clone();
        mutate(&mut staged);
        self.write_to_file(&staged)?;
        self.data = staged;
        Ok(())
    }

    fn collection(&self, name: &str) -> Option<&Collection> {
        self.data.collections.get(name)
    }
}

/// Applies one write to a collection map. Shared with the memory store.
pub(crate) fn apply_write(collection: &mut Collection, write: WriteOp) {
    match write {
        WriteOp::Set { id, fields } => {
            collection.insert(id, fields);
        }
        WriteOp::Delete { id } => {
            collection.remove(&id);
        }
    }
}

impl DocumentStore for JsonDocumentStore {
    fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let _span = tracing::debug_span!("json_list_documents", collection = %collection).entered();

        let documents: Vec<Document> = self
            .collection(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!(count = documents.len(), "listed documents");
        Ok(documents)
    }

    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let _span = tracing::debug_span!("json_get_document", collection = %collection, id = %id).entered();

        let document = self
            .collection(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone()));

        tracing::debug!(found = document.is_some(), "document lookup complete");
        Ok(document)
    }

    fn set_document(&mut self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let _span = tracing::debug_span!("json_set_document", collection = %collection, id = %id).entered();

        self.stage(|data| {
            data.collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), fields);
        })?;

        tracing::debug!("document written");
        Ok(())
    }

    fn delete_document(&mut self, collection: &str, id: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_delete_document", collection = %collection, id = %id).entered();

        if self.collection(collection).map_or(true, |docs| !docs.contains_key(id)) {
            tracing::debug!("document absent, nothing to delete");
            return Ok(());
        }

        self.stage(|data| {
            if let Some(docs) = data.collections.get_mut(collection) {
                docs.remove(id);
            }
        })?;

        tracing::debug!("document deleted");
        Ok(())
    }

    fn commit(&mut self, collection: &str, writes: Vec<WriteOp>) -> Result<()> {
        let _span = tracing::debug_span!("json_commit", collection = %collection, writes = writes.len()).entered();

        self.stage(|data| {
            let docs = data.collections.entry(collection.to_string()).or_default();
            for write in writes {
                apply_write(docs, write);
            }
        })?;

        tracing::debug!("batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn fields(name: &str) -> Fields {
        let mut f = Fields::new();
        f.insert("name".into(), Value::String(name.into()));
        f
    }

    fn open_in(dir: &TempDir) -> JsonDocumentStore {
        JsonDocumentStore::open(dir.path().join("nested").join("pantry.json")).unwrap()
    }

    #[test]
    fn missing_file_opens_empty_and_creates_parent() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir);

        assert!(store.list_documents("Pantry").unwrap().is_empty());
        assert!(dir.path().join("nested").is_dir());
        assert!(!store.path().exists());
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open_in(&dir);
            store.set_document("Pantry", "Rice", fields("Rice")).unwrap();
            store.set_document("Pantry", "Beans", fields("Beans")).unwrap();
        }

        let store = open_in(&dir);
        let ids: Vec<String> = store
            .list_documents("Pantry")
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["Beans", "Rice"]);
    }

    #[test]
    fn set_is_an_upsert() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set_document("Pantry", "Rice", fields("Rice")).unwrap();

        let mut replacement = fields("Rice");
        replacement.insert("qty".into(), Value::from(2));
        store.set_document("Pantry", "Rice", replacement.clone()).unwrap();

        assert_eq!(store.list_documents("Pantry").unwrap().len(), 1);
        assert_eq!(
            store.get_document("Pantry", "Rice").unwrap().unwrap().fields,
            replacement
        );
    }

    #[test]
    fn deleting_absent_document_is_ok() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.delete_document("Pantry", "Ghost").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn commit_applies_all_writes() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set_document("Pantry", "Rice", fields("Rice")).unwrap();

        store
            .commit(
                "Pantry",
                vec![
                    WriteOp::Set { id: "Brown Rice".into(), fields: fields("Brown Rice") },
                    WriteOp::Delete { id: "Rice".into() },
                ],
            )
            .unwrap();

        let reopened = open_in(&dir);
        assert!(reopened.get_document("Pantry", "Rice").unwrap().is_none());
        assert!(reopened.get_document("Pantry", "Brown Rice").unwrap().is_some());
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set_document("Pantry", "Rice", fields("Rice")).unwrap();

        // A directory where the temp file should go makes the write fail.
        std::fs::create_dir(store.tmp_path()).unwrap();

        let result = store.commit(
            "Pantry",
            vec![
                WriteOp::Set { id: "Brown Rice".into(), fields: fields("Brown Rice") },
                WriteOp::Delete { id: "Rice".into() },
            ],
        );

        assert!(result.is_err());
        assert!(store.get_document("Pantry", "Rice").unwrap().is_some());
        assert!(store.get_document("Pantry", "Brown Rice").unwrap().is_none());
    }

    #[test]
    fn temp_file_keeps_the_full_name() {
        let dir = TempDir::new().unwrap();
        let neighbour = dir.path().join("nested").join("pantry.tmp");
        let mut store = open_in(&dir);
        std::fs::write(&neighbour, "not ours").unwrap();

        assert_eq!(store.tmp_path(), dir.path().join("nested").join("pantry.json.tmp"));
        store.set_document("Pantry", "Rice", fields("Rice")).unwrap();

        assert_eq!(std::fs::read_to_string(&neighbour).unwrap(), "not ours");
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn failed_rename_removes_the_temp_file() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set_document("Pantry", "Rice", fields("Rice")).unwrap();

        // A non-empty directory at the store path makes the rename fail.
        std::fs::remove_file(store.path()).unwrap();
        std::fs::create_dir(store.path()).unwrap();
        std::fs::write(store.path().join("keep"), "").unwrap();

        assert!(store.set_document("Pantry", "Beans", fields("Beans")).is_err());
        assert!(!store.tmp_path().exists());
        assert!(store.get_document("Pantry", "Beans").unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pantry.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonDocumentStore::open(path),
            Err(PantryError::Storage(_))
        ));
    }

    #[test]
    fn newer_format_version_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pantry.json");
        std::fs::write(&path, r#"{"version": 99, "collections": {}}"#).unwrap();

        assert!(JsonDocumentStore::open(path).is_err());
    }

    #[test]
    fn collections_are_isolated() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set_document("Pantry", "Rice", fields("Rice")).unwrap();

        assert!(store.list_documents("Freezer").unwrap().is_empty());
        assert!(store.get_document("Freezer", "Rice").unwrap().is_none());
    }
}
