//! Store selection and write policies.
//!
//! [`StoreSettings`] travels from the plugin to the worker inside the
//! `Configure` message, so every field is serializable.

use crate::domain::error::Result;
use crate::infrastructure::paths;
use crate::storage::backend::DocumentStore;
use crate::storage::json::JsonDocumentStore;
use crate::storage::memory::MemoryDocumentStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default document collection.
pub const DEFAULT_COLLECTION: &str = "Pantry";

/// Default store file name inside the plugin data directory.
pub const DEFAULT_STORE_FILE: &str = "pantry.json";

/// Which [`DocumentStore`] implementation backs the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Json,
    Memory,
}

impl BackendKind {
    /// Parses a config value, `None` for anything unrecognised.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// What creating an already-existing item does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Upsert: the new document replaces the old one.
    #[default]
    Overwrite,
    /// Fail with `AlreadyExists`.
    Reject,
}

impl DuplicatePolicy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Some(Self::Overwrite),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// How a rename is written to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenameMode {
    /// New document and old-document delete in one atomic batch.
    #[default]
    Transactional,
    /// Write the new document, then delete the old one.
    TwoStep,
}

impl RenameMode {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transactional" => Some(Self::Transactional),
            "two-step" | "two_step" | "twostep" => Some(Self::TwoStep),
            _ => None,
        }
    }
}

/// Everything the worker needs to open the store and apply item rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub collection: String,
    pub backend: BackendKind,
    /// Explicit JSON store file. `None` means `<data_dir>/pantry.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,
    pub on_duplicate: DuplicatePolicy,
    pub rename_mode: RenameMode,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            backend: BackendKind::default(),
            store_path: None,
            on_duplicate: DuplicatePolicy::default(),
            rename_mode: RenameMode::default(),
        }
    }
}

impl StoreSettings {
    /// Resolves the JSON store file, expanding `~` into the sandboxed home.
    #[must_use]
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.as_deref().map_or_else(
            || paths::get_data_dir().join(DEFAULT_STORE_FILE),
            paths::expand_tilde,
        )
    }

    /// Opens the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON store file cannot be opened or parsed.
    pub fn open_store(&self) -> Result<Box<dyn DocumentStore>> {
        match self.backend {
            BackendKind::Json => {
                let path = self.resolved_store_path();
                tracing::debug!(path = ?path, "opening JSON backend");
                Ok(Box::new(JsonDocumentStore::open(path)?))
            }
            BackendKind::Memory => {
                tracing::debug!("opening in-memory backend");
                Ok(Box::new(MemoryDocumentStore::new()))
            }
        }
    }
}
