//! Error types for the pantry plugin.
//!
//! [`PantryError`] is the single error type shared by every layer, with a
//! [`Result`] alias. Store failures, invalid input and the partial-rename
//! consistency gap all surface here so callers can decide how to present them.

use thiserror::Error;

/// The main error type for pantry operations.
///
/// Most I/O and serialization failures convert automatically via `#[from]`.
/// The domain variants (`InvalidName`, `NotFound`, `AlreadyExists`,
/// `PartialRename`) are raised by the collection layer and carried back to
/// the UI as typed failures.
///
/// # Examples
///
/// ```
/// use pantry::domain::PantryError;
///
/// fn lookup(name: &str) -> Result<(), PantryError> {
///     Err(PantryError::NotFound(name.to_string()))
/// }
///
/// assert!(lookup("Milk").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PantryError {
    /// The document store rejected or failed an operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document or store file could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// An item name was empty after trimming.
    #[error("item name must not be empty")]
    InvalidName,

    /// The named item does not exist in the collection.
    #[error("no pantry item named '{0}'")]
    NotFound(String),

    /// The named item already exists and the duplicate policy forbids overwriting it.
    #[error("pantry item '{0}' already exists")]
    AlreadyExists(String),

    /// A two-step rename wrote the new document but could not delete the old one.
    ///
    /// Both documents now exist in the store.
    #[error("rename of '{from}' to '{to}' left both items in the store")]
    PartialRename {
        /// Original item name, still present.
        from: String,
        /// New item name, already written.
        to: String,
    },
}

/// A specialized `Result` type for pantry operations.
pub type Result<T> = std::result::Result<T, PantryError>;
