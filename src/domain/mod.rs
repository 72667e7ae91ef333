//! Domain layer for the pantry plugin.
//!
//! Core types that know nothing about Zellij or the storage backend.
//!
//! - [`error`]: Error types and result alias
//! - [`item`]: Pantry item model and name rules
//!
//! # Examples
//!
//! ```
//! use pantry::domain::{PantryItem, Result};
//!
//! fn stock() -> Result<PantryItem> {
//!     PantryItem::new("Lentils")
//! }
//! ```

pub mod error;
pub mod item;

pub use error::{PantryError, Result};
pub use item::{display_name, normalize_name, renamed_fields, PantryItem};
