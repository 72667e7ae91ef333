//! Pantry item domain model.
//!
//! An item is identified solely by its name, which doubles as the document key
//! in the store. Names are case-sensitive and are trimmed before use.

use crate::domain::error::{PantryError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Document field holding the item name.
pub const FIELD_NAME: &str = "name";

/// Document field holding the creation timestamp (RFC 3339).
pub const FIELD_CREATED_AT: &str = "createdAt";

/// A single pantry inventory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryItem {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl PantryItem {
    /// Creates an item stamped with the current time.
    ///
    /// The name is normalised first, so surrounding whitespace is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::InvalidName`] if the trimmed name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::domain::PantryItem;
    ///
    /// let item = PantryItem::new("  Rice ")?;
    /// assert_eq!(item.name, "Rice");
    /// # Ok::<(), pantry::domain::PantryError>(())
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: normalize_name(name)?,
            created_at: Utc::now(),
        })
    }

    /// Encodes the item as the document field set `{name, createdAt}`.
    #[must_use]
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(FIELD_NAME.to_string(), Value::String(self.name.clone()));
        fields.insert(
            FIELD_CREATED_AT.to_string(),
            Value::String(self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        fields
    }
}

/// Trims an item name and rejects it if nothing is left.
///
/// # Errors
///
/// Returns [`PantryError::InvalidName`] for empty or whitespace-only input.
///
/// # Examples
///
/// ```
/// use pantry::domain::normalize_name;
///
/// assert_eq!(normalize_name(" Brown Rice\t").unwrap(), "Brown Rice");
/// assert!(normalize_name("   ").is_err());
/// ```
pub fn normalize_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PantryError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// Returns the name as shown in the list: first character uppercased.
///
/// The stored key is never changed; this is presentation only.
///
/// # Examples
///
/// ```
/// use pantry::domain::display_name;
///
/// assert_eq!(display_name("rice"), "Rice");
/// assert_eq!(display_name("éclair"), "Éclair");
/// assert_eq!(display_name(""), "");
/// ```
#[must_use]
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Rewrites a document's field set for a rename: every field is kept and
/// `name` is overwritten with the new name.
#[must_use]
pub fn renamed_fields(mut fields: Map<String, Value>, new_name: &str) -> Map<String, Value> {
    fields.insert(FIELD_NAME.to_string(), Value::String(new_name.to_string()));
    fields
}
