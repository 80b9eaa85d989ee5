//! Type wrappers for database keys
//!
//! Registrations are listed in name order through a secondary index whose
//! keys sort exactly like the listing. These wrappers keep the key layout in
//! one place.
//!
//! # Types
//!
//! - **`NameKey`**: Index key `name ++ 0x00 ++ id`, ordered by name then id
//! - **`Cursor`**: Opaque position in the name order, the key of the last record
//!   of a fetched window
//!
//! # Examples
//!
//! ```
//! use regdesk::db::types::NameKey;
//! use regdesk::model::RecordId;
//!
//! let a = NameKey::new("Ana", &RecordId::new("2"));
//! let b = NameKey::new("Ben", &RecordId::new("1"));
//! assert!(a.as_bytes() < b.as_bytes());
//! ```

use super::error::DbError;
use crate::model::RecordId;

const SEPARATOR: u8 = 0;

/// Key of the name-order index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameKey(Vec<u8>);

impl NameKey {
    #[must_use]
    pub fn new(name: &str, id: &RecordId) -> Self {
        let mut bytes = Vec::with_capacity(name.len() + id.as_str().len() + 1);
        bytes.extend_from_slice(name.as_bytes());
        bytes.push(SEPARATOR);
        bytes.extend_from_slice(id.as_str().as_bytes());
        Self(bytes)
    }

    /// Recover the record id stored at the end of the key
    ///
    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if the key has no separator or the id is not UTF-8.
    pub fn record_id(bytes: &[u8]) -> Result<RecordId, DbError> {
        let split = bytes
            .iter()
            .rposition(|b| *b == SEPARATOR)
            .ok_or_else(|| DbError::SerializeError("Index key without separator".to_string()))?;
        let id = std::str::from_utf8(&bytes[split + 1..])
            .map_err(|e| DbError::SerializeError(format!("Invalid UTF-8 in index key: {e}")))?;
        Ok(RecordId::new(id))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for NameKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Position after which the next window of a listing starts
///
/// Only meaningful to the store that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(Vec<u8>);

impl Cursor {
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<NameKey> for Cursor {
    fn from(key: NameKey) -> Self {
        Self(key.0)
    }
}
