//! Database wrapper module for regdesk
//!
//! Provides an embedded [`RegistrationStore`] using sled as the backend.
//!
//! Uses two sled trees:
//! - `registrations`: Main tree mapping record id -> encoded `Registration`
//! - `by_name`: Ordered index mapping `name ++ 0x00 ++ id` -> record id
//!
//! Listing walks the `by_name` index, so windows come back in name order and a
//! [`Cursor`] is simply the index key of the last record returned. Writes touch
//! both trees in one sled transaction.

use crate::model::{RecordId, Registration, RegistrationPatch};
use sled::transaction::ConflictableTransactionError;
use sled::{Db, Transactional, Tree};
use std::ops::Bound;
use std::path::Path;
use tracing::{debug, warn};

pub mod error;
pub mod store;
pub mod types;

pub use error::DbError;
pub use store::{RegistrationStore, StorePage};
pub use types::{Cursor, NameKey};

/// Database wrapper that encapsulates all database operations
pub struct Database {
    db: Db,
    records: Tree, // id -> registration
    by_name: Tree, // name order index
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Arguments
    /// * `path` - Path to the database directory
    ///
    /// # Examples
    /// ```no_run
    /// use regdesk::db::Database;
    /// let db = Database::open("my_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let records = db.open_tree("registrations")?;
        let by_name = db.open_tree("by_name")?;
        Ok(Self { db, records, by_name })
    }

    fn encode(registration: &Registration) -> Result<Vec<u8>, DbError> {
        Ok(bincode::encode_to_vec(registration, bincode::config::standard())?)
    }

    fn decode(bytes: &[u8]) -> Result<Registration, DbError> {
        let (registration, _): (Registration, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(registration)
    }

    /// Get a registration by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn get_record(&self, id: &RecordId) -> Result<Option<Registration>, DbError> {
        match self.records.get(id.as_str().as_bytes())? {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    /// Store a new registration under a freshly generated id
    ///
    /// # Arguments
    /// * `registration` - The record to store; its `id` is overwritten
    ///
    /// # Errors
    ///
    /// Returns `DbError` if id generation, serialization or the write fails.
    pub fn insert_record(&self, mut registration: Registration) -> Result<RecordId, DbError> {
        let id = RecordId::new(format!("{:016x}", self.db.generate_id()?));
        registration.id = id.clone();

        let value = Self::encode(&registration)?;
        let key = NameKey::new(&registration.name, &id);
        (&self.records, &self.by_name).transaction(|(records, by_name)| {
            records.insert(id.as_str().as_bytes(), value.as_slice())?;
            by_name.insert(key.as_bytes(), id.as_str().as_bytes())?;
            Ok::<_, ConflictableTransactionError<DbError>>(())
        })?;

        Ok(id)
    }

    /// Apply a patch to a stored registration and return the updated record
    ///
    /// Keeps the name index in step when the patch renames the registrant.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the id is unknown, `DbError::InvalidInput` if
    /// the patch does not apply, or another `DbError` if database operations fail.
    pub fn update_record(&self, id: &RecordId, patch: &RegistrationPatch) -> Result<Registration, DbError> {
        let mut registration = self
            .get_record(id)?
            .ok_or_else(|| DbError::NotFound(id.clone()))?;
        let old_key = NameKey::new(&registration.name, id);

        patch.apply(&mut registration)?;

        let new_key = NameKey::new(&registration.name, id);
        let value = Self::encode(&registration)?;
        (&self.records, &self.by_name).transaction(|(records, by_name)| {
            if new_key != old_key {
                by_name.remove(old_key.as_bytes())?;
                by_name.insert(new_key.as_bytes(), id.as_str().as_bytes())?;
            }
            records.insert(id.as_str().as_bytes(), value.as_slice())?;
            Ok::<_, ConflictableTransactionError<DbError>>(())
        })?;

        Ok(registration)
    }

    /// Remove a registration and its index entry
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the id is unknown, or another `DbError` if
    /// database operations fail.
    pub fn remove_record(&self, id: &RecordId) -> Result<(), DbError> {
        let registration = self
            .get_record(id)?
            .ok_or_else(|| DbError::NotFound(id.clone()))?;

        let key = NameKey::new(&registration.name, id);
        (&self.records, &self.by_name).transaction(|(records, by_name)| {
            by_name.remove(key.as_bytes())?;
            records.remove(id.as_str().as_bytes())?;
            Ok::<_, ConflictableTransactionError<DbError>>(())
        })?;
        Ok(())
    }

    /// Read up to `limit` registrations in name order, strictly after `after`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if index iteration fails or deserialization errors occur.
    pub fn list_window(&self, limit: usize, after: Option<&Cursor>) -> Result<StorePage, DbError> {
        let iter = match after {
            Some(cursor) => self
                .by_name
                .range::<&[u8], _>((Bound::Excluded(cursor.as_bytes()), Bound::Unbounded)),
            None => self.by_name.iter(),
        };

        let mut page = StorePage::default();
        for entry in iter {
            if page.records.len() >= limit {
                break;
            }
            let (key, _) = entry?;
            let id = NameKey::record_id(&key)?;
            match self.get_record(&id)? {
                Some(registration) => {
                    page.records.push(registration);
                    page.cursor = Some(Cursor::from_bytes(key.to_vec()));
                }
                None => warn!(id = %id, "Name index points at a missing registration"),
            }
        }
        Ok(page)
    }

    /// List every registration in name order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or deserialization errors occur.
    pub fn list_all(&self) -> Result<Vec<Registration>, DbError> {
        Ok(self.list_window(usize::MAX, None)?.records)
    }

    /// Number of stored registrations
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Remove every registration
    ///
    /// # Errors
    ///
    /// Returns `DbError` if either tree cannot be cleared.
    pub fn clear(&self) -> Result<(), DbError> {
        self.records.clear()?;
        self.by_name.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }
}

impl RegistrationStore for Database {
    async fn list_ordered(&self, limit: usize, after: Option<&Cursor>) -> Result<StorePage, DbError> {
        let page = self.list_window(limit, after)?;
        debug!(limit, after = after.is_some(), fetched = page.len(), "Listed registrations");
        Ok(page)
    }

    async fn count(&self) -> Result<usize, DbError> {
        Ok(self.record_count())
    }

    async fn snapshot(&self) -> Result<Vec<Registration>, DbError> {
        let all = self.list_all()?;
        debug!(total = all.len(), "Loaded registration snapshot");
        Ok(all)
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Registration>, DbError> {
        self.get_record(id)
    }

    async fn insert(&self, registration: Registration) -> Result<RecordId, DbError> {
        let id = self.insert_record(registration)?;
        debug!(id = %id, "Inserted registration");
        Ok(id)
    }

    async fn update(&self, id: &RecordId, patch: &RegistrationPatch) -> Result<(), DbError> {
        self.update_record(id, patch)?;
        debug!(id = %id, "Updated registration");
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), DbError> {
        self.remove_record(id)?;
        debug!(id = %id, "Deleted registration");
        Ok(())
    }
}
