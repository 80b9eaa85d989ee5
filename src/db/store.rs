//! The registration store contract
//!
//! The list view never talks to a concrete database. It is written against
//! [`RegistrationStore`], which models a document store that only offers
//! keyset pagination over a fixed sort key (the registrant's name), a
//! separate count query and single-document writes.

use super::error::DbError;
use super::types::Cursor;
use crate::model::{RecordId, Registration, RegistrationPatch};

/// One window of an ordered listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorePage {
    /// Records in name order
    pub records: Vec<Registration>,
    /// Position of the last record, `None` when the window is empty
    pub cursor: Option<Cursor>,
}

impl StorePage {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Asynchronous registration store
///
/// All reads and writes suspend the caller until the store answers.
#[allow(async_fn_in_trait)]
pub trait RegistrationStore {
    /// Up to `limit` records in name order, strictly after `after`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    async fn list_ordered(&self, limit: usize, after: Option<&Cursor>) -> Result<StorePage, DbError>;

    /// Number of stored registrations
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    async fn count(&self) -> Result<usize, DbError>;

    /// Every registration, in name order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    async fn snapshot(&self) -> Result<Vec<Registration>, DbError>;

    /// A single registration
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    async fn get(&self, id: &RecordId) -> Result<Option<Registration>, DbError>;

    /// Store a new registration and return its assigned id
    ///
    /// Any id already set on `registration` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the write fails.
    async fn insert(&self, registration: Registration) -> Result<RecordId, DbError>;

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if no record has this id, `DbError::InvalidInput`
    /// if the patch does not apply, or another `DbError` if the write fails.
    async fn update(&self, id: &RecordId, patch: &RegistrationPatch) -> Result<(), DbError>;

    /// Remove a registration
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if no record has this id, or another `DbError`
    /// if the write fails.
    async fn delete(&self, id: &RecordId) -> Result<(), DbError>;
}

impl<T: RegistrationStore> RegistrationStore for &T {
    async fn list_ordered(&self, limit: usize, after: Option<&Cursor>) -> Result<StorePage, DbError> {
        (**self).list_ordered(limit, after).await
    }

    async fn count(&self) -> Result<usize, DbError> {
        (**self).count().await
    }

    async fn snapshot(&self) -> Result<Vec<Registration>, DbError> {
        (**self).snapshot().await
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Registration>, DbError> {
        (**self).get(id).await
    }

    async fn insert(&self, registration: Registration) -> Result<RecordId, DbError> {
        (**self).insert(registration).await
    }

    async fn update(&self, id: &RecordId, patch: &RegistrationPatch) -> Result<(), DbError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), DbError> {
        (**self).delete(id).await
    }
}
