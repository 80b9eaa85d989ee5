//! Testing utilities for regdesk
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDb` wrapper for temporary database management and a
//! store wrapper that fails on demand.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::{Cursor, Database, DbError, RegistrationStore, StorePage};
use crate::model::{RecordId, Registration, RegistrationPatch};
use std::cell::Cell;
use tempfile::TempDir;

/// Wrapper for a temporary test database that cleans up on drop
///
/// The database lives in its own temporary directory, which is removed when
/// the wrapper goes out of scope.
pub struct TestDb {
    // Field order matters: the database must close before its directory goes.
    db: Database,
    _dir: TempDir,
}

impl TestDb {
    /// Create an empty database in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("db")).expect("Failed to open test database");
        Self { db, _dir: dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }
}

/// A registration with only a name set
#[must_use]
pub fn registration(name: &str) -> Registration {
    Registration::new(name)
}

/// `n` distinct names whose name order matches their position
#[must_use]
pub fn numbered_names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Registrant {i:03}")).collect()
}

/// Insert one registration per name and return the assigned ids in order
///
/// # Panics
/// Panics if an insert fails.
pub fn seed(db: &Database, names: &[String]) -> Vec<RecordId> {
    names
        .iter()
        .map(|name| db.insert_record(registration(name)).expect("Failed to seed"))
        .collect()
}

/// Store wrapper whose reads or writes can be switched to fail
pub struct FlakyStore<'a> {
    inner: &'a Database,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl<'a> FlakyStore<'a> {
    #[must_use]
    pub const fn new(inner: &'a Database) -> Self {
        Self {
            inner,
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn check_read(&self) -> Result<(), DbError> {
        if self.fail_reads.get() {
            return Err(DbError::Unavailable("read refused".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), DbError> {
        if self.fail_writes.get() {
            return Err(DbError::Unavailable("write refused".to_string()));
        }
        Ok(())
    }
}

impl RegistrationStore for FlakyStore<'_> {
    async fn list_ordered(&self, limit: usize, after: Option<&Cursor>) -> Result<StorePage, DbError> {
        self.check_read()?;
        self.inner.list_ordered(limit, after).await
    }

    async fn count(&self) -> Result<usize, DbError> {
        self.check_read()?;
        self.inner.count().await
    }

    async fn snapshot(&self) -> Result<Vec<Registration>, DbError> {
        self.check_read()?;
        self.inner.snapshot().await
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Registration>, DbError> {
        self.check_read()?;
        self.inner.get(id).await
    }

    async fn insert(&self, registration: Registration) -> Result<RecordId, DbError> {
        self.check_write()?;
        self.inner.insert(registration).await
    }

    async fn update(&self, id: &RecordId, patch: &RegistrationPatch) -> Result<(), DbError> {
        self.check_write()?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), DbError> {
        self.check_write()?;
        self.inner.delete(id).await
    }
}
