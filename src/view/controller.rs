//! The registration list controller
//!
//! [`ListController`] owns everything the list view shows: the paginator for
//! browsing, the search state, and a snapshot of every registration used for
//! search, export and the dashboard counts. All changes go through its action
//! methods.
//!
//! Every action takes `&mut self` and awaits its store calls before returning,
//! so a fetch started by one action always completes before the next action
//! can begin and a stale response can never overwrite a newer one.
//!
//! Navigation actions return `None` on success and an error [`Notice`] when
//! the store could not be read. Mutations always return a [`Notice`]; once the
//! store accepted a write it is reported as done, and a failed reload after it
//! only leaves the view [stale](ListController::is_stale).

use super::error::ViewError;
use super::notice::Notice;
use super::pagination::{DEFAULT_CURSOR_CAPACITY, Paginator, total_pages};
use super::projector::{ViewModel, project};
use super::search::{SearchField, SearchState};
use crate::db::{DbError, RegistrationStore};
use crate::export::ExportFile;
use crate::model::{FlagField, PaymentStatus, RecordId, Registration, RegistrationField, RegistrationPatch};
use crate::stats::DashboardStats;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const LOAD_FAILED: &str = "Failed to load registrations.";
const UPDATE_FAILED: &str = "Failed to update registration.";
const DELETE_FAILED: &str = "Failed to delete registration.";
const PAYMENT_FAILED: &str = "Failed to update payment status.";
const EXPORT_FAILED: &str = "Failed to export registrations.";

/// State and actions of the registration list
pub struct ListController<S> {
    store: S,
    paginator: Paginator,
    search: SearchState,
    snapshot: Vec<Registration>,
    snapshot_loaded: bool,
    stale: bool,
}

impl<S: RegistrationStore> ListController<S> {
    /// Create a controller on page 1; call [`refresh`](Self::refresh) to load data
    #[must_use]
    pub fn new(store: S, page_size: usize) -> Self {
        Self::with_cursor_capacity(store, page_size, DEFAULT_CURSOR_CAPACITY)
    }

    /// Like [`new`](Self::new), remembering at most `cursor_capacity` page cursors
    #[must_use]
    pub fn with_cursor_capacity(store: S, page_size: usize, cursor_capacity: usize) -> Self {
        Self {
            store,
            paginator: Paginator::new(page_size, cursor_capacity),
            search: SearchState::default(),
            snapshot: Vec::new(),
            snapshot_loaded: false,
            stale: false,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    #[must_use]
    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    /// Every registration as of the last refresh, in name order
    #[must_use]
    pub fn snapshot(&self) -> &[Registration] {
        &self.snapshot
    }

    /// True when a saved change could not be reloaded; cleared by the next
    /// successful [`refresh`](Self::refresh)
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.search.is_active()
    }

    /// Look up a registration in the snapshot
    #[must_use]
    pub fn find(&self, id: &RecordId) -> Option<&Registration> {
        self.snapshot.iter().find(|reg| &reg.id == id)
    }

    /// The list as it should be displayed now
    #[must_use]
    pub fn view(&self) -> ViewModel {
        project(&self.paginator, &self.search)
    }

    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_records(&self.snapshot)
    }

    async fn load_snapshot(&mut self) -> Result<(), ViewError> {
        self.snapshot = self.store.snapshot().await.map_err(ViewError::FetchFailure)?;
        self.snapshot_loaded = true;
        Ok(())
    }

    async fn ensure_snapshot(&mut self) -> Result<(), ViewError> {
        if self.snapshot_loaded {
            return Ok(());
        }
        self.load_snapshot().await
    }

    async fn fetch_page(&mut self, page: usize) -> Result<(), ViewError> {
        self.paginator
            .load(&self.store, page)
            .await
            .map_err(ViewError::FetchFailure)
    }

    async fn fetch_first(&mut self) -> Result<(), ViewError> {
        self.paginator
            .first(&self.store)
            .await
            .map_err(ViewError::FetchFailure)
    }

    /// Re-read count and snapshot, then the current page
    async fn reload(&mut self) -> Result<(), ViewError> {
        self.paginator
            .refresh_count(&self.store)
            .await
            .map_err(ViewError::FetchFailure)?;
        self.load_snapshot().await?;
        self.search.rerun(&self.snapshot, self.paginator.page_size());
        self.fetch_page(self.paginator.page()).await?;
        self.stale = false;
        Ok(())
    }

    /// Reload after a write the store already accepted
    async fn settle(&mut self) {
        if let Err(err) = self.reload().await {
            warn!(error = %err, "Change saved but the list could not be reloaded");
            self.stale = true;
        }
    }

    fn notice_on_error(result: Result<(), ViewError>, failed: &str) -> Option<Notice> {
        result.err().map(|err| Notice::from_error(&err, failed))
    }

    /// Load the count, snapshot and current page
    pub async fn refresh(&mut self) -> Option<Notice> {
        let result = self.reload().await;
        Self::notice_on_error(result, LOAD_FAILED)
    }

    async fn go_to(&mut self, page: usize) -> Result<(), ViewError> {
        if let Some(results) = self.search.results() {
            let pages = total_pages(results.len(), self.paginator.page_size());
            self.search.set_page(page.clamp(1, pages.max(1)));
            return Ok(());
        }
        let target = page.clamp(1, self.paginator.last_page());
        debug!(page = target, "Going to page");
        self.fetch_page(target).await
    }

    /// Go to a page, clamped into the valid range
    pub async fn set_page(&mut self, page: usize) -> Option<Notice> {
        let result = self.go_to(page).await;
        Self::notice_on_error(result, LOAD_FAILED)
    }

    /// Advance one page; does nothing on the last page
    pub async fn next_page(&mut self) -> Option<Notice> {
        let view = self.view();
        if !view.has_next {
            return None;
        }
        let result = if self.search.is_active() {
            self.go_to(view.page + 1).await
        } else {
            self.paginator
                .next(&self.store)
                .await
                .map_err(ViewError::FetchFailure)
        };
        Self::notice_on_error(result, LOAD_FAILED)
    }

    /// Go back one page; does nothing on page 1
    pub async fn prev_page(&mut self) -> Option<Notice> {
        let view = self.view();
        if !view.has_prev {
            return None;
        }
        let result = if self.search.is_active() {
            self.go_to(view.page - 1).await
        } else {
            self.paginator
                .prev(&self.store)
                .await
                .map_err(ViewError::FetchFailure)
        };
        Self::notice_on_error(result, LOAD_FAILED)
    }

    /// Change the number of records per page and return to page 1
    pub async fn set_page_size(&mut self, page_size: usize) -> Option<Notice> {
        if page_size == 0 {
            return Some(Notice::from_error(&ViewError::InvalidPageSize(0), LOAD_FAILED));
        }
        info!(page_size, "Changed page size");
        self.paginator.set_page_size(page_size);
        self.search.set_page(1);
        let result = self.fetch_first().await;
        Self::notice_on_error(result, LOAD_FAILED)
    }

    async fn run_search(&mut self) -> Result<(), ViewError> {
        let was_searching = self.search.is_active();
        self.ensure_snapshot().await?;
        self.search.run(&self.snapshot);

        if self.search.is_active() {
            debug!(
                term = self.search.term(),
                field = %self.search.field(),
                found = self.search.results().map_or(0, <[Registration]>::len),
                "Searched registrations"
            );
        } else if was_searching {
            self.paginator.reset();
            self.fetch_first().await?;
        }
        Ok(())
    }

    /// Search for `term` in the selected field; a blank term returns to
    /// unfiltered browsing on page 1
    pub async fn set_search_term(&mut self, term: &str) -> Option<Notice> {
        self.search.set_term(term);
        let result = self.run_search().await;
        Self::notice_on_error(result, LOAD_FAILED)
    }

    /// Select the field to search and re-run the current term
    pub async fn set_search_field(&mut self, field: SearchField) -> Option<Notice> {
        self.search.set_field(field);
        if self.search.term().trim().is_empty() {
            return None;
        }
        let result = self.run_search().await;
        Self::notice_on_error(result, LOAD_FAILED)
    }

    /// Drop the search and return to browsing on page 1
    pub async fn clear_search(&mut self) -> Option<Notice> {
        self.search.clear();
        self.paginator.reset();
        let result = self.fetch_first().await;
        Self::notice_on_error(result, LOAD_FAILED)
    }

    async fn current(&self, id: &RecordId) -> Result<Registration, ViewError> {
        if let Some(reg) = self.find(id) {
            return Ok(reg.clone());
        }
        self.store
            .get(id)
            .await
            .map_err(ViewError::FetchFailure)?
            .ok_or_else(|| ViewError::WriteFailure(DbError::NotFound(id.clone())))
    }

    /// Write `patch`, then bring count, snapshot, search and page up to date
    ///
    /// Only the write itself can fail; see [`settle`](Self::settle).
    async fn write(&mut self, id: &RecordId, patch: &RegistrationPatch) -> Result<(), ViewError> {
        self.store
            .update(id, patch)
            .await
            .map_err(ViewError::WriteFailure)?;
        if patch.touches(RegistrationField::Name) {
            self.paginator.invalidate();
        }
        self.settle().await;
        Ok(())
    }

    /// Flip the payment status between paid and unpaid
    pub async fn toggle_payment(&mut self, id: &RecordId) -> Notice {
        let result = async {
            let status = self.current(id).await?.payment_status.toggled();
            self.write(id, &RegistrationPatch::payment(status)).await?;
            Ok::<_, ViewError>(status)
        }
        .await;

        match result {
            Ok(status) => {
                info!(id = %id, status = %status, "Toggled payment status");
                let label = match status {
                    PaymentStatus::Paid => "paid",
                    PaymentStatus::Unpaid => "unpaid",
                };
                Notice::success(format!("Payment status updated to {label}!"))
            }
            Err(err) => Notice::from_error(&err, PAYMENT_FAILED),
        }
    }

    /// Flip one accommodation flag
    pub async fn toggle_field(&mut self, id: &RecordId, flag: FlagField) -> Notice {
        let result = async {
            let value = flag.get(&self.current(id).await?).toggled();
            self.write(id, &RegistrationPatch::flag(flag, value)).await
        }
        .await;

        match result {
            Ok(()) => {
                info!(id = %id, flag = %flag, "Toggled flag");
                Notice::success("Registration updated successfully!")
            }
            Err(err) => Notice::from_error(&err, UPDATE_FAILED),
        }
    }

    /// Save edits made to a registration
    pub async fn save(&mut self, id: &RecordId, patch: &RegistrationPatch) -> Notice {
        match self.write(id, patch).await {
            Ok(()) => {
                info!(id = %id, "Saved registration");
                Notice::success("Registration updated successfully!")
            }
            Err(err) => Notice::from_error(&err, UPDATE_FAILED),
        }
    }

    /// Remove a registration
    ///
    /// If the current page empties, the view moves to the new last page.
    pub async fn delete(&mut self, id: &RecordId) -> Notice {
        let result = async {
            self.store.delete(id).await.map_err(ViewError::WriteFailure)?;
            self.paginator.invalidate();
            self.settle().await;
            Ok::<_, ViewError>(())
        }
        .await;

        match result {
            Ok(()) => {
                info!(id = %id, "Deleted registration");
                Notice::success("Registration deleted successfully!")
            }
            Err(err) => Notice::from_error(&err, DELETE_FAILED),
        }
    }

    /// Render every registration as a dated CSV
    ///
    /// Reads a fresh snapshot, so the export ignores paging and search.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::FetchFailure` if the store cannot be read,
    /// `ViewError::EmptyExportFailure` if there are no registrations, or
    /// `ViewError::Export` if the CSV cannot be produced.
    pub async fn export_all(&self) -> Result<ExportFile, ViewError> {
        let records = self.store.snapshot().await.map_err(ViewError::FetchFailure)?;
        Ok(ExportFile::render(&records, Utc::now().date_naive())?)
    }

    /// Export every registration into `dir` and return the written path
    ///
    /// # Errors
    ///
    /// Returns the errors of [`export_all`](Self::export_all), or
    /// `ViewError::Export` if the file cannot be written.
    pub async fn export_to(&self, dir: &Path) -> Result<PathBuf, ViewError> {
        let file = self.export_all().await?;
        Ok(file.write_to(dir)?)
    }

    /// Export action: writes the CSV into `dir` and reports the outcome
    pub async fn export(&self, dir: &Path) -> Notice {
        match self.export_to(dir).await {
            Ok(path) => {
                info!(path = %path.display(), "Exported registrations");
                Notice::success("Registrations exported successfully!")
            }
            Err(err) => Notice::from_error(&err, EXPORT_FAILED),
        }
    }
}
