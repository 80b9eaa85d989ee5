//! Keyset pagination over the registration store
//!
//! The store can only answer "the next *n* records after cursor C", so the
//! paginator turns page numbers into cursors. After every fetch it remembers
//! the cursor of the page's last record; page *p* is then fetched after the
//! cursor of page *p - 1*.
//!
//! # Cursor memory
//!
//! Cursors live in a [`CursorCache`] that keeps only the most recently stored
//! pages. Losing a cursor never produces wrong data, only a slower path:
//!
//! - **next**: fetch after the current page's cursor, or walk forward if it is gone
//! - **prev**: fetch after the cursor two pages back, or fall back to page 1
//! - **jump**: fetch after the preceding page's cursor, or walk forward from the
//!   nearest remembered page (or from the start)
//!
//! Cursors depend on the page size, so changing it forgets all of them.

use crate::db::{Cursor, DbError, RegistrationStore, StorePage};
use crate::model::Registration;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Page sizes offered to the user
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of page cursors remembered by default
pub const DEFAULT_CURSOR_CAPACITY: usize = 16;

/// Number of pages needed for `total_items` at `page_size` per page
#[must_use]
pub const fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}

/// Bounded map from page number to the cursor of that page's last record
///
/// Holds at most `capacity` entries; inserting beyond that evicts the entry
/// stored longest ago.
#[derive(Debug, Clone)]
pub struct CursorCache {
    capacity: usize,
    entries: VecDeque<(usize, Cursor)>,
}

impl CursorCache {
    /// Create an empty cache (a capacity of zero is raised to one)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn get(&self, page: usize) -> Option<&Cursor> {
        self.entries
            .iter()
            .find(|(p, _)| *p == page)
            .map(|(_, cursor)| cursor)
    }

    /// Remember the cursor for `page`, replacing any previous one
    pub fn insert(&mut self, page: usize, cursor: Cursor) {
        self.entries.retain(|(p, _)| *p != page);
        self.entries.push_back((page, cursor));
        while self.entries.len() > self.capacity {
            if let Some((evicted, _)) = self.entries.pop_front() {
                debug!(page = evicted, "Evicted page cursor");
            }
        }
    }

    /// The highest remembered page strictly below `page`
    #[must_use]
    pub fn nearest_below(&self, page: usize) -> Option<(usize, &Cursor)> {
        self.entries
            .iter()
            .filter(|(p, _)| *p < page)
            .max_by_key(|(p, _)| *p)
            .map(|(p, cursor)| (*p, cursor))
    }

    /// Remembered page numbers, oldest first
    #[must_use]
    pub fn pages(&self) -> Vec<usize> {
        self.entries.iter().map(|(p, _)| *p).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Page position, page size, total count and the currently fetched page
#[derive(Debug, Clone)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    total_items: usize,
    records: Vec<Registration>,
    cursors: CursorCache,
}

impl Paginator {
    /// Create a paginator on page 1
    ///
    /// # Arguments
    /// * `page_size` - Records per page (zero is raised to one)
    /// * `cursor_capacity` - Number of page cursors to remember
    #[must_use]
    pub fn new(page_size: usize, cursor_capacity: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            records: Vec::new(),
            cursors: CursorCache::new(cursor_capacity),
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Highest valid page number (1 when there are no records)
    #[must_use]
    pub const fn last_page(&self) -> usize {
        let pages = self.total_pages();
        if pages == 0 { 1 } else { pages }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Records of the current page, in name order
    #[must_use]
    pub fn records(&self) -> &[Registration] {
        &self.records
    }

    #[must_use]
    pub const fn cursors(&self) -> &CursorCache {
        &self.cursors
    }

    /// Re-read the total count and clamp the current page to the new range
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the count query fails.
    pub async fn refresh_count<S: RegistrationStore>(&mut self, store: &S) -> Result<usize, DbError> {
        self.total_items = store.count().await?;
        self.clamp_page();
        Ok(self.total_items)
    }

    /// Snap the current page back into `[1, last_page]`
    ///
    /// Returns true if the page changed.
    pub fn clamp_page(&mut self) -> bool {
        let last = self.last_page();
        if self.page > last {
            debug!(from = self.page, to = last, "Clamped current page");
            self.page = last;
            true
        } else {
            false
        }
    }

    /// Change the page size; returns to page 1 and forgets every cursor
    ///
    /// The current page must be fetched again afterwards.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
        self.cursors.clear();
        self.records.clear();
    }

    /// Forget every cursor, e.g. after a write that shifted page boundaries
    pub fn invalidate(&mut self) {
        self.cursors.clear();
    }

    /// Move to page 1 without fetching
    pub const fn reset(&mut self) {
        self.page = 1;
    }

    fn apply(&mut self, page: usize, window: StorePage) {
        self.page = page;
        if let Some(cursor) = window.cursor {
            self.cursors.insert(page, cursor);
        }
        self.records = window.records;
    }

    async fn fetch_after<S: RegistrationStore>(
        &self,
        store: &S,
        after: Option<&Cursor>,
    ) -> Result<StorePage, DbError> {
        store.list_ordered(self.page_size, after).await
    }

    /// Fetch page 1
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    pub async fn first<S: RegistrationStore>(&mut self, store: &S) -> Result<(), DbError> {
        let window = self.fetch_after(store, None).await?;
        self.apply(1, window);
        Ok(())
    }

    /// Fetch the page after the current one
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    pub async fn next<S: RegistrationStore>(&mut self, store: &S) -> Result<(), DbError> {
        let target = self.page + 1;
        match self.cursors.get(self.page).cloned() {
            Some(cursor) => {
                let window = self.fetch_after(store, Some(&cursor)).await?;
                self.apply(target, window);
                Ok(())
            }
            None => self.load(store, target).await,
        }
    }

    /// Fetch the page before the current one
    ///
    /// Falls back to page 1 when the cursor needed for the previous page is
    /// no longer remembered.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    pub async fn prev<S: RegistrationStore>(&mut self, store: &S) -> Result<(), DbError> {
        let target = self.page.saturating_sub(1);
        if target <= 1 {
            return self.first(store).await;
        }
        match self.cursors.get(target - 1).cloned() {
            Some(cursor) => {
                let window = self.fetch_after(store, Some(&cursor)).await?;
                self.apply(target, window);
                Ok(())
            }
            None => {
                warn!(page = target, "No cursor for previous page, returning to page 1");
                self.first(store).await
            }
        }
    }

    /// Fetch an arbitrary page
    ///
    /// Uses the preceding page's cursor when remembered, otherwise walks
    /// forward from the nearest remembered page, storing cursors on the way.
    /// A target past the end of the data yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    pub async fn load<S: RegistrationStore>(&mut self, store: &S, target: usize) -> Result<(), DbError> {
        if target <= 1 {
            return self.first(store).await;
        }
        if let Some(cursor) = self.cursors.get(target - 1).cloned() {
            let window = self.fetch_after(store, Some(&cursor)).await?;
            self.apply(target, window);
            return Ok(());
        }

        let (mut page, mut cursor) = match self.cursors.nearest_below(target - 1) {
            Some((page, cursor)) => (page, Some(cursor.clone())),
            None => (0, None),
        };
        debug!(from = page, to = target, "Walking forward to page");

        loop {
            let window = self.fetch_after(store, cursor.as_ref()).await?;
            page += 1;
            if page == target || window.is_empty() {
                self.apply(target, window);
                return Ok(());
            }
            if let Some(last) = &window.cursor {
                self.cursors.insert(page, last.clone());
            }
            cursor = window.cursor;
        }
    }

    /// Re-fetch the current page
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    pub async fn reload<S: RegistrationStore>(&mut self, store: &S) -> Result<(), DbError> {
        self.load(store, self.page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, numbered_names, seed};

    fn names(paginator: &Paginator) -> Vec<String> {
        paginator.records().iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_last_page_length_property() {
        for page_size in 1..=12 {
            for total in 1..=60 {
                let pages = total_pages(total, page_size);
                let last_len = total - page_size * (pages - 1);
                assert!(last_len >= 1 && last_len <= page_size);
            }
        }
    }

    #[test]
    fn test_cursor_cache_is_bounded() {
        let mut cache = CursorCache::new(2);
        cache.insert(1, Cursor::from_bytes(vec![1]));
        cache.insert(2, Cursor::from_bytes(vec![2]));
        cache.insert(3, Cursor::from_bytes(vec![3]));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(1).is_none());
        assert_eq!(cache.pages(), vec![2, 3]);
    }

    #[test]
    fn test_cursor_cache_reinsert_refreshes_entry() {
        let mut cache = CursorCache::new(2);
        cache.insert(1, Cursor::from_bytes(vec![1]));
        cache.insert(2, Cursor::from_bytes(vec![2]));
        cache.insert(1, Cursor::from_bytes(vec![9]));
        cache.insert(3, Cursor::from_bytes(vec![3]));

        assert_eq!(cache.pages(), vec![1, 3]);
        assert_eq!(cache.get(1).unwrap().as_bytes(), &[9]);
    }

    #[test]
    fn test_cursor_cache_nearest_below() {
        let mut cache = CursorCache::new(4);
        cache.insert(5, Cursor::from_bytes(vec![5]));
        cache.insert(2, Cursor::from_bytes(vec![2]));

        assert_eq!(cache.nearest_below(4).map(|(p, _)| p), Some(2));
        assert_eq!(cache.nearest_below(6).map(|(p, _)| p), Some(5));
        assert!(cache.nearest_below(2).is_none());
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        assert_eq!(CursorCache::new(0).capacity(), 1);
    }

    #[tokio::test]
    async fn test_twenty_three_records_in_pages_of_ten() {
        let test_db = TestDb::new();
        let db = test_db.db();
        let all = numbered_names(23);
        seed(db, &all);

        let mut paginator = Paginator::new(10, DEFAULT_CURSOR_CAPACITY);
        paginator.refresh_count(db).await.unwrap();
        paginator.first(db).await.unwrap();

        assert_eq!(paginator.total_pages(), 3);
        assert_eq!(names(&paginator), all[0..10].to_vec());
        assert!(!paginator.has_prev());

        paginator.next(db).await.unwrap();
        assert_eq!(names(&paginator), all[10..20].to_vec());

        paginator.next(db).await.unwrap();
        assert_eq!(paginator.page(), 3);
        assert_eq!(names(&paginator), all[20..23].to_vec());
        assert!(!paginator.has_next());
    }

    #[tokio::test]
    async fn test_prev_uses_remembered_cursor() {
        let test_db = TestDb::new();
        let db = test_db.db();
        let all = numbered_names(23);
        seed(db, &all);

        let mut paginator = Paginator::new(5, DEFAULT_CURSOR_CAPACITY);
        paginator.refresh_count(db).await.unwrap();
        paginator.first(db).await.unwrap();
        for _ in 0..3 {
            paginator.next(db).await.unwrap();
        }
        assert_eq!(paginator.page(), 4);

        paginator.prev(db).await.unwrap();
        assert_eq!(paginator.page(), 3);
        assert_eq!(names(&paginator), all[10..15].to_vec());

        paginator.prev(db).await.unwrap();
        paginator.prev(db).await.unwrap();
        assert_eq!(paginator.page(), 1);
        assert_eq!(names(&paginator), all[0..5].to_vec());
    }

    #[tokio::test]
    async fn test_prev_falls_back_to_first_page_after_eviction() {
        let test_db = TestDb::new();
        let db = test_db.db();
        let all = numbered_names(30);
        seed(db, &all);

        let mut paginator = Paginator::new(5, 2);
        paginator.refresh_count(db).await.unwrap();
        paginator.first(db).await.unwrap();
        for _ in 0..4 {
            paginator.next(db).await.unwrap();
        }
        assert_eq!(paginator.page(), 5);
        assert!(paginator.cursors().len() <= 2);
        assert!(paginator.cursors().get(3).is_none());

        paginator.prev(db).await.unwrap();
        assert_eq!(paginator.page(), 1);
        assert_eq!(names(&paginator), all[0..5].to_vec());
    }

    #[tokio::test]
    async fn test_jump_matches_sequential_navigation() {
        let test_db = TestDb::new();
        let db = test_db.db();
        let all = numbered_names(23);
        seed(db, &all);

        let mut stepping = Paginator::new(10, DEFAULT_CURSOR_CAPACITY);
        stepping.first(db).await.unwrap();
        stepping.next(db).await.unwrap();
        stepping.next(db).await.unwrap();

        let mut jumping = Paginator::new(10, DEFAULT_CURSOR_CAPACITY);
        jumping.first(db).await.unwrap();
        jumping.load(db, 3).await.unwrap();

        assert_eq!(jumping.page(), 3);
        assert_eq!(names(&jumping), names(&stepping));
        assert!(jumping.cursors().get(2).is_some());
    }

    #[tokio::test]
    async fn test_jump_past_end_yields_empty_page() {
        let test_db = TestDb::new();
        let db = test_db.db();
        seed(db, &numbered_names(4));

        let mut paginator = Paginator::new(2, DEFAULT_CURSOR_CAPACITY);
        paginator.load(db, 5).await.unwrap();

        assert_eq!(paginator.page(), 5);
        assert!(paginator.records().is_empty());
    }

    #[tokio::test]
    async fn test_page_size_change_resets_cursors() {
        let test_db = TestDb::new();
        let db = test_db.db();
        let all = numbered_names(23);
        seed(db, &all);

        let mut paginator = Paginator::new(10, DEFAULT_CURSOR_CAPACITY);
        paginator.first(db).await.unwrap();
        paginator.next(db).await.unwrap();
        assert!(!paginator.cursors().is_empty());

        paginator.set_page_size(20);
        assert_eq!(paginator.page(), 1);
        assert!(paginator.cursors().is_empty());

        paginator.first(db).await.unwrap();
        assert_eq!(names(&paginator), all[0..20].to_vec());
    }

    #[tokio::test]
    async fn test_refresh_count_clamps_page() {
        let test_db = TestDb::new();
        let db = test_db.db();
        let ids = seed(db, &numbered_names(21));

        let mut paginator = Paginator::new(10, DEFAULT_CURSOR_CAPACITY);
        paginator.refresh_count(db).await.unwrap();
        paginator.load(db, 3).await.unwrap();
        assert_eq!(paginator.page(), 3);

        db.remove_record(&ids[20]).unwrap();
        paginator.refresh_count(db).await.unwrap();

        assert_eq!(paginator.total_pages(), 2);
        assert_eq!(paginator.page(), 2);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let test_db = TestDb::new();
        let db = test_db.db();

        let mut paginator = Paginator::new(10, DEFAULT_CURSOR_CAPACITY);
        paginator.refresh_count(db).await.unwrap();
        paginator.first(db).await.unwrap();

        assert_eq!(paginator.total_pages(), 0);
        assert_eq!(paginator.last_page(), 1);
        assert!(paginator.records().is_empty());
        assert!(!paginator.has_next());
        assert!(!paginator.has_prev());
    }
}
