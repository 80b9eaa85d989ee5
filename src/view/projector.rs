//! Projection of the list state into what the user sees
//!
//! While browsing, the displayed page is whatever the paginator fetched and the
//! total is the store's count. While searching, the filtered results are
//! sliced locally by page and the total is the number of matches.

use super::pagination::{Paginator, total_pages};
use super::search::{SearchField, SearchState};
use crate::model::Registration;

/// Number of page buttons shown around the current page
pub const PAGE_WINDOW: usize = 5;

/// Whether the list shows the store's pages or search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Browsing,
    Searching,
}

/// Everything the presentation layer needs to render the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Registrations on the current page
    pub records: Vec<Registration>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Store count while browsing, match count while searching
    pub total_items: usize,
    pub mode: ViewMode,
    pub search_term: String,
    pub search_field: SearchField,
    /// "Found N results for ..." while searching
    pub search_summary: Option<String>,
    pub has_prev: bool,
    pub has_next: bool,
    /// 1-based positions of the first and last displayed item
    pub range: Option<(usize, usize)>,
    /// Page numbers to offer as direct links
    pub page_window: Vec<usize>,
}

impl ViewModel {
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        matches!(self.mode, ViewMode::Searching)
    }
}

/// Slice of `items` shown on `page` (1-based) at `page_size` per page
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Up to [`PAGE_WINDOW`] page numbers centred on `page`
///
/// The first pages are shown while `page` is near the start, the last pages
/// while it is near the end.
#[must_use]
pub fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }
    let half = PAGE_WINDOW / 2;
    let first = if page <= half + 1 {
        1
    } else if page + half >= total_pages {
        total_pages + 1 - PAGE_WINDOW
    } else {
        page - half
    };
    (first..first + PAGE_WINDOW).collect()
}

/// 1-based `(first, last)` positions displayed on `page`, `None` when nothing is shown
#[must_use]
pub fn display_range(page: usize, page_size: usize, total_items: usize) -> Option<(usize, usize)> {
    let start = page.saturating_sub(1) * page_size + 1;
    let end = (page * page_size).min(total_items);
    (start <= end).then_some((start, end))
}

/// "Found 3 results for "maria" in name"
#[must_use]
pub fn search_summary(count: usize, term: &str, field: SearchField) -> String {
    let plural = if count == 1 { "" } else { "s" };
    let mut summary = format!("Found {count} result{plural} for \"{term}\"");
    if field != SearchField::All {
        summary.push_str(" in ");
        summary.push_str(field.key());
    }
    summary
}

/// Combine paginator and search state into the displayed view
#[must_use]
pub fn project(paginator: &Paginator, search: &SearchState) -> ViewModel {
    let page_size = paginator.page_size();

    let (mode, records, page, total_items, summary) = match search.results() {
        Some(results) => (
            ViewMode::Searching,
            page_slice(results, search.page(), page_size).to_vec(),
            search.page(),
            results.len(),
            Some(search_summary(results.len(), search.term(), search.field())),
        ),
        None => (
            ViewMode::Browsing,
            paginator.records().to_vec(),
            paginator.page(),
            paginator.total_items(),
            None,
        ),
    };
    let pages = total_pages(total_items, page_size);

    ViewModel {
        records,
        page,
        page_size,
        total_pages: pages,
        total_items,
        mode,
        search_term: search.term().to_string(),
        search_field: search.field(),
        search_summary: summary,
        has_prev: page > 1,
        has_next: page < pages,
        range: display_range(page, page_size, total_items),
        page_window: page_window(page, pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::registration;

    #[test]
    fn test_page_slice() {
        let items: Vec<usize> = (1..=23).collect();
        assert_eq!(page_slice(&items, 1, 10), &items[0..10]);
        assert_eq!(page_slice(&items, 3, 10), &[21, 22, 23]);
        assert!(page_slice(&items, 4, 10).is_empty());
        assert!(page_slice(&items, 0, 10).len() == 10);
    }

    #[test]
    fn test_page_window_near_start_middle_and_end() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_display_range() {
        assert_eq!(display_range(1, 10, 23), Some((1, 10)));
        assert_eq!(display_range(3, 10, 23), Some((21, 23)));
        assert_eq!(display_range(1, 10, 0), None);
    }

    #[test]
    fn test_search_summary() {
        assert_eq!(search_summary(1, "maria", SearchField::All), "Found 1 result for \"maria\"");
        assert_eq!(
            search_summary(0, "x", SearchField::Email),
            "Found 0 results for \"x\" in email"
        );
    }

    #[test]
    fn test_project_search_mode_slices_locally() {
        let snapshot: Vec<_> = (1..=12).map(|i| registration(&format!("Name {i:02}"))).collect();
        let paginator = Paginator::new(5, 4);
        let mut search = SearchState::default();
        search.set_term("name");
        search.run(&snapshot);
        search.set_page(3);

        let view = project(&paginator, &search);

        assert!(view.is_searching());
        assert_eq!(view.total_items, 12);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.records[0].name, "Name 11");
        assert_eq!(view.range, Some((11, 12)));
        assert!(!view.has_next);
        assert!(view.has_prev);
        assert_eq!(view.search_summary.as_deref(), Some("Found 12 results for \"name\""));
    }

    #[test]
    fn test_project_browsing_mode_uses_paginator() {
        let paginator = Paginator::new(10, 4);
        let search = SearchState::default();

        let view = project(&paginator, &search);

        assert_eq!(view.mode, ViewMode::Browsing);
        assert!(view.records.is_empty());
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 0);
        assert!(view.search_summary.is_none());
        assert!(!view.has_next);
        assert!(view.range.is_none());
    }
}
