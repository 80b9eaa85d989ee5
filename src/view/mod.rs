//! The registration list view
//!
//! Browsing pages through the store with keyset pagination, searching the
//! in-memory snapshot, projecting both into a [`ViewModel`] and reporting the
//! outcome of every action as a [`Notice`].

pub mod controller;
pub mod error;
pub mod notice;
pub mod pagination;
pub mod projector;
pub mod search;

pub use controller::ListController;
pub use error::ViewError;
pub use notice::{Notice, NoticeLevel};
pub use pagination::{CursorCache, DEFAULT_CURSOR_CAPACITY, DEFAULT_PAGE_SIZE, PAGE_SIZES, Paginator, total_pages};
pub use projector::{ViewMode, ViewModel, page_window, project};
pub use search::{SearchField, SearchQuery, SearchState};
