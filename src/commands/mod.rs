//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the database through a [`ListController`].

pub mod browse;
pub mod edit;
pub mod list;
pub mod stats;
pub mod transfer;

use crate::db::Database;
use crate::output;
use crate::view::{DEFAULT_CURSOR_CAPACITY, DEFAULT_PAGE_SIZE, ListController, Notice};
use crate::RegdeskError;

type Result<T> = std::result::Result<T, RegdeskError>;

/// Settings shared by every command that opens the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page_size: usize,
    pub cursor_capacity: usize,
    pub quiet: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cursor_capacity: DEFAULT_CURSOR_CAPACITY,
            quiet: false,
        }
    }
}

/// Open the list on `db` and load its first page
///
/// # Errors
/// Returns `RegdeskError::ActionFailed` if the registrations cannot be loaded.
pub async fn open_list(db: &Database, options: ListOptions) -> Result<ListController<&Database>> {
    let mut list = ListController::with_cursor_capacity(db, options.page_size, options.cursor_capacity);
    fail_on(list.refresh().await)?;
    Ok(list)
}

/// Turn an error notice from a navigation action into a command failure
fn fail_on(notice: Option<Notice>) -> Result<()> {
    match notice {
        Some(notice) if notice.is_error() => Err(RegdeskError::ActionFailed(notice.to_string())),
        _ => Ok(()),
    }
}

/// Print a mutation's notice, failing the command if it reports an error
fn report(notice: &Notice, quiet: bool) -> Result<()> {
    if notice.is_error() {
        return Err(RegdeskError::ActionFailed(notice.to_string()));
    }
    if !quiet {
        println!("{}", output::notice(notice));
    }
    Ok(())
}

pub use browse::execute as browse;
pub use edit::{delete, edit, pay, toggle};
pub use list::{list, search, show};
pub use stats::execute as stats;
pub use transfer::{export, import};
