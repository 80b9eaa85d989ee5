//! List, search and show commands - print registrations

use super::{ListOptions, Result, fail_on, open_list};
use crate::cli::PageArgs;
use crate::db::Database;
use crate::model::RecordId;
use crate::view::{SearchField, ViewModel};
use crate::{RegdeskError, output};

fn print_page(view: &ViewModel, quiet: bool) {
    if view.records.is_empty() && !quiet {
        if view.is_searching() {
            println!("{}", view.search_summary.as_deref().unwrap_or_default());
        } else {
            println!("No registrations found.");
        }
        return;
    }
    for line in output::page_lines(view, quiet) {
        println!("{line}");
    }
}

/// Build the view for one browse page
///
/// # Errors
/// Returns an error if the registrations cannot be loaded.
pub async fn list_view(db: &Database, paging: &PageArgs, options: ListOptions) -> Result<ViewModel> {
    let options = ListOptions {
        page_size: paging.page_size.unwrap_or(options.page_size),
        ..options
    };
    let mut list = open_list(db, options).await?;
    fail_on(list.set_page(paging.page).await)?;
    Ok(list.view())
}

/// Build the view for one page of search results
///
/// # Errors
/// Returns an error if the registrations cannot be loaded.
pub async fn search_view(
    db: &Database,
    term: &str,
    field: SearchField,
    paging: &PageArgs,
    options: ListOptions,
) -> Result<ViewModel> {
    let options = ListOptions {
        page_size: paging.page_size.unwrap_or(options.page_size),
        ..options
    };
    let mut list = open_list(db, options).await?;
    fail_on(list.set_search_field(field).await)?;
    fail_on(list.set_search_term(term).await)?;
    fail_on(list.set_page(paging.page).await)?;
    Ok(list.view())
}

/// Execute the list command
///
/// # Errors
/// Returns an error if the registrations cannot be loaded.
pub async fn list(db: &Database, paging: &PageArgs, options: ListOptions) -> Result<()> {
    let view = list_view(db, paging, options).await?;
    print_page(&view, options.quiet);
    Ok(())
}

/// Execute the search command
///
/// # Errors
/// Returns an error if the registrations cannot be loaded.
pub async fn search(
    db: &Database,
    term: &str,
    field: SearchField,
    paging: &PageArgs,
    options: ListOptions,
) -> Result<()> {
    let view = search_view(db, term, field, paging, options).await?;
    print_page(&view, options.quiet);
    Ok(())
}

/// Execute the show command
///
/// # Errors
/// Returns `RegdeskError::InvalidInput` if no registration has this id, or
/// another error if the database cannot be read.
pub fn show(db: &Database, id: &str, json: bool) -> Result<()> {
    let id = RecordId::new(id);
    let registration = db
        .get_record(&id)?
        .ok_or_else(|| RegdeskError::InvalidInput(format!("Registration not found: {id}")))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registration)?);
    } else {
        for line in output::registration_detail(&registration) {
            println!("{line}");
        }
    }
    Ok(())
}
