//! Browse command - interactive list session
//!
//! Shows the current page, then asks for the next action until the user
//! quits. Every choice becomes a [`BrowseAction`] applied to the
//! [`ListController`], so the session logic can be driven without a terminal.

use super::{ListOptions, Result, open_list};
use crate::db::{Database, RegistrationStore};
use crate::model::{FlagField, RecordId, Registration, RegistrationField, RegistrationPatch};
use crate::view::{ListController, Notice, PAGE_SIZES, SearchField, ViewModel};
use crate::{RegdeskError, output};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

/// One step of a browse session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    Next,
    Prev,
    Jump(usize),
    PageSize(usize),
    Search(String),
    Field(SearchField),
    ClearSearch,
    TogglePayment(RecordId),
    ToggleFlag(RecordId, FlagField),
    Edit(RecordId, RegistrationPatch),
    Delete(RecordId),
    Export(PathBuf),
    Quit,
}

/// Apply one action, returning the notice to show (if any)
pub async fn apply<S: RegistrationStore>(list: &mut ListController<S>, action: BrowseAction) -> Option<Notice> {
    match action {
        BrowseAction::Next => list.next_page().await,
        BrowseAction::Prev => list.prev_page().await,
        BrowseAction::Jump(page) => list.set_page(page).await,
        BrowseAction::PageSize(size) => list.set_page_size(size).await,
        BrowseAction::Search(term) => list.set_search_term(&term).await,
        BrowseAction::Field(field) => list.set_search_field(field).await,
        BrowseAction::ClearSearch => list.clear_search().await,
        BrowseAction::TogglePayment(id) => Some(list.toggle_payment(&id).await),
        BrowseAction::ToggleFlag(id, flag) => Some(list.toggle_field(&id, flag).await),
        BrowseAction::Edit(id, patch) => Some(list.save(&id, &patch).await),
        BrowseAction::Delete(id) => Some(list.delete(&id).await),
        BrowseAction::Export(dir) => Some(list.export(&dir).await),
        BrowseAction::Quit => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Next,
    Prev,
    Jump,
    PageSize,
    Search,
    Field,
    ClearSearch,
    Payment,
    Flag,
    Edit,
    Delete,
    Export,
    Quit,
}

impl MenuItem {
    const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next page",
            Self::Prev => "Previous page",
            Self::Jump => "Go to page...",
            Self::PageSize => "Change page size...",
            Self::Search => "Search...",
            Self::Field => "Search in field...",
            Self::ClearSearch => "Clear search",
            Self::Payment => "Toggle payment...",
            Self::Flag => "Toggle accommodation flag...",
            Self::Edit => "Edit field...",
            Self::Delete => "Delete registration...",
            Self::Export => "Export to CSV",
            Self::Quit => "Quit",
        }
    }
}

/// Menu entries that make sense for the current view
fn menu_items(view: &ViewModel) -> Vec<MenuItem> {
    let mut items = Vec::new();
    if view.has_next {
        items.push(MenuItem::Next);
    }
    if view.has_prev {
        items.push(MenuItem::Prev);
    }
    if view.total_pages > 1 {
        items.push(MenuItem::Jump);
    }
    items.extend([MenuItem::PageSize, MenuItem::Search, MenuItem::Field]);
    if view.is_searching() {
        items.push(MenuItem::ClearSearch);
    }
    if !view.records.is_empty() {
        items.extend([MenuItem::Payment, MenuItem::Flag, MenuItem::Edit, MenuItem::Delete]);
    }
    items.extend([MenuItem::Export, MenuItem::Quit]);
    items
}

fn prompt_error(e: dialoguer::Error) -> RegdeskError {
    RegdeskError::InvalidInput(format!("Failed to read input: {e}"))
}

fn pick_record(theme: &ColorfulTheme, records: &[Registration]) -> Result<Option<RecordId>> {
    let names: Vec<String> = records
        .iter()
        .map(|reg| format!("{} ({})", reg.name, reg.payment_status.label()))
        .collect();
    let choice = Select::with_theme(theme)
        .with_prompt("Registration")
        .items(&names)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;
    Ok(choice.map(|index| records[index].id.clone()))
}

/// Ask the user what to do next
fn prompt_action(theme: &ColorfulTheme, view: &ViewModel, export_dir: &Path) -> Result<BrowseAction> {
    let items = menu_items(view);
    let labels: Vec<&str> = items.iter().map(|item| item.label()).collect();
    let Some(choice) = Select::with_theme(theme)
        .with_prompt("Action")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?
    else {
        return Ok(BrowseAction::Quit);
    };

    let action = match items[choice] {
        MenuItem::Next => BrowseAction::Next,
        MenuItem::Prev => BrowseAction::Prev,
        MenuItem::Jump => {
            let page: usize = Input::with_theme(theme)
                .with_prompt(format!("Page (1-{})", view.total_pages))
                .interact_text()
                .map_err(prompt_error)?;
            BrowseAction::Jump(page)
        }
        MenuItem::PageSize => {
            let sizes: Vec<String> = PAGE_SIZES.iter().map(ToString::to_string).collect();
            let current = PAGE_SIZES
                .iter()
                .position(|size| *size == view.page_size)
                .unwrap_or_default();
            let index = Select::with_theme(theme)
                .with_prompt("Registrations per page")
                .items(&sizes)
                .default(current)
                .interact()
                .map_err(prompt_error)?;
            BrowseAction::PageSize(PAGE_SIZES[index])
        }
        MenuItem::Search => {
            let term: String = Input::with_theme(theme)
                .with_prompt("Search")
                .with_initial_text(view.search_term.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            BrowseAction::Search(term)
        }
        MenuItem::Field => {
            let labels: Vec<&str> = SearchField::VARIANTS.iter().map(|f| f.label()).collect();
            let current = SearchField::VARIANTS
                .iter()
                .position(|f| *f == view.search_field)
                .unwrap_or_default();
            let index = Select::with_theme(theme)
                .with_prompt("Search in")
                .items(&labels)
                .default(current)
                .interact()
                .map_err(prompt_error)?;
            BrowseAction::Field(SearchField::VARIANTS[index])
        }
        MenuItem::ClearSearch => BrowseAction::ClearSearch,
        MenuItem::Payment => match pick_record(theme, &view.records)? {
            Some(id) => BrowseAction::TogglePayment(id),
            None => return prompt_action(theme, view, export_dir),
        },
        MenuItem::Flag => {
            let Some(id) = pick_record(theme, &view.records)? else {
                return prompt_action(theme, view, export_dir);
            };
            let labels: Vec<String> = FlagField::ALL.iter().map(ToString::to_string).collect();
            let index = Select::with_theme(theme)
                .with_prompt("Flag")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            BrowseAction::ToggleFlag(id, FlagField::ALL[index])
        }
        MenuItem::Edit => {
            let Some(id) = pick_record(theme, &view.records)? else {
                return prompt_action(theme, view, export_dir);
            };
            let labels: Vec<&str> = RegistrationField::ALL.iter().map(|f| f.header()).collect();
            let index = Select::with_theme(theme)
                .with_prompt("Field")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            let field = RegistrationField::ALL[index];
            let current = view
                .records
                .iter()
                .find(|reg| reg.id == id)
                .and_then(|reg| field.value(reg))
                .map(|value| value.into_owned())
                .unwrap_or_default();
            let value: String = Input::with_theme(theme)
                .with_prompt(field.header())
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            let patch = if value.is_empty() {
                RegistrationPatch::new().clear(field)
            } else {
                RegistrationPatch::new().set(field, value)
            };
            BrowseAction::Edit(id, patch)
        }
        MenuItem::Delete => {
            let Some(id) = pick_record(theme, &view.records)? else {
                return prompt_action(theme, view, export_dir);
            };
            let confirmed = Confirm::with_theme(theme)
                .with_prompt("Delete this registration?")
                .default(false)
                .interact()
                .map_err(prompt_error)?;
            if !confirmed {
                return prompt_action(theme, view, export_dir);
            }
            BrowseAction::Delete(id)
        }
        MenuItem::Export => BrowseAction::Export(export_dir.to_path_buf()),
        MenuItem::Quit => BrowseAction::Quit,
    };
    Ok(action)
}

fn render(list: &ListController<&Database>) {
    let stats = list.stats();
    println!(
        "\n{} registrations, {} paid, {} Baptized, {} Professing\n",
        stats.total, stats.paid, stats.baptized, stats.professing
    );
    for line in output::page_lines(&list.view(), false) {
        println!("{line}");
    }
}

/// Execute the browse command
///
/// # Errors
/// Returns an error if the list cannot be loaded or input cannot be read.
pub async fn execute(db: &Database, export_dir: PathBuf, options: ListOptions) -> Result<()> {
    let mut list = open_list(db, options).await?;
    let theme = ColorfulTheme::default();

    loop {
        render(&list);
        let action = prompt_action(&theme, &list.view(), &export_dir)?;
        if action == BrowseAction::Quit {
            return Ok(());
        }
        if let Some(notice) = apply(&mut list, action).await {
            println!("{}", output::notice(&notice));
        }
    }
}
