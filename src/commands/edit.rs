//! Pay, toggle, edit and delete commands - change one registration

use super::{ListOptions, Result, open_list, report};
use crate::db::Database;
use crate::model::{FlagField, RecordId, RegistrationPatch};
use crate::RegdeskError;
use dialoguer::Confirm;

/// Execute the pay command: toggle the payment status
///
/// # Errors
/// Returns an error if the registration cannot be loaded or updated.
pub async fn pay(db: &Database, id: &str, options: ListOptions) -> Result<()> {
    let mut list = open_list(db, options).await?;
    let notice = list.toggle_payment(&RecordId::new(id)).await;
    report(&notice, options.quiet)
}

/// Execute the toggle command: flip one accommodation flag
///
/// # Errors
/// Returns an error if the registration cannot be loaded or updated.
pub async fn toggle(db: &Database, id: &str, flag: FlagField, options: ListOptions) -> Result<()> {
    let mut list = open_list(db, options).await?;
    let notice = list.toggle_field(&RecordId::new(id), flag).await;
    report(&notice, options.quiet)
}

/// Execute the edit command: apply `FIELD=VALUE` assignments
///
/// # Errors
/// Returns an error if an assignment is malformed or the update fails.
pub async fn edit(db: &Database, id: &str, assignments: &[String], options: ListOptions) -> Result<()> {
    let patch = RegistrationPatch::from_assignments(assignments)?;
    let mut list = open_list(db, options).await?;
    let notice = list.save(&RecordId::new(id), &patch).await;
    report(&notice, options.quiet)
}

/// Execute the delete command, asking for confirmation unless `yes` or quiet
///
/// # Errors
/// Returns an error if confirmation cannot be read or the delete fails.
pub async fn delete(db: &Database, id: &str, yes: bool, options: ListOptions) -> Result<()> {
    let id = RecordId::new(id);
    let registration = db
        .get_record(&id)?
        .ok_or_else(|| RegdeskError::InvalidInput(format!("Registration not found: {id}")))?;

    if !yes && !options.quiet {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the registration of {}?", registration.name))
            .default(false)
            .interact()
            .map_err(|e| RegdeskError::InvalidInput(format!("Failed to get confirmation: {e}")))?;
        if !confirmed {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let mut list = open_list(db, options).await?;
    let notice = list.delete(&id).await;
    report(&notice, options.quiet)
}
