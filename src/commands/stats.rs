//! Stats command - print the dashboard counts

use super::{ListOptions, Result, open_list};
use crate::db::Database;
use crate::output;

/// Execute the stats command
///
/// # Errors
/// Returns an error if the registrations cannot be loaded.
pub async fn execute(db: &Database, options: ListOptions) -> Result<()> {
    let list = open_list(db, options).await?;
    let stats = list.stats();

    if options.quiet {
        println!("{}\t{}\t{}\t{}", stats.total, stats.paid, stats.baptized, stats.professing);
    } else {
        for line in output::stats_lines(&stats) {
            println!("{line}");
        }
    }
    Ok(())
}
