//! Output formatting for CLI display
//!
//! This module renders registrations, pages, notices and counts for the
//! terminal. Quiet mode drops decoration so output can be piped.

use crate::model::{Registration, RegistrationField};
use crate::stats::DashboardStats;
use crate::view::{Notice, NoticeLevel, ViewModel};
use colored::Colorize;

/// Colored payment label
#[must_use]
pub fn payment_label(reg: &Registration) -> String {
    let label = reg.payment_status.label();
    if reg.is_paid() {
        label.green().to_string()
    } else {
        label.yellow().to_string()
    }
}

/// One registration as a list line
///
/// In quiet mode only the id and name are printed, tab separated.
#[must_use]
pub fn registration_row(reg: &Registration, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", reg.id, reg.name);
    }
    let church = if reg.local_church.is_empty() {
        "-"
    } else {
        reg.local_church.as_str()
    };
    format!(
        "  {}  {}  [{}, {}]  {}",
        reg.id.as_str().dimmed(),
        reg.name.bold(),
        church,
        reg.membership,
        payment_label(reg)
    )
}

/// Every field of a registration, one `Header: value` line each
#[must_use]
pub fn registration_detail(reg: &Registration) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", "ID".bold(), reg.id)];
    lines.extend(RegistrationField::ALL.iter().map(|field| {
        format!("{}: {}", field.header().bold(), field.export_cell(reg))
    }));
    lines
}

/// Page numbers with the current one highlighted
#[must_use]
pub fn page_links(view: &ViewModel) -> String {
    view.page_window
        .iter()
        .map(|page| {
            if *page == view.page {
                format!("[{page}]").cyan().bold().to_string()
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "Showing 11 to 20 of 23 registrations" footer with page links
#[must_use]
pub fn page_footer(view: &ViewModel) -> String {
    let noun = if view.is_searching() { "results" } else { "registrations" };
    match view.range {
        Some((start, end)) => format!(
            "Showing {start} to {end} of {} {noun}  |  Page {} of {}  {}",
            view.total_items,
            view.page,
            view.total_pages,
            page_links(view)
        ),
        None => format!("No {noun} to show"),
    }
}

/// The current page as printable lines
#[must_use]
pub fn page_lines(view: &ViewModel, quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if !quiet && let Some(summary) = &view.search_summary {
        lines.push(summary.italic().to_string());
    }
    lines.extend(view.records.iter().map(|reg| registration_row(reg, quiet)));
    if !quiet {
        lines.push(page_footer(view).dimmed().to_string());
    }
    lines
}

/// A notice colored by its level
#[must_use]
pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("{} {}", "✓".green(), notice.message),
        NoticeLevel::Error => format!("{} {}: {}", "✗".red(), notice.title.red().bold(), notice.message),
    }
}

/// Dashboard counts as printable lines
#[must_use]
pub fn stats_lines(stats: &DashboardStats) -> Vec<String> {
    vec![
        format!("Total registrations: {}", stats.total.to_string().bold()),
        format!("Paid:                {}", stats.paid.to_string().green()),
        format!("Unpaid:              {}", stats.unpaid().to_string().yellow()),
        format!("Baptized:            {}", stats.baptized),
        format!("Professing:          {}", stats.professing),
    ]
}
