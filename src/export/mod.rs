//! CSV export and import of registrations
//!
//! Exports always cover the full snapshot, independent of what page or search
//! the list is showing. Every cell is double-quoted with embedded quotes
//! doubled, rows end with `\n` and the file is UTF-8. Flags are written as
//! `Yes`/`No`, the payment status as `Paid`/`Unpaid` and absent optional
//! fields as empty cells.
//!
//! [`read_csv`] parses an export back into registrations.

use crate::model::{Registration, RegistrationField};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod error;

pub use error::ExportError;

/// Column headers, in [`RegistrationField::ALL`] order
pub const HEADERS: [&str; 25] = {
    let mut headers = [""; 25];
    let mut i = 0;
    while i < RegistrationField::ALL.len() {
        headers[i] = RegistrationField::ALL[i].header();
        i += 1;
    }
    headers
};

/// File name for an export made on `date`: `registrations_YYYY-MM-DD.csv`
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("registrations_{}.csv", date.format("%Y-%m-%d"))
}

/// A rendered export, ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl ExportFile {
    /// Render `records` as a CSV dated `date`
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Empty` if there are no records, or another
    /// `ExportError` if the CSV cannot be produced.
    pub fn render(records: &[Registration], date: NaiveDate) -> Result<Self, ExportError> {
        Ok(Self {
            file_name: export_file_name(date),
            contents: to_csv(records)?,
        })
    }

    /// Write the file into `dir` and return its path
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)?;
        info!(path = %path.display(), bytes = self.contents.len(), "Wrote export");
        Ok(path)
    }
}

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'));
    builder
}

/// Serialize `records` to CSV text, header first
///
/// # Errors
///
/// Returns `ExportError::Empty` for an empty slice, or another `ExportError`
/// if writing fails.
pub fn to_csv(records: &[Registration]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = writer_builder().from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for record in records {
        writer.write_record(
            RegistrationField::ALL
                .iter()
                .map(|field| field.export_cell(record).into_owned()),
        )?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse an exported CSV back into registrations
///
/// The header must match [`HEADERS`] exactly. Imported records carry no id.
///
/// # Errors
///
/// Returns `ExportError::HeaderMismatch` for an unexpected header,
/// `ExportError::MalformedRow` for a row with the wrong width, or
/// `ExportError::Model` for a cell that does not map onto its field.
pub fn read_csv(input: &str) -> Result<Vec<Registration>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?;
    if let Some(bad) = headers
        .iter()
        .zip(HEADERS)
        .find_map(|(found, expected)| (found != expected).then_some(found))
    {
        return Err(ExportError::HeaderMismatch(bad.to_string()));
    }
    if headers.len() != HEADERS.len() {
        return Err(ExportError::HeaderMismatch(format!(
            "{} columns, expected {}",
            headers.len(),
            HEADERS.len()
        )));
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != HEADERS.len() {
            return Err(ExportError::MalformedRow {
                row: index + 1,
                found: row.len(),
                expected: HEADERS.len(),
            });
        }
        let mut registration = Registration::default();
        for (field, cell) in RegistrationField::ALL.iter().zip(row.iter()) {
            field.import_cell(&mut registration, cell)?;
        }
        records.push(registration);
    }
    Ok(records)
}
