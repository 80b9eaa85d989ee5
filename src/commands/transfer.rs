//! Export and import commands - move registrations in and out as files

use super::{ListOptions, Result, open_list, report};
use crate::cli::ImportFormat;
use crate::db::{Database, RegistrationStore};
use crate::export;
use crate::model::Registration;
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the export command: write every registration into `dir`
///
/// # Errors
/// Returns an error if the registrations cannot be loaded, there are none,
/// or the file cannot be written.
pub async fn export(db: &Database, dir: &Path, options: ListOptions) -> Result<()> {
    let list = open_list(db, options).await?;
    let notice = list.export(dir).await;
    report(&notice, options.quiet)
}

/// Parse registrations from file contents
///
/// # Errors
/// Returns an error if the contents are not valid for `format`.
pub fn parse_registrations(contents: &str, format: ImportFormat) -> Result<Vec<Registration>> {
    Ok(match format {
        ImportFormat::Json => serde_json::from_str(contents)?,
        ImportFormat::Csv => export::read_csv(contents)?,
    })
}

/// Execute the import command: add every registration in `file`
///
/// Ids in the file are ignored; the store assigns new ones.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or an insert fails.
pub async fn import(db: &Database, file: &Path, format: ImportFormat, quiet: bool) -> Result<usize> {
    let contents = fs::read_to_string(file)?;
    let registrations = parse_registrations(&contents, format)?;
    let total = registrations.len();

    for registration in registrations {
        db.insert(registration).await?;
    }
    db.flush()?;
    info!(file = %file.display(), total, "Imported registrations");

    if !quiet {
        println!("Imported {total} registration(s) from {}", file.display());
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegdeskError;
    use crate::testing::{TestDb, registration};
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_with_wire_names() {
        let json = r#"[{
            "id": "ignored",
            "pangalan": "Maria Santos",
            "kasapian": "Professing",
            "plato": "true",
            "paymentStatus": "paid"
        }]"#;

        let parsed = parse_registrations(json, ImportFormat::Json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Maria Santos");
        assert!(parsed[0].plate.get());
        assert!(parsed[0].is_paid());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_registrations("{not json", ImportFormat::Json);
        assert!(matches!(result, Err(RegdeskError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_export_then_import_csv() {
        let source = TestDb::new();
        source.db().insert_record(registration("Ana")).unwrap();
        source.db().insert_record(registration("Ben")).unwrap();
        let dir = TempDir::new().unwrap();
        let options = ListOptions {
            quiet: true,
            ..ListOptions::default()
        };

        export(source.db(), dir.path(), options).await.unwrap();
        let file = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap().path();

        let target = TestDb::new();
        let imported = import(target.db(), &file, ImportFormat::Csv, true).await.unwrap();

        assert_eq!(imported, 2);
        let names: Vec<_> = target.db().list_all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Ana", "Ben"]);
    }

    #[tokio::test]
    async fn test_export_empty_database_fails() {
        let test_db = TestDb::new();
        let dir = TempDir::new().unwrap();

        let result = export(test_db.db(), dir.path(), ListOptions::default()).await;

        assert!(matches!(result, Err(RegdeskError::ActionFailed(ref msg)) if msg.contains("No Data")));
    }
}
