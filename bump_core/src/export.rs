//! CSV export of the symptom log.
//!
//! The export is written to a temp file next to the destination and renamed
//! into place, so a failed export never leaves a half-written CSV behind.

use crate::dates::format_date_for_database;
use crate::{Error, Result, SymptomEntry};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    date: String,
    week: u32,
    symptom: String,
    severity: u8,
    notes: Option<String>,
    logged_at: String,
}

impl TryFrom<&SymptomEntry> for CsvRow {
    type Error = crate::Error;

    fn try_from(entry: &SymptomEntry) -> Result<Self> {
        Ok(CsvRow {
            id: entry.id.to_string(),
            date: format_date_for_database(entry.date)?,
            week: entry.week,
            symptom: entry.symptom.clone(),
            severity: entry.severity,
            notes: entry.notes.clone(),
            logged_at: entry.logged_at.to_rfc3339(),
        })
    }
}

/// Export every entry of the symptom log to `csv_path`
///
/// Rows are ordered by entry date, then by log time. The destination is
/// replaced atomically. Returns the number of rows written.
pub fn export_symptoms_csv(log_path: &Path, csv_path: &Path) -> Result<usize> {
    let mut entries = crate::symptoms::read_symptoms(log_path)?;
    entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.logged_at.cmp(&b.logged_at)));

    let parent = match csv_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = csv::Writer::from_writer(temp.as_file());
        if entries.is_empty() {
            writer.write_record([
                "id", "date", "week", "symptom", "severity", "notes", "logged_at",
            ])?;
        }
        for entry in &entries {
            writer.serialize(CsvRow::try_from(entry)?)?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(csv_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} symptoms to {:?}", entries.len(), csv_path);
    Ok(entries.len())
}
