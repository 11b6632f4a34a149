//! Symptom log persistence.
//!
//! Entries are appended to a JSONL (JSON Lines) file with file locking
//! so that concurrent invocations never interleave records.

use crate::dates::{self, IntoDate};
use crate::{Error, Result, SymptomEntry};
use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Lowest accepted severity
pub const MIN_SEVERITY: u8 = 1;

/// Highest accepted severity
pub const MAX_SEVERITY: u8 = 5;

impl SymptomEntry {
    /// Build a validated entry for `date`, computing the gestational week from `lmp`
    pub fn new(
        symptom: &str,
        severity: u8,
        date: impl IntoDate,
        lmp: impl IntoDate,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let symptom = symptom.trim();
        if symptom.is_empty() {
            return Err(Error::Validation("symptom name cannot be blank".into()));
        }

        if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
            return Err(Error::Validation(format!(
                "severity must be between {} and {}, got {}",
                MIN_SEVERITY, MAX_SEVERITY, severity
            )));
        }

        let date = date.into_date()?;
        let week = dates::calculate_current_week(lmp, dates::start_of_day(date))?;

        Ok(Self {
            id: Uuid::new_v4(),
            logged_at: now,
            date,
            week,
            symptom: symptom.to_string(),
            severity,
            notes: None,
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }
}

/// Sink for persisting symptom entries
pub trait SymptomSink {
    fn append(&mut self, entry: &SymptomEntry) -> Result<()>;
}

/// JSONL-based symptom log with file locking
pub struct JsonlSymptomLog {
    path: PathBuf,
}

impl JsonlSymptomLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SymptomSink for JsonlSymptomLog {
    fn append(&mut self, entry: &SymptomEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended symptom {} ({}) to log", entry.id, entry.symptom);
        Ok(())
    }
}

/// Read all entries from a symptom log, in file order
pub fn read_symptoms(path: &Path) -> Result<Vec<SymptomEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    // Split on raw bytes so a line of invalid UTF-8 is skipped like any other bad record
    for (line_num, line_result) in reader.split(b'\n').enumerate() {
        let line = line_result?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<SymptomEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed symptom at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} symptoms from log", entries.len());
    Ok(entries)
}

/// Entries dated within the last `days` days of `now`, newest first
pub fn recent_symptoms(path: &Path, days: i64, now: DateTime<Utc>) -> Result<Vec<SymptomEntry>> {
    let today = now.date_naive();
    // A window reaching past the start of the calendar has no lower bound
    let cutoff = Duration::try_days(days).and_then(|window| today.checked_sub_signed(window));

    let mut entries: Vec<SymptomEntry> = read_symptoms(path)?
        .into_iter()
        .filter(|e| cutoff.map_or(true, |c| e.date > c) && e.date <= today)
        .collect();

    entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.logged_at.cmp(&a.logged_at)));
    Ok(entries)
}
