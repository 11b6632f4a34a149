//! Gestational profile construction and persistence.
//!
//! The profile is stored as a single JSON file, written atomically under an
//! exclusive lock so that concurrent invocations never observe a torn file.

use crate::dates::{self, IntoDate};
use crate::{Error, GestationalProfile, JourneyStage, Result};
use chrono::{DateTime, NaiveDate, Utc};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl GestationalProfile {
    /// Profile anchored on a last menstrual period
    ///
    /// Rejects an LMP whose due date falls outside the calendar.
    pub fn from_lmp(lmp: impl IntoDate, stage: JourneyStage, now: DateTime<Utc>) -> Result<Self> {
        let last_period_date = lmp.into_date()?;
        dates::due_date_from(last_period_date)?;

        Ok(Self {
            last_period_date,
            stage,
            updated_at: now,
        })
    }

    /// Profile from a known due date; the LMP is derived from it
    pub fn from_due_date(
        due_date: impl IntoDate,
        stage: JourneyStage,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let lmp = dates::due_date_to_lmp(due_date)?;
        Self::from_lmp(lmp, stage, now)
    }

    pub fn due_date(&self) -> Result<NaiveDate> {
        dates::due_date_from(self.last_period_date)
    }

    /// Load the profile from disk with shared locking
    ///
    /// Returns `None` if the file doesn't exist. A file that cannot be read
    /// or parsed is logged and treated as missing.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::info!("No profile found at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open profile {:?}: {}. Ignoring it.", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock profile {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read profile {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        file.unlock()?;

        match serde_json::from_str::<GestationalProfile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(Some(profile))
            }
            Err(e) => {
                tracing::warn!("Failed to parse profile {:?}: {}. Ignoring it.", path, e);
                Ok(None)
            }
        }
    }

    /// Load the profile, failing if none has been set up
    pub fn require(path: &Path) -> Result<Self> {
        Self::load(path)?.ok_or_else(|| {
            Error::Profile("no pregnancy profile found; run `bump setup` first".into())
        })
    }

    /// Save the profile atomically
    ///
    /// Writes to a temp file in the same directory, syncs it, then renames
    /// it over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!(
            "Saved profile (LMP {}, stage {}) to {:?}",
            self.last_period_date,
            self.stage,
            path
        );
        Ok(())
    }
}
