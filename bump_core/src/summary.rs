//! Dashboard snapshot of where a user is in their pregnancy.

use crate::dates::{self, DUE_DATE_OFFSET_DAYS};
use crate::{GestationalProfile, JourneyStage, Result, Trimester};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Everything the dashboard shows, computed for one reference instant
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JourneySummary {
    pub last_period_date: NaiveDate,
    pub due_date: NaiveDate,
    pub current_week: u32,
    pub trimester: Trimester,
    pub days_passed: i64,
    pub days_remaining: i64,
    pub progress_percent: u8,
    pub stage: JourneyStage,
}

impl JourneySummary {
    /// Progress reaches 100% on the due date itself.
    pub fn compute(profile: &GestationalProfile, now: DateTime<Utc>) -> Result<Self> {
        let lmp = profile.last_period_date;
        let due_date = profile.due_date()?;
        let today = now.date_naive();

        let days_passed = (today - lmp).num_days();
        let days_remaining = (due_date - today).num_days();
        let current_week = dates::week_for_days(days_passed);

        let progress = (days_passed * 100 / DUE_DATE_OFFSET_DAYS).clamp(0, 100);

        let summary = Self {
            last_period_date: lmp,
            due_date,
            current_week,
            trimester: dates::calculate_trimester(current_week),
            days_passed,
            days_remaining,
            progress_percent: progress as u8,
            stage: profile.stage.clone(),
        };

        tracing::debug!(
            "Summary at {}: week {}, {} days remaining",
            today,
            summary.current_week,
            summary.days_remaining
        );
        Ok(summary)
    }

    /// Whole weeks left until the due date (never negative)
    pub fn weeks_remaining(&self) -> i64 {
        (self.days_remaining / 7).max(0)
    }

    pub fn is_overdue(&self) -> bool {
        self.days_remaining < 0
    }
}
