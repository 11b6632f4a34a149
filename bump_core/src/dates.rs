//! Gestational date arithmetic.
//!
//! Everything here is a pure function of its arguments. The two
//! time-relative calculations take the reference instant `now` explicitly;
//! only the outermost caller reads the wall clock.
//!
//! Dates enter through [`IntoDate`], so callers may pass a `NaiveDate`, a
//! `DateTime<Utc>`, or a string. Strings are parsed once by [`parse_date`]
//! and all arithmetic happens on `NaiveDate`.

use crate::{Error, Result, Trimester};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Earliest week ever reported
pub const MIN_WEEK: u32 = 1;

/// Latest week ever reported
pub const MAX_WEEK: u32 = 42;

/// Days from LMP to due date.
///
/// Pinned so that an LMP of 2024-01-01 yields a due date of 2024-10-06.
pub const DUE_DATE_OFFSET_DAYS: i64 = 40 * 7 - 1;

fn due_date_offset() -> Duration {
    Duration::days(DUE_DATE_OFFSET_DAYS)
}

/// A value that can be turned into a calendar date
pub trait IntoDate {
    fn into_date(self) -> Result<NaiveDate>;
}

impl IntoDate for NaiveDate {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoDate for &NaiveDate {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(*self)
    }
}

impl IntoDate for DateTime<Utc> {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self.date_naive())
    }
}

impl IntoDate for &str {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl IntoDate for &String {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl IntoDate for String {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(&self)
    }
}

/// Parse a date string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC before the
/// date is taken) and offset-less `YYYY-MM-DDTHH:MM:SS[.f]` timestamps,
/// which are read as UTC.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    tracing::debug!("Rejected date input {:?}", input);
    Err(Error::parse(input))
}

/// Due date for a given last menstrual period
pub fn calculate_due_date(lmp: impl IntoDate) -> Result<NaiveDate> {
    due_date_from(lmp.into_date()?)
}

/// Due date for an already-parsed LMP.
///
/// An LMP so close to the end of the calendar that its due date cannot be
/// represented is rejected as unparsable input.
pub fn due_date_from(lmp: NaiveDate) -> Result<NaiveDate> {
    lmp.checked_add_signed(due_date_offset())
        .ok_or_else(|| Error::parse(lmp.to_string()))
}

/// LMP implied by a due date (exact inverse of [`calculate_due_date`])
pub fn due_date_to_lmp(due_date: impl IntoDate) -> Result<NaiveDate> {
    let due_date = due_date.into_date()?;
    due_date
        .checked_sub_signed(due_date_offset())
        .ok_or_else(|| Error::parse(due_date.to_string()))
}

/// Current gestational week, clamped to `[1, 42]`.
///
/// Counts whole weeks since LMP and adds one, so the first seven days are
/// week 1. Future LMPs clamp to 1 and very old ones to 42.
pub fn calculate_current_week(lmp: impl IntoDate, now: DateTime<Utc>) -> Result<u32> {
    let days = calculate_days_passed(lmp, now)?;
    Ok(week_for_days(days))
}

/// Gestational week after `days` days since LMP, clamped to `[1, 42]`
pub fn week_for_days(days: i64) -> u32 {
    let raw = days / 7 + 1;
    raw.clamp(MIN_WEEK as i64, MAX_WEEK as i64) as u32
}

/// Trimester for a gestational week
pub fn calculate_trimester(week: u32) -> Trimester {
    Trimester::from_week(week)
}

/// Days since LMP; negative when the LMP lies in the future
pub fn calculate_days_passed(lmp: impl IntoDate, now: DateTime<Utc>) -> Result<i64> {
    let lmp = lmp.into_date()?;
    Ok((now.date_naive() - lmp).num_days())
}

/// Days until the due date; negative once overdue
pub fn calculate_days_remaining(due_date: impl IntoDate, now: DateTime<Utc>) -> Result<i64> {
    let due_date = due_date.into_date()?;
    Ok((due_date - now.date_naive()).num_days())
}

/// Format a date as `YYYY-MM-DD` for storage.
///
/// Timestamps contribute their UTC calendar date; the time of day is dropped.
pub fn format_date_for_database(date: impl IntoDate) -> Result<String> {
    Ok(date.into_date()?.format("%Y-%m-%d").to_string())
}

/// Midnight UTC on the given date, for use as a reference instant
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
