//! Core domain types for the pregnancy journey.
//!
//! This module defines the fundamental types used throughout the system:
//! - Trimesters and journey stages
//! - Content visibility rules and library entries
//! - The persisted gestational profile
//! - Symptom log entries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Trimester and Journey Stage
// ============================================================================

/// Coarse developmental phase of a pregnancy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    /// Map a gestational week to its trimester.
    ///
    /// Weeks up to 13 are first, 14..=26 second, 27 and later third.
    pub fn from_week(week: u32) -> Self {
        match week {
            0..=13 => Trimester::First,
            14..=26 => Trimester::Second,
            _ => Trimester::Third,
        }
    }

    /// Ordinal number (1, 2 or 3)
    pub fn number(self) -> u8 {
        match self {
            Trimester::First => 1,
            Trimester::Second => 2,
            Trimester::Third => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trimester::First => "First trimester",
            Trimester::Second => "Second trimester",
            Trimester::Third => "Third trimester",
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase of the user's journey, used to gate content.
///
/// The known stages are modelled explicitly; anything else is carried
/// verbatim so callers can gate on stages this crate does not define.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JourneyStage {
    PreConception,
    #[default]
    Pregnant,
    Postpartum,
    Other(String),
}

impl JourneyStage {
    pub fn as_str(&self) -> &str {
        match self {
            JourneyStage::PreConception => "pre_conception",
            JourneyStage::Pregnant => "pregnant",
            JourneyStage::Postpartum => "postpartum",
            JourneyStage::Other(s) => s,
        }
    }
}

impl From<&str> for JourneyStage {
    fn from(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "pre_conception" | "preconception" | "trying" => JourneyStage::PreConception,
            "pregnant" | "pregnancy" => JourneyStage::Pregnant,
            "postpartum" | "post_partum" => JourneyStage::Postpartum,
            _ => JourneyStage::Other(normalized),
        }
    }
}

impl From<String> for JourneyStage {
    fn from(raw: String) -> Self {
        JourneyStage::from(raw.as_str())
    }
}

impl From<JourneyStage> for String {
    fn from(stage: JourneyStage) -> Self {
        stage.as_str().to_string()
    }
}

impl FromStr for JourneyStage {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JourneyStage::from(s))
    }
}

impl fmt::Display for JourneyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Content Gating
// ============================================================================

/// Constraints deciding when a piece of content is shown.
///
/// An unset bound (or an empty stage list) imposes no constraint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisibilityRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<JourneyStage>,
}

impl VisibilityRule {
    /// Rule with no constraints (always visible)
    pub fn any() -> Self {
        Self::default()
    }

    pub fn min_week(mut self, week: u32) -> Self {
        self.min_week = Some(week);
        self
    }

    pub fn max_week(mut self, week: u32) -> Self {
        self.max_week = Some(week);
        self
    }

    /// Restrict to the given weeks (inclusive on both ends)
    pub fn weeks(self, min: u32, max: u32) -> Self {
        self.min_week(min).max_week(max)
    }

    pub fn stage(mut self, stage: JourneyStage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages<I>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = JourneyStage>,
    {
        self.stages.extend(stages);
        self
    }
}

/// Kind of content entry in the library
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Chapter,
    Tip,
    Checklist,
}

/// A piece of gated content (chapter, weekly tip, checklist)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub kind: ContentKind,
    pub body: String,
    #[serde(default)]
    pub rule: VisibilityRule,
}

/// The complete set of built-in content
#[derive(Clone, Debug, Default)]
pub struct ContentLibrary {
    pub items: Vec<ContentItem>,
}

// ============================================================================
// Profile and Symptom Types
// ============================================================================

/// A user's pregnancy anchor.
///
/// The LMP date is the only stored date; the due date is always derived.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GestationalProfile {
    pub last_period_date: NaiveDate,
    #[serde(default)]
    pub stage: JourneyStage,
    pub updated_at: DateTime<Utc>,
}

/// A single logged symptom
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SymptomEntry {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub week: u32,
    pub symptom: String,
    pub severity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
