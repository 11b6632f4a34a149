#![forbid(unsafe_code)]

//! Core domain model and business logic for Bump, a pregnancy journey tracker.
//!
//! This crate provides:
//! - Domain types (trimesters, journey stages, visibility rules, profiles)
//! - Gestational date calculations
//! - Journey stage gating and the built-in content library
//! - Dashboard summaries
//! - Persistence (profile, symptom log, CSV export)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod dates;
pub mod gate;
pub mod library;
pub mod summary;
pub mod profile;
pub mod symptoms;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use dates::{
    calculate_current_week, calculate_days_passed, calculate_days_remaining, calculate_due_date,
    calculate_trimester, due_date_to_lmp, format_date_for_database, parse_date, IntoDate,
};
pub use gate::{gate, should_show, Hidden};
pub use library::{build_default_library, get_default_library};
pub use summary::JourneySummary;
pub use symptoms::{read_symptoms, recent_symptoms, JsonlSymptomLog, SymptomSink};
pub use export::export_symptoms_csv;
