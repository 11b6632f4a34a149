//! Corruption recovery tests for the bump binary.
//!
//! These tests verify the system can handle:
//! - Corrupted profile files
//! - Corrupted or partially written symptom logs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bump"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_profile_requires_setup() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::write(data_dir.join("profile.json"), "{ invalid json }}}}").unwrap();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bump setup"));

    // Setup overwrites the corrupted file
    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "setup", "--lmp", "2024-01-01"])
        .assert()
        .success();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WEEK 10"));
}

#[test]
fn test_partial_symptom_line_is_skipped() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "setup", "--lmp", "2024-01-01"])
        .assert()
        .success();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "symptom", "log", "nausea", "--severity", "2"])
        .assert()
        .success();

    // Simulate a write cut off mid-record
    let log_path = data_dir.join("symptoms.jsonl");
    let mut file = fs::OpenOptions::new().append(true).open(&log_path).unwrap();
    writeln!(file, "{{\"id\":\"0000").unwrap();
    drop(file);

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "symptom", "log", "backache", "--severity", "4"])
        .assert()
        .success();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "symptom", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nausea"))
        .stdout(predicate::str::contains("backache"));

    let csv_path = data_dir.join("symptoms.csv");
    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-03-07", "export", "--out"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 symptoms"));
}

#[test]
fn test_missing_symptom_log_lists_nothing() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-03-07", "symptom", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No symptoms logged in the last 7 days."));
}
