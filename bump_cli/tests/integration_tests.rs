//! Integration tests for the bump binary.
//!
//! These tests verify end-to-end behavior including:
//! - Profile setup from LMP or due date
//! - Dashboard summary and content gating
//! - Symptom logging and CSV export
//!
//! Every invocation pins `--today` so results do not depend on the clock.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bump"))
}

/// Run `bump` against a data dir with a pinned reference date
fn bump(data_dir: &Path, today: &str) -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir").arg(data_dir).arg("--today").arg(today);
    cmd
}

fn setup_lmp(data_dir: &Path, lmp: &str, stage: &str) {
    bump(data_dir, "2024-01-02")
        .args(["setup", "--lmp", lmp, "--stage", stage])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pregnancy journey tracker"));
}

#[test]
fn test_status_without_profile_fails() {
    let temp_dir = setup_test_dir();

    bump(temp_dir.path(), "2024-04-01")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bump setup"));
}

#[test]
fn test_setup_from_lmp() {
    let temp_dir = setup_test_dir();

    bump(temp_dir.path(), "2024-01-02")
        .args(["setup", "--lmp", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Due date:    2024-10-06"))
        .stdout(predicate::str::contains("Stage:       pregnant"));

    let profile = fs::read_to_string(temp_dir.path().join("profile.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&profile).unwrap();
    assert_eq!(json["last_period_date"], "2024-01-01");
    assert_eq!(json["stage"], "pregnant");
}

#[test]
fn test_setup_from_due_date() {
    let temp_dir = setup_test_dir();

    bump(temp_dir.path(), "2024-01-02")
        .args(["setup", "--due-date", "2024-10-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last period: 2024-01-01"));
}

#[test]
fn test_setup_rejects_both_anchors() {
    let temp_dir = setup_test_dir();

    bump(temp_dir.path(), "2024-01-02")
        .args(["setup", "--lmp", "2024-01-01", "--due-date", "2024-10-06"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join("profile.json").exists());
}

#[test]
fn test_setup_rejects_malformed_date() {
    let temp_dir = setup_test_dir();

    bump(temp_dir.path(), "2024-01-02")
        .args(["setup", "--lmp", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse"));

    assert!(!temp_dir.path().join("profile.json").exists());
}

#[test]
fn test_setup_rejects_lmp_at_end_of_calendar() {
    let temp_dir = setup_test_dir();

    bump(temp_dir.path(), "2024-01-02")
        .args(["setup", "--lmp", "+262143-06-01"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parse"));

    assert!(!temp_dir.path().join("profile.json").exists());
}

#[test]
fn test_malformed_today_fails() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "someday")
        .arg("status")
        .assert()
        .failure();
}

#[test]
fn test_status_mid_pregnancy() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "2024-04-01")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("WEEK 14"))
        .stdout(predicate::str::contains("Second trimester"))
        .stdout(predicate::str::contains("Days remaining: 188"));
}

#[test]
fn test_status_is_default_command() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "2024-01-03")
        .assert()
        .success()
        .stdout(predicate::str::contains("WEEK 1"));
}

#[test]
fn test_status_overdue() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "2024-10-16")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overdue by:     10 days"))
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn test_content_gated_by_week() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    // 2024-03-07 is 66 days after LMP: week 10
    bump(temp_dir.path(), "2024-03-07")
        .arg("content")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content for week 10"))
        .stdout(predicate::str::contains("The first trimester"))
        .stdout(predicate::str::contains("Your dating scan"))
        .stdout(predicate::str::contains("Pack your hospital bag").not());
}

#[test]
fn test_content_all_shows_lock_reasons() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "2024-03-07")
        .args(["content", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pack your hospital bag (unlocks at week 32)"))
        .stdout(predicate::str::contains("The fourth trimester (not for this stage)"));
}

#[test]
fn test_content_for_postpartum_stage() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "postpartum");

    bump(temp_dir.path(), "2024-11-01")
        .arg("content")
        .assert()
        .success()
        .stdout(predicate::str::contains("The fourth trimester"))
        .stdout(predicate::str::contains("The third trimester").not());
}

#[test]
fn test_symptom_log_and_list() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "2024-03-07")
        .args(["symptom", "log", "nausea", "--severity", "3", "--notes", "mornings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged nausea (severity 3) on 2024-03-07, week 10"));

    bump(temp_dir.path(), "2024-03-07")
        .args(["symptom", "log", "heartburn", "--severity", "2", "--date", "2024-02-01"])
        .assert()
        .success();

    bump(temp_dir.path(), "2024-03-08")
        .args(["symptom", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nausea (3/5) - mornings"))
        .stdout(predicate::str::contains("heartburn").not());

    bump(temp_dir.path(), "2024-03-08")
        .args(["symptom", "list", "--days", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("heartburn"));
}

#[test]
fn test_symptom_list_with_huge_window() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "2024-03-07")
        .args(["symptom", "log", "heartburn", "--severity", "2", "--date", "2024-01-15"])
        .assert()
        .success();

    bump(temp_dir.path(), "2024-03-07")
        .args(["symptom", "list", "--days", "9999999999999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("heartburn"));
}

#[test]
fn test_symptom_severity_validated() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    bump(temp_dir.path(), "2024-03-07")
        .args(["symptom", "log", "nausea", "--severity", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("severity must be between 1 and 5"));

    assert!(!temp_dir.path().join("symptoms.jsonl").exists());
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    setup_lmp(temp_dir.path(), "2024-01-01", "pregnant");

    for (name, date) in [("nausea", "2024-03-01"), ("fatigue", "2024-02-15")] {
        bump(temp_dir.path(), "2024-03-07")
            .args(["symptom", "log", name, "--severity", "2", "--date", date])
            .assert()
            .success();
    }

    let csv_path = temp_dir.path().join("export/symptoms.csv");
    bump(temp_dir.path(), "2024-03-07")
        .arg("export")
        .arg("--out")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 symptoms"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,date,week,symptom"));
    assert!(lines[1].contains("2024-02-15"));
    assert!(lines[2].contains("2024-03-01"));
}
