//! Integration tests for the medtrack binary.
//!
//! These tests verify end-to-end behavior including:
//! - The add/take/toggle/remove workflow
//! - Streak reporting
//! - Reminder registry bookkeeping
//! - Data persistence across invocations

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("medtrack"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Medicine intake and adherence streak tracker",
        ));
}

#[test]
fn test_add_creates_store_and_registry() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add")
        .arg("Aspirin")
        .arg("--at")
        .arg("09:00")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Aspirin"))
        .stdout(predicate::str::contains("9:00 AM"));

    assert!(data_dir.join("medicines.json").exists());
    assert!(data_dir.join("reminders.json").exists());

    let registry = fs::read_to_string(data_dir.join("reminders.json")).unwrap();
    let regs: serde_json::Value = serde_json::from_str(&registry).unwrap();
    assert_eq!(regs.as_array().unwrap().len(), 1);
}

#[test]
fn test_add_rejects_empty_name() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("   ")
        .arg("--at")
        .arg("09:00")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_add_rejects_bad_time() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("Aspirin")
        .arg("--at")
        .arg("25:00")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_list_empty_store() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All-meds streak: 0 days"))
        .stdout(predicate::str::contains("No medicines yet"));
}

#[test]
fn test_take_today_yields_one_day_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add")
        .arg("Aspirin")
        .arg("--at")
        .arg("09:00")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // Streak is 0 until today's intake is confirmed.
    cli()
        .arg("streak")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 days"));

    cli()
        .arg("take")
        .arg("Aspirin")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked Aspirin as taken"));

    cli()
        .arg("streak")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 day"));
}

#[test]
fn test_toggle_off_drops_streak_and_registration() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add")
        .arg("Aspirin")
        .arg("--at")
        .arg("09:00")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("take")
        .arg("Aspirin")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("toggle")
        .arg("Aspirin")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aspirin is now off"));

    // Zero enabled medicines means a zero streak.
    cli()
        .arg("streak")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 days"));

    let registry = fs::read_to_string(data_dir.join("reminders.json")).unwrap();
    let regs: serde_json::Value = serde_json::from_str(&registry).unwrap();
    assert!(regs.as_array().unwrap().is_empty());
}

#[test]
fn test_take_with_explicit_date() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add")
        .arg("Aspirin")
        .arg("--at")
        .arg("09:00")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("take")
        .arg("Aspirin")
        .arg("--date")
        .arg("2026-01-05")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("taken for 2026-01-05"));

    let store = fs::read_to_string(data_dir.join("medicines.json")).unwrap();
    assert!(store.contains("2026-01-05"));
}

#[test]
fn test_take_rejects_malformed_date() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add")
        .arg("Aspirin")
        .arg("--at")
        .arg("09:00")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("take")
        .arg("Aspirin")
        .arg("--date")
        .arg("yesterday")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure();
}

#[test]
fn test_remove_unknown_medicine_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("remove")
        .arg("Nothing")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_remove_then_list_shows_empty() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add")
        .arg("Aspirin")
        .arg("--at")
        .arg("09:00")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("remove")
        .arg("Aspirin")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Aspirin"));

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No medicines yet"));
}

#[test]
fn test_persistence_across_invocations() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add")
        .arg("Vitamin D")
        .arg("--at")
        .arg("07:45")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Vitamin D"))
        .stdout(predicate::str::contains("7:45 AM"));
}
