//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end. Everything here runs
//! without a backend: help/version output, completions, config printing,
//! the offline demo board, and the unreachable-backend boundary state.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get the binary to test.
fn buildboard() -> Command {
    Command::cargo_bin("buildboard").unwrap()
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    buildboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal kanban client"));
}

#[test]
fn test_short_help_flag() {
    buildboard().arg("-h").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    buildboard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_task_subcommand_help() {
    buildboard()
        .args(["task", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("take"))
        .stdout(predicate::str::contains("approve"));
}

#[test]
fn test_task_take_help() {
    buildboard()
        .args(["task", "take", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do"));
}

#[test]
fn test_board_help() {
    buildboard()
        .args(["board", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kanban board"));
}

// ============================================================================
// Offline Commands
// ============================================================================

#[test]
fn test_demo_renders_sample_board() {
    buildboard()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do"))
        .stdout(predicate::str::contains("In Progress"))
        .stdout(predicate::str::contains("In Review"))
        .stdout(predicate::str::contains("Done"));
}

#[test]
fn test_config_path_flag() {
    buildboard()
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_shows_base_url() {
    buildboard()
        .arg("config")
        .env_remove("VITE_API_BASE_URL")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url"));
}

#[test]
fn test_completions_bash() {
    buildboard()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buildboard"));
}

// ============================================================================
// Boundary States
// ============================================================================

#[test]
fn test_unreachable_backend_shows_boundary_state() {
    // Port 9 is discard; nothing listens there.
    buildboard()
        .args(["--api-url", "http://127.0.0.1:9/api/v1", "board"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Backend Required"));
}

#[test]
fn test_doctor_reports_unreachable_backend() {
    buildboard()
        .args(["--api-url", "http://127.0.0.1:9/api/v1", "doctor"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("UNREACHABLE"));
}

#[test]
fn test_transition_without_address_fails_with_hint() {
    buildboard()
        .args(["--api-url", "http://127.0.0.1:9/api/v1", "task", "take", "1"])
        .env_remove("BUILDBOARD_ADDRESS")
        .assert()
        .failure()
        .stderr(predicate::str::contains("address"));
}

// ============================================================================
// Argument Validation
// ============================================================================

#[test]
fn test_move_rejects_unknown_status() {
    buildboard()
        .args(["task", "move", "1", "archived"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown status"));
}

#[test]
fn test_unknown_subcommand_fails() {
    buildboard().arg("frobnicate").assert().failure();
}
