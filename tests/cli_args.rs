//! Integration tests for the CLI surface
//!
//! Exercises the binary end to end for the paths that need no network access:
//! help, the empty-query prompt in both formats, and cache clearing.

use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_timein"))
        .args(args)
        .output()
        .expect("Failed to execute timein")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("timein"), "Help should mention timein");
    assert!(stdout.contains("--format"), "Help should mention --format");
    assert!(
        stdout.contains("--clear-cache"),
        "Help should mention --clear-cache"
    );
}

#[test]
fn test_empty_query_in_plain_format_fails_with_prompt() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = run_cli(&["--cache-dir", temp_dir.path().to_str().unwrap()]);

    assert!(!output.status.success(), "Empty query should exit nonzero");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Enter a city name"),
        "Should prompt for a city name: {}",
        stderr
    );
}

#[test]
fn test_empty_query_in_alfred_format_emits_prompt_item() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = run_cli(&[
        "--format",
        "alfred",
        "--cache-dir",
        temp_dir.path().to_str().unwrap(),
    ]);

    // The prompt row is valid Script Filter output, not a failure
    assert!(output.status.success(), "Alfred prompt should exit zero");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("Stdout should be Script Filter JSON");
    assert_eq!(json["items"][0]["title"], "Enter a city name");
    assert_eq!(json["items"][0]["valid"], false);
}

#[test]
fn test_clear_cache_removes_snapshot_and_exits_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let snapshot = temp_dir.path().join("timezones.json");
    std::fs::write(
        &snapshot,
        r#"{"capacity": 100, "entries": [["bangkok", "Asia/Bangkok"]]}"#,
    )
    .expect("Should seed snapshot");

    let output = run_cli(&[
        "--clear-cache",
        "--cache-dir",
        temp_dir.path().to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Clear should exit successfully");
    assert!(!snapshot.exists(), "Snapshot file should be removed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cleared"), "Should report the clear: {}", stdout);
}
