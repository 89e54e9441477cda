//! Integration tests for the ItinerAI CLI
//!
//! These exercise the argument surface and request validation only; nothing
//! here reaches the model hub or the summary endpoint.

use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"].iter().copied().chain(args.iter().copied()))
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help with the help flag
#[test]
fn test_cli_help() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("itinerai"));
    assert!(stdout.contains("language model"));
    assert!(stdout.contains("--destination"));
    assert!(stdout.contains("--duration-days"));
}

/// Missing required fields are rejected by the argument parser
#[test]
fn test_missing_required_fields() {
    let output = run_cli(&["--destination", "Rome"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required"));
    assert!(stderr.contains("--start-location"));
}

/// An empty destination never invokes the pipeline
#[test]
fn test_empty_destination_rejected() {
    let output = run_cli(&[
        "--start-location",
        "Paris",
        "--destination",
        "",
        "--purpose",
        "sightseeing",
        "--preferences",
        "food, history",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input"));
    assert!(stderr.contains("Destination cannot be empty"));
}

/// Out-of-range trip duration is rejected before any model load
#[test]
fn test_duration_out_of_range_rejected() {
    let output = run_cli(&[
        "--start-location",
        "Paris",
        "--destination",
        "Rome",
        "--duration-days",
        "0",
        "--purpose",
        "sightseeing",
        "--preferences",
        "food",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input"));
    assert!(stderr.contains("duration"));
}

/// Budget only accepts the three enumerated tiers
#[test]
fn test_invalid_budget_rejected() {
    let output = run_cli(&[
        "--start-location",
        "Paris",
        "--destination",
        "Rome",
        "--budget",
        "extravagant",
        "--purpose",
        "sightseeing",
        "--preferences",
        "food",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"));
    assert!(stderr.contains("moderate"));
}
