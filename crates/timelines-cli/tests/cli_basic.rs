//! Basic CLI E2E tests.
//!
//! Tests run the built binary with HOME pointed at a temporary directory,
//! so the stored config of the machine running them is never touched.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against the config under `home` and return
/// (stdout, stderr, exit code).
fn run_cli_in(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_timelines-cli"))
        .args(args)
        .env("HOME", home)
        .env("TIMELINES_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command against a fresh, empty home.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let home = TempDir::new().unwrap();
    run_cli_in(home.path(), args)
}

#[test]
fn test_range_day() {
    let (stdout, _, code) = run_cli(&["range", "--center", "2024-06-15", "--scale", "day"]);
    assert_eq!(code, 0, "range failed");
    assert!(stdout.contains("2024-06-05 .. 2024-06-25"), "{stdout}");
    assert!(stdout.contains("June 15, 2024"), "{stdout}");
}

#[test]
fn test_range_json() {
    let (stdout, _, code) = run_cli(&["range", "--center", "2000-01-01", "--scale", "year", "--json"]);
    assert_eq!(code, 0, "range --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["start"], "1995-01-01");
    assert_eq!(parsed["end"], "2005-12-31");
    assert_eq!(parsed["scale"], "year");
}

#[test]
fn test_ticks_mark_current_decade() {
    let (stdout, _, code) = run_cli(&["ticks", "--center", "1987-03-01", "--scale", "decade"]);
    assert_eq!(code, 0, "ticks failed");
    assert!(stdout.lines().any(|l| l.starts_with("> 1980-01-01  1980s")), "{stdout}");
    assert_eq!(stdout.lines().count(), 6);
}

#[test]
fn test_ticks_json() {
    let (stdout, _, code) = run_cli(&["ticks", "--center", "2024-06-15", "--scale", "day", "--json"]);
    assert_eq!(code, 0, "ticks --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["ticks"].as_array().map(Vec::len), Some(21));
    assert_eq!(parsed["center"]["label"], "June 15, 2024");
}

#[test]
fn test_scales_in_zoom_order() {
    let (stdout, _, code) = run_cli(&["scales"]);
    assert_eq!(code, 0, "scales failed");
    let scales: Vec<_> = stdout.lines().collect();
    assert_eq!(scales.first(), Some(&"day"));
    assert_eq!(scales.last(), Some(&"prehistoric"));
}

#[test]
fn test_rejects_unknown_scale() {
    let (_, stderr, code) = run_cli(&["range", "--scale", "fortnight"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("fortnight"), "{stderr}");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "view.nonexistent"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"), "{stderr}");
}

#[test]
fn test_config_stays_in_home() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli_in(home.path(), &["config", "set", "view.default_scale", "decade"]);
    assert_eq!(code, 0);
    assert!(home.path().join(".config/timelines-dev/config.toml").exists());

    let (stdout, _, code) = run_cli_in(home.path(), &["config", "get", "view.default_scale"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "decade");
}

#[test]
fn test_failed_source_test_limits_events_to_local() {
    let home = TempDir::new().unwrap();
    let home = home.path();
    let setup: [&[&str]; 5] = [
        &["source", "set-rest", "--endpoint", "api.example.com"],
        &["config", "set", "simulation.rest_success_rate", "0"],
        &["config", "set", "simulation.rest_test_delay_ms", "0"],
        &["config", "set", "simulation.rest_fetch_delay_ms", "0"],
        &["config", "set", "simulation.local_delay_ms", "0"],
    ];
    for args in setup {
        let (_, stderr, code) = run_cli_in(home, args);
        assert_eq!(code, 0, "{args:?}: {stderr}");
    }

    let (_, stderr, code) = run_cli_in(home, &["source", "test"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("connection test failed"), "{stderr}");

    let (stdout, _, _) = run_cli_in(home, &["config", "get", "source_status.connection"]);
    assert_eq!(stdout.trim(), "failed");

    // Remote events would be served if the failed test were forgotten.
    run_cli_in(home, &["config", "set", "simulation.rest_success_rate", "1"]);
    let (stdout, stderr, code) = run_cli_in(home, &["events", "--all", "--json"]);
    assert_eq!(code, 0, "{stderr}");
    let events: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e["source"] == "local"), "{stdout}");

    run_cli_in(home, &["source", "set-rest", "--endpoint", "api.other.example"]);
    let (stdout, _, _) = run_cli_in(home, &["config", "get", "source_status.connection"]);
    assert_eq!(stdout.trim(), "untested");
}

#[test]
fn test_config_set_fills_new_source_fields() {
    let home = TempDir::new().unwrap();
    let home = home.path();
    for (key, value) in [
        ("source.type", "mysql"),
        ("source.host", "db.example"),
        ("source.port", "3306"),
        ("source.database", "history"),
        ("source.password", "1234"),
    ] {
        let (_, stderr, code) = run_cli_in(home, &["config", "set", key, value]);
        assert_eq!(code, 0, "{key}: {stderr}");
    }

    let (stdout, _, code) = run_cli_in(home, &["source", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("mysql://db.example:3306/history"), "{stdout}");
}
