/// Smoke tests to verify the binary runs without panicking
use std::process::{Command, Output};

fn termbonsai(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_termbonsai"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute termbonsai")
}

#[test]
fn binary_shows_help() {
    let output = termbonsai(&["--help"]);

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("termbonsai"),
        "Help output should mention termbonsai"
    );
    assert!(stdout.contains("--seed"));
}

#[test]
fn binary_shows_version() {
    let output = termbonsai(&["--version"]);

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_flag_fails_gracefully() {
    let output = termbonsai(&["--nonexistent-flag"]);

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid flag should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid flag should not cause panic"
    );
}

#[test]
fn print_mode_is_deterministic() {
    let args = ["--print", "--rows", "20", "--cols", "40", "--seed", "42"];
    let first = termbonsai(&args);
    let second = termbonsai(&args);

    assert!(
        first.status.success(),
        "Print mode failed: {}",
        String::from_utf8_lossy(&first.stderr)
    );
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8_lossy(&first.stdout);
    assert_eq!(stdout.lines().count(), 20);
}

#[test]
fn json_mode_reports_the_seed() {
    let output = termbonsai(&["--json", "--rows", "12", "--cols", "30", "--seed", "7"]);

    assert!(
        output.status.success(),
        "JSON mode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be JSON");
    assert_eq!(value["seed"], 7);
    assert_eq!(value["rows"], 12);
    assert_eq!(value["cols"], 30);
    assert_eq!(value["grid"].as_array().map(Vec::len), Some(12));
}

#[test]
fn negative_life_is_clamped_not_rejected() {
    let output = termbonsai(&["--print", "--rows", "10", "--cols", "20", "--life", "-5", "--seed", "1"]);

    assert!(
        output.status.success(),
        "Negative life should be clamped: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn oversized_delays_do_not_panic() {
    let output = termbonsai(&[
        "--print", "--rows", "5", "--cols", "10", "--seed", "1", "--time", "inf", "--wait", "1e300",
    ]);

    assert!(
        output.status.success(),
        "Huge delays should be clamped: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked at"));
}
