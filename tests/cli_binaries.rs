//! End-to-end tests for the `scribe` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn scribe() -> Command {
    Command::cargo_bin("scribe").expect("scribe binary is built")
}

// ============================================================================
// Usage
// ============================================================================

/// Verifies help is printed to stdout and exits successfully.
#[test]
fn help_lists_usage() {
    scribe()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--settings"));
}

/// Verifies an unknown flag is rejected with a usage error.
#[test]
fn rejects_unknown_flag() {
    scribe()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--definitely-not-a-flag"));
}

/// Verifies an unknown level name is reported.
#[test]
fn rejects_unknown_level() {
    scribe()
        .args(["--level", "loud", "message"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scribe: unknown log level: loud"));
}

// ============================================================================
// Writing Lines
// ============================================================================

/// Verifies operands are written to stderr as one line by default.
#[test]
fn operands_go_to_stderr() {
    scribe()
        .args(["hello", "world"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[LOG]"))
        .stderr(predicate::str::contains("] hello world\n"));
}

/// Verifies every stdin line becomes its own log line.
#[test]
fn stdin_lines_are_logged_separately() {
    let output = scribe()
        .write_stdin("first\nsecond\n")
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();

    let text = String::from_utf8(output).expect("stderr is UTF-8");
    assert_eq!(text.lines().count(), 2, "{text}");
    assert!(text.contains("] first\n"));
    assert!(text.contains("] second\n"));
}

/// Verifies `--file` appends to the named log instead of stderr.
#[test]
fn file_option_writes_log_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scribe.log");

    scribe()
        .arg("--file")
        .arg(&path)
        .args(["--as-is", "a", "b"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let written = fs::read_to_string(&path).expect("log file written");
    assert!(written.ends_with("] ab\n"), "{written}");
}

/// Verifies lines below the baseline are dropped and `-v` raises it.
#[test]
fn verbosity_controls_debug_lines() {
    scribe()
        .args(["--level", "debug", "quiet"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    scribe()
        .args(["-vvvv", "--level", "debug", "loud"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[DBG]"))
        .stderr(predicate::str::contains("] loud\n"));
}

/// Verifies a settings file reconfigures the logger before the first line.
#[test]
fn settings_file_is_applied() {
    let dir = tempfile::tempdir().expect("temp dir");
    let settings = dir.path().join("scribe.settings");
    fs::write(&settings, "resetLevels: Trace\nnoPad\n").expect("write settings");

    scribe()
        .arg("--settings")
        .arg(&settings)
        .args(["--level", "trace", "x", "y"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Logger settings file: "))
        .stderr(predicate::str::contains("Logger: noPad\n"))
        .stderr(predicate::str::contains("[TRC]"))
        .stderr(predicate::str::contains("] xy\n"));
}

// ============================================================================
// Fatal
// ============================================================================

/// Verifies a fatal line is written and the process terminates abnormally.
#[test]
fn fatal_line_aborts_process() {
    scribe()
        .args(["--level", "fatal", "disk", "gone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[FTL]"))
        .stderr(predicate::str::contains("] disk gone\n"));
}
