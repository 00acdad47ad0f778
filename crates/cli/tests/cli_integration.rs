//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `repline` binary and verify
//! exit codes, stdout content, and stderr content.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn repline() -> Command {
    let mut cmd = cargo_bin_cmd!("repline");
    cmd.env_remove("REPLINE_LOG");
    cmd
}

/// Write `content` to `name` inside a fresh temp dir.
fn write_temp(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path)
}

const MAXES: &str = r#"
[[max]]
exercise = "Back Squat"
weight = 130
recorded_on = "2023-11-01"

[[max]]
exercise = "Back Squat"
weight = 140
recorded_on = "2024-03-01"

[[max]]
exercise = "Back Squat"
weight = 120
reps = 3
recorded_on = "2024-05-01"
"#;

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    repline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set-line notation toolkit for strength training",
        ));
}

#[test]
fn version_exits_0() {
    repline()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repline"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    repline().assert().failure().code(2);
}

// ──────────────────────────────────────────────
// 2. parse
// ──────────────────────────────────────────────

#[test]
fn parse_standard_prints_kind_and_canonical_form() {
    repline()
        .args(["parse", "4x3@50 90s"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("standard\n"))
        .stdout(predicate::str::contains("  4 x 3 @50kg 90s"))
        .stdout(predicate::str::contains("rest_time_seconds: 90"));
}

#[test]
fn parse_wave_prints_one_line_per_phase() {
    repline()
        .args(["parse", "3-2-1-1-1 65"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wave"))
        .stdout(predicate::str::contains("1 x 3 @65kg"))
        .stdout(predicate::str::contains("sets: 5"));
}

#[test]
fn parse_percentage_reports_lookup() {
    repline()
        .args(["parse", "4 x 5 @80%"])
        .assert()
        .success()
        .stdout(predicate::str::contains("percentage_single"))
        .stdout(predicate::str::contains("needs_rm_lookup: true"))
        .stdout(predicate::str::contains("weight_percentage: 80"));
}

#[test]
fn parse_json_is_tagged() {
    let out = repline()
        .args(["--output", "json", "parse", "2x 10, 2-3RIR"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["kind"], "rir_only");
    assert_eq!(v["sets"], 2);
    assert_eq!(v["rir_min"], 2);
    assert_eq!(v["rir_max"], 3);
}

#[test]
fn parse_rejection_exits_1_with_accepted_forms() {
    repline()
        .args(["parse", "3 x 1 @50 60"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Expected 3 weights"))
        .stderr(predicate::str::contains("Accepted formats:"));
}

#[test]
fn parse_rejection_json_carries_kind() {
    let out = repline()
        .args(["--output", "json", "parse", "hello there"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["kind"], "structural_mismatch");
}

#[test]
fn quiet_suppresses_text_errors() {
    repline()
        .args(["--quiet", "parse", "4 x 0 @50kg"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty());
}

// ──────────────────────────────────────────────
// 3. format
// ──────────────────────────────────────────────

#[test]
fn format_array_of_records() {
    let (_dir, path) = write_temp(
        "records.json",
        r#"[
            {"sets": 4, "repetitions": 3, "weight": "50", "rest_time_seconds": 90},
            {"sets": 3, "repetitions": 5, "weight": "60", "weights": ["60", "70", "80"],
             "exercise_type": "multi_weight"}
        ]"#,
    );
    repline()
        .args(["format", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("4 x 3 @50kg 90s\n3 x 5 @60 70 80kg\n");
}

#[test]
fn format_display_style_from_stdin() {
    repline()
        .args(["format", "--display", "-"])
        .write_stdin(r#"{"sets": 4, "repetitions": 3, "weight": 50}"#)
        .assert()
        .success()
        .stdout("4×3 @ 50kg\n");
}

#[test]
fn format_percent_uses_source_percentage() {
    let (_dir, path) = write_temp(
        "record.json",
        r#"{"sets": 4, "repetitions": 5, "weight": "80",
            "source_percentage": {"kind": "single", "percentage": "80"}}"#,
    );
    repline()
        .args(["format", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("4 x 5 @80kg\n");
    repline()
        .args(["format", "--percent", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("4 x 5 @80%\n");
}

#[test]
fn format_missing_file_exits_1() {
    repline()
        .args(["format", "does/not/exist.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn format_invalid_json_exits_1() {
    let (_dir, path) = write_temp("bad.json", "{ not json");
    repline()
        .args(["format", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid record JSON"));
}

// ──────────────────────────────────────────────
// 4. resolve
// ──────────────────────────────────────────────

#[test]
fn resolve_uses_latest_single_rep_max() {
    let (_dir, maxes) = write_temp("maxes.toml", MAXES);
    repline()
        .args([
            "resolve",
            "3 x 5 @75-85%",
            "--exercise",
            "back squat",
            "--maxes",
            maxes.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("3 x 5 @105-119kg\n");
}

#[test]
fn resolve_json_prints_records() {
    let (_dir, maxes) = write_temp("maxes.toml", MAXES);
    let out = repline()
        .args([
            "--output",
            "json",
            "resolve",
            "4 x 5 @80% 2m",
            "--exercise",
            "Back Squat",
            "--maxes",
            maxes.to_str().unwrap(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v[0]["weight"], "112");
    assert_eq!(v[0]["rest_time_seconds"], 120);
    assert_eq!(v[0]["source_percentage"]["percentage"], "80");
}

#[test]
fn resolve_absolute_line_passes_through() {
    let (_dir, maxes) = write_temp("maxes.toml", "");
    repline()
        .args([
            "resolve",
            "3-2-1 70",
            "--exercise",
            "Clean",
            "--maxes",
            maxes.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("1 x 3 @70kg\n1 x 2 @70kg\n1 x 1 @70kg\n");
}

#[test]
fn resolve_without_max_is_rm_not_found() {
    let (_dir, maxes) = write_temp("maxes.toml", MAXES);
    let out = repline()
        .args([
            "--output",
            "json",
            "resolve",
            "4 x 5 @80%",
            "--exercise",
            "Deadlift",
            "--maxes",
            maxes.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["kind"], "rm_not_found");
}

#[test]
fn resolve_rejects_bad_maxes_date() {
    let (_dir, maxes) = write_temp(
        "maxes.toml",
        "[[max]]\nexercise = \"Bench\"\nweight = 100\nrecorded_on = \"2024-02-30\"\n",
    );
    repline()
        .args([
            "resolve",
            "4 x 5 @80%",
            "--exercise",
            "Bench",
            "--maxes",
            maxes.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("max #1 ('Bench')"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let (_dir, maxes) = write_temp("maxes.toml", MAXES);
    repline()
        .args([
            "--verbose",
            "resolve",
            "4 x 5 @80%",
            "--exercise",
            "Back Squat",
            "--maxes",
            maxes.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("4 x 5 @112kg\n")
        .stderr(predicate::str::contains("one-rep max"));
}
