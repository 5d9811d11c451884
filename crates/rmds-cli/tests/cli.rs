//! End-to-end tests for the `rmds` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn demos() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

fn rmds() -> Command {
    let mut cmd = Command::cargo_bin("rmds").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

fn demo_workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "config.json",
        "curves.csv",
        "instruments.csv",
        "scenarios.json",
        "securities.tsv",
    ] {
        fs::copy(demos().join(name), dir.path().join(name)).unwrap();
    }
    dir
}

#[test]
fn help_lists_commands() {
    rmds()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("curve"))
        .stdout(predicate::str::contains("bootstrap"));
}

#[test]
fn curve_query_interpolates_between_pillars() {
    rmds()
        .args(["-f", "json", "curve", "--name", "OIS.USD", "--date", "2020-12-30"])
        .arg("--file")
        .arg(demos().join("curves.csv"))
        .args(["--at", "90,150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.999"))
        .stdout(predicate::str::contains("0.99766"));
}

#[test]
fn curve_query_rejects_bad_offset() {
    rmds()
        .args(["curve", "--name", "OIS.USD", "--date", "2020-12-30"])
        .arg("--file")
        .arg(demos().join("curves.csv"))
        .args(["--at", "soon"])
        .assert()
        .failure();
}

#[test]
fn curve_query_reports_missing_curve() {
    rmds()
        .args(["curve", "--name", "OIS.EUR", "--date", "2020-12-30"])
        .arg("--file")
        .arg(demos().join("curves.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn run_writes_results_file() {
    let dir = demo_workspace();

    rmds()
        .current_dir(dir.path())
        .args(["-f", "json", "run", "config.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NPV_BASE"))
        .stdout(predicate::str::contains("ACME"));

    let written = fs::read_to_string(dir.path().join("output/results.csv")).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("Security ID,Scenario Name,Scenario Date,NPV_BASE,NPV_UP,NPV_DOWN")
    );
    assert_eq!(lines.count(), 3);
}

#[test]
fn run_output_override() {
    let dir = demo_workspace();
    let target = dir.path().join("elsewhere.csv");

    rmds()
        .current_dir(dir.path())
        .args(["-q", "-f", "csv", "run", "config.json", "--output"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("UST_2025"));

    assert!(target.exists());
    assert!(!dir.path().join("output/results.csv").exists());
}

#[test]
fn run_fails_on_missing_config() {
    rmds()
        .args(["run", "no-such-config.json"])
        .assert()
        .failure();
}

#[test]
fn bootstrap_prints_solved_curve() {
    rmds()
        .arg("bootstrap")
        .arg("--file")
        .arg(demos().join("instruments.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("SOFR"))
        .stdout(predicate::str::contains("Repricing"));
}
