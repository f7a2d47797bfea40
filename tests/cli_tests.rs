//! Binary-level tests: arguments, exit codes, output and log files

mod common;

use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use common::RoleFixture;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn cmd(fixture: &RoleFixture) -> Command {
    let mut cmd = cargo_bin_cmd!("roledoc");
    cmd.current_dir(&fixture.root).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_writes_default_output_and_log_file() {
    let fixture = RoleFixture::complete();

    cmd(&fixture)
        .arg(&fixture.role)
        .arg("--logs")
        .arg(&fixture.logs)
        .assert()
        .success()
        .stdout(contains("Documentation written to"));

    let md = fixture.read(&fixture.doc_path());
    assert!(md.starts_with("# web\n"));
    assert!(md.contains("*Documentation generated on "));

    let logs: Vec<_> = fs::read_dir(&fixture.logs)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("roledoc_") && name.ends_with(".log"), "{}", name);
    assert!(fixture.read(&logs[0]).contains("Documentation saved to"));
}

#[test]
fn test_empty_role_succeeds_with_warnings() {
    let fixture = RoleFixture::empty();

    cmd(&fixture)
        .arg("web")
        .args(["-o", "report.md", "-l", "logs"])
        .assert()
        .success()
        .code(0)
        .stdout(contains("warning(s)"));

    let md = fixture.read(&fixture.root.join("report.md"));
    assert!(md.contains("## Tasks\n_None found._"));

    // Warnings always reach the log file, even without -v
    let log = fs::read_dir(&fixture.logs).unwrap().next().unwrap().unwrap().path();
    assert!(fixture.read(&log).contains("missing directory: defaults"));
}

#[test]
fn test_verbose_shows_warnings_on_screen() {
    let fixture = RoleFixture::empty();

    cmd(&fixture)
        .args(["web", "-v", "--logs", "logs"])
        .assert()
        .success()
        .stderr(contains("file not found"));
}

#[test]
fn test_quiet_run_keeps_warnings_off_screen() {
    let fixture = RoleFixture::empty();

    cmd(&fixture)
        .args(["web", "--logs", "logs"])
        .assert()
        .success()
        .stderr(contains("file not found").not());
}

#[test]
fn test_unwritable_output_fails_without_partial_file() {
    let fixture = RoleFixture::complete();
    let out = fixture.root.join("no-such-dir").join("DOCUMENTATION.md");

    cmd(&fixture)
        .arg(&fixture.role)
        .arg("--output")
        .arg(&out)
        .args(["--logs", "logs"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to write documentation"));

    assert!(!out.exists());
    assert!(!fixture.root.join("no-such-dir").exists());
}

#[test]
fn test_missing_role_directory_is_invocation_error() {
    let fixture = RoleFixture::empty();

    cmd(&fixture)
        .args(["does-not-exist", "--logs", "logs"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("cannot read role directory"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    let fixture = RoleFixture::empty();

    cmd(&fixture).assert().failure().code(2);
}

#[test]
fn test_version_flag() {
    let fixture = RoleFixture::empty();

    cmd(&fixture)
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_timestamp_is_byte_identical() {
    let fixture = RoleFixture::complete();
    let run = || {
        cmd(&fixture)
            .args(["web", "--no-timestamp", "--logs", "logs"])
            .assert()
            .success();
        fs::read(fixture.doc_path()).unwrap()
    };

    assert_eq!(run(), run());
}
