//! Runs the `manage` binary in a scratch directory.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn manage(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::from(cargo_bin_cmd!("manage"));
    cmd.current_dir(dir.path())
        .env_remove("EXTERNAL_SERVICE_URL")
        .env_remove("DATA_DIR")
        .env_remove("API_HOST");
    cmd
}

#[test]
fn no_command_prints_help() {
    let dir = tempfile::tempdir().unwrap();

    manage(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Question & PDF Management API"))
        .stdout(predicate::str::contains("  status"));
}

#[test]
fn unknown_command_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();

    manage(&dir)
        .arg("bogus")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unknown command: bogus"))
        .stdout(predicate::str::contains("Setup Commands:"));
}

#[test]
fn commands_are_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();

    manage(&dir)
        .arg("STATUS")
        .env("API_PORT", "8123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project Status"))
        .stdout(predicate::str::contains("API Port: 8123"))
        .stdout(predicate::str::contains("simulated answers"))
        .stdout(predicate::str::contains("Environment file: ✗ Not found"));
}
