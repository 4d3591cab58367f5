//! Integration tests for `jagent run` preflight checks.
//!
//! The happy path (spawning java) is covered by unit tests with a stubbed
//! launcher.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn jagent() -> Command {
    Command::cargo_bin("jagent").expect("jagent binary should exist")
}

fn temp_home() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let home = dir.path().to_string_lossy().into_owned();
    (dir, home)
}

#[test]
fn test_run_without_jar_fails_with_install_hint() {
    let (_dir, home) = temp_home();
    jagent()
        .args(["run"])
        .env("JAGENT_HOME", &home)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("jagent install"));
}

#[test]
fn test_run_without_configuration_fails_with_configure_hint() {
    let (_dir, home) = temp_home();
    let libexec = Path::new(&home).join("libexec");
    std::fs::create_dir_all(&libexec).expect("libexec");
    std::fs::write(libexec.join("remoting.jar"), b"jar").expect("jar");

    jagent()
        .args(["run"])
        .env("JAGENT_HOME", &home)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("jagent configure"));
}

#[test]
fn test_run_with_placeholder_configuration_refuses() {
    let (_dir, home) = temp_home();
    let libexec = Path::new(&home).join("libexec");
    std::fs::create_dir_all(&libexec).expect("libexec");
    std::fs::write(libexec.join("remoting.jar"), b"jar").expect("jar");
    std::fs::write(
        Path::new(&home).join("agent_options.cfg"),
        "-jnlpUrl\n<jnlp url>\n-secret\n<secret key>\n",
    )
    .expect("options");

    jagent()
        .args(["run"])
        .env("JAGENT_HOME", &home)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("placeholder"));
}
