//! Integration tests for `jagent config`.
//!
//! All filesystem-touching tests set `JAGENT_CONFIG` to a temp path so they
//! never read or write `~/.jagent/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn jagent() -> Command {
    Command::cargo_bin("jagent").expect("jagent binary should exist")
}

/// Returns a `TempDir` and the path string for a settings file inside it.
/// The file does NOT exist yet.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml").to_string_lossy().into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// `jagent config show`
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_defaults_when_no_file() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "show"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("java.bin"))
        .stdout(predicate::str::contains("service.path-env"))
        .stdout(predicate::str::contains("/usr/bin:/bin:/usr/sbin:/sbin"));
}

#[test]
fn test_config_show_displays_env_var_labels() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "show"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("JAGENT_CONFIG"))
        .stdout(predicate::str::contains("JAGENT_HOME"));
}

#[test]
fn test_config_show_does_not_create_file() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "show"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success();
    assert!(
        !std::path::Path::new(&path).exists(),
        "show must not create the settings file"
    );
}

// ---------------------------------------------------------------------------
// `jagent config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_java_bin_persists() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "set", "java.bin", "/opt/java/bin/java"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("java.bin"));

    jagent()
        .args(["config", "show"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/java/bin/java"));
}

#[test]
fn test_config_set_path_env_persists() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "set", "service.path-env", "/usr/local/bin:/usr/bin"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success();

    jagent()
        .args(["config", "show"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("/usr/local/bin:/usr/bin"));
}

#[test]
fn test_config_set_one_key_preserves_the_other() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "set", "java.bin", "java17"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success();
    jagent()
        .args(["config", "set", "service.path-env", "/custom/bin"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success();

    jagent()
        .args(["config", "show"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("java17"))
        .stdout(predicate::str::contains("/custom/bin"));
}

#[test]
fn test_config_set_unknown_key_fails_listing_valid_keys() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "set", "unknown.key", "value"])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("java.bin")
                .and(predicate::str::contains("service.path-env")),
        );
}

#[test]
fn test_config_set_empty_value_fails() {
    let (_dir, path) = temp_config_path();
    jagent()
        .args(["config", "set", "java.bin", ""])
        .env("JAGENT_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_config_set_corrupt_yaml_returns_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, b"java: [not: closed").expect("write");
    jagent()
        .args(["config", "set", "java.bin", "java17"])
        .env("JAGENT_CONFIG", path.to_str().expect("path"))
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// Property-based tests
// ---------------------------------------------------------------------------

mod config_proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        /// set then show always reflects the last written value.
        #[test]
        fn prop_set_then_show_reflects_value(bin in "[a-z][a-z0-9/_.-]{0,30}") {
            let (_dir, path) = temp_config_path();
            jagent()
                .args(["config", "set", "java.bin", &bin])
                .env("JAGENT_CONFIG", &path)
                .assert()
                .success();
            jagent()
                .args(["config", "show"])
                .env("JAGENT_CONFIG", &path)
                .assert()
                .success()
                .stdout(predicate::str::contains(bin));
        }
    }
}
