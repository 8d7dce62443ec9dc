//! End-to-end binary tests
//!
//! These exercise the configuration and skip behavior only; anything that
//! would reach a real store or launch a browser needs credentials and is
//! out of scope here.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;

fn webext_publish() -> Command {
    let mut cmd = Command::cargo_bin("webext-publish").unwrap();
    cmd.env_clear();
    cmd
}

#[test]
#[serial]
fn test_missing_src_dir_fails() {
    webext_publish()
        .env("INPUT_ZIP_NAME", "ext.zip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUT_SRC_DIR"));
}

#[test]
#[serial]
fn test_missing_zip_name_fails() {
    webext_publish()
        .env("INPUT_SRC_DIR", "dist/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUT_ZIP_NAME"));
}

#[test]
#[serial]
fn test_no_stores_configured_skips_cleanly() {
    webext_publish()
        .env("INPUT_SRC_DIR", "dist/")
        .env("INPUT_ZIP_NAME", "ext.zip")
        .assert()
        .success()
        .stdout(predicate::str::contains("Both finished without error"));
}

#[test]
#[serial]
fn test_firefox_without_source_zip_fails() {
    webext_publish()
        .env("INPUT_SRC_DIR", "dist/")
        .env("INPUT_ZIP_NAME", "ext.zip")
        .env("INPUT_MOZILLA_ADDON_ID", "my-addon")
        .env("MOZILLA_USERNAME", "dev@example.com")
        .env("MOZILLA_PASSWORD", "hunter2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUT_ZIP_SRC_NAME"));
}

#[test]
#[serial]
fn test_help_mentions_both_stores() {
    webext_publish()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chrome").and(predicate::str::contains("Firefox")));
}
