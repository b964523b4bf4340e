//! Tests for the `init` command

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::get_bin;

#[test]
fn test_init_writes_starter_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    get_bin()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".ir-compare.toml"))
        .stdout(predicate::str::contains("sccp_demo.vy"));

    let content = fs::read_to_string(temp_dir.path().join(".ir-compare.toml"))
        .expect("config file should exist");
    assert!(content.contains("compiler = \"vyper\""));
    assert!(content.contains("track2-advanced/src/algebraic_demo.vy"));
    assert!(content.contains("track2-advanced/src/comparison_demo.vy"));
    assert!(content.contains("output-dir = \"venom_output\""));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(".ir-compare.toml");
    fs::write(&path, "compiler = \"custom\"\n").unwrap();

    get_bin()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .code(73)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "compiler = \"custom\"\n");
}

#[test]
fn test_init_force_overwrites() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(".ir-compare.toml");
    fs::write(&path, "compiler = \"custom\"\n").unwrap();

    get_bin()
        .args(["init", "--force"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("compiler = \"vyper\""));
}

#[test]
fn test_init_output_is_loadable_by_compare() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    get_bin()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    // None of the starter modules exist here, so every one is skipped
    // and the compiler is never started.
    get_bin()
        .args(["compare", "--compiler", "ir-compare-no-such-compiler-xyz"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 analyzed, 6 skipped, 0 failed"));
}
