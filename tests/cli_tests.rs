//! CLI interface tests
//!
//! Tests basic CLI functionality like --help, --version flags

use predicates::prelude::*;

mod common;
use common::get_bin;

#[test]
fn test_cli_help_flag_displays_usage_information() {
    get_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Optimized vs unoptimized"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_cli_version_flag_displays_version_number() {
    get_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ir-compare"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_without_subcommand_prints_usage() {
    get_bin()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: ir-compare <COMMAND>"));
}

#[test]
fn test_compare_help_lists_options() {
    get_bin()
        .args(["compare", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--compiler"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_unknown_subcommand_fails() {
    get_bin()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_completions_bash_mentions_binary() {
    get_bin()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ir-compare"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    get_bin()
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}
