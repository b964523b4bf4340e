//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - the ir-compare binary under test
//! - a fake compiler script standing in for the real one
//! - module fixtures

#[cfg(unix)]
pub mod fixtures;

use assert_cmd::Command;

/// Helper to get the ir-compare binary command
#[allow(dead_code)]
pub fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ir-compare"))
}

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}
