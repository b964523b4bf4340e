//! Configuration for ir-compare
//!
//! This module provides:
//! - .ir-compare.toml config file support
//! - the starter configuration written by `ir-compare init`

pub mod file;
pub mod loader;

pub use file::{ConfigFile, CONFIG_FILE_NAME, STARTER_MODULES};
pub use loader::ConfigLoader;
