//! Command handlers for ir-compare CLI
//!
//! Each submodule handles a specific CLI command.

pub mod compare;
pub mod completions;
pub mod init;

pub use compare::{cmd_compare, CompareOptions};
pub use completions::cmd_completions;
pub use init::cmd_init;
