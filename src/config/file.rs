//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::{
    CompareConfig, FlagSet, DEFAULT_COMPILER, DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR,
    DEFAULT_PREVIEW_LIMIT,
};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".ir-compare.toml";

/// Demo modules written by `ir-compare init`
pub const STARTER_MODULES: [&str; 6] = [
    "track2-advanced/src/algebraic_demo.vy",
    "track2-advanced/src/storage_demo.vy",
    "track2-advanced/src/sccp_demo.vy",
    "track2-advanced/src/sccp_simultaneous_demo.vy",
    "track2-advanced/src/branch_demo.vy",
    "track2-advanced/src/comparison_demo.vy",
];

/// ir-compare configuration file structure
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigFile {
    /// Compiler executable
    pub compiler: String,

    /// Arguments shared by both runs (e.g. the output format selector)
    pub base_args: Vec<String>,

    /// Flags that disable optimization
    pub unoptimized_flags: Vec<String>,

    /// Flags for the optimized run
    pub optimized_flags: Vec<String>,

    /// Modules to compare, in order
    pub modules: Vec<PathBuf>,

    /// Directory receiving artifacts
    pub output_dir: PathBuf,

    /// Artifact extension, without the dot
    pub extension: String,

    /// Per-invocation timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Characters shown in each console preview
    pub preview_limit: usize,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            base_args: vec!["-f".to_string(), "bb_runtime".to_string()],
            unoptimized_flags: vec!["--no-optimize".to_string()],
            optimized_flags: Vec::new(),
            modules: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            timeout_secs: None,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl ConfigFile {
    /// Defaults plus the demo module list
    pub fn starter() -> Self {
        Self {
            modules: STARTER_MODULES.iter().map(PathBuf::from).collect(),
            ..Self::default()
        }
    }

    /// Check that the values describe a usable comparison
    pub fn validate(&self) -> Result<()> {
        if self.compiler.trim().is_empty() {
            anyhow::bail!("compiler must not be empty");
        }

        if self.extension.is_empty() {
            anyhow::bail!("extension must not be empty");
        }
        if self.extension.starts_with('.') {
            anyhow::bail!(
                "extension '{}' must not start with a dot (use '{}')",
                self.extension,
                self.extension.trim_start_matches('.')
            );
        }
        if self.extension.contains(['/', '\\']) {
            anyhow::bail!(
                "extension '{}' must not contain a path separator",
                self.extension
            );
        }

        if self.timeout_secs == Some(0) {
            anyhow::bail!("timeout-secs must be greater than zero");
        }

        Ok(())
    }

    /// Resolve into the explicit engine configuration
    pub fn to_compare_config(&self) -> CompareConfig {
        CompareConfig {
            compiler: self.compiler.clone(),
            base_args: self.base_args.clone(),
            unoptimized_flags: FlagSet::new(&self.unoptimized_flags),
            optimized_flags: FlagSet::new(&self.optimized_flags),
            output_dir: self.output_dir.clone(),
            extension: self.extension.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            preview_limit: self.preview_limit,
        }
    }
}
