//! Comparison configuration and request types

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default directory for captured IR artifacts
pub const DEFAULT_OUTPUT_DIR: &str = "venom_output";

/// Default artifact file extension
pub const DEFAULT_EXTENSION: &str = "venom";

/// Default number of characters shown per preview
pub const DEFAULT_PREVIEW_LIMIT: usize = 1000;

/// Default compiler executable
pub const DEFAULT_COMPILER: &str = "vyper";

/// Which side of the comparison a compiler run belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationMode {
    /// Optimizations disabled
    Unoptimized,
    /// Optimizations enabled
    Optimized,
}

impl OptimizationMode {
    /// Name used in artifact file names and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unoptimized => "unoptimized",
            Self::Optimized => "optimized",
        }
    }
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered compiler flags for one optimization mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet(Vec<String>);

impl FlagSet {
    /// Create a flag set from anything yielding strings
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(flags.into_iter().map(Into::into).collect())
    }

    /// Flags in invocation order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether the set holds no flags
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single compiler run against one module. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationRequest {
    module_path: PathBuf,
    mode: OptimizationMode,
    flags: FlagSet,
}

impl CompilationRequest {
    /// Build a request for `module_path` under `mode`
    pub fn new(module_path: impl Into<PathBuf>, mode: OptimizationMode, flags: FlagSet) -> Self {
        Self {
            module_path: module_path.into(),
            mode,
            flags,
        }
    }

    /// Path of the module handed to the compiler
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    /// Optimization mode of this run
    pub fn mode(&self) -> OptimizationMode {
        self.mode
    }

    /// Mode-specific flags
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }
}

/// Explicit configuration threaded into the batch driver
///
/// Carries everything the engine needs; nothing is read from the
/// current directory or the environment.
///
/// # Examples
///
/// ```
/// use ir_compare::pipeline::{CompareConfig, OptimizationMode};
///
/// let config = CompareConfig::default();
/// assert_eq!(config.compiler, "vyper");
/// assert_eq!(config.preview_limit, 1000);
/// assert_eq!(
///     config.flags_for(OptimizationMode::Unoptimized).as_slice(),
///     ["--no-optimize"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Compiler executable, resolved through the process search path
    pub compiler: String,
    /// Arguments shared by both modes, placed before the mode flags
    pub base_args: Vec<String>,
    /// Flags for the unoptimized run
    pub unoptimized_flags: FlagSet,
    /// Flags for the optimized run
    pub optimized_flags: FlagSet,
    /// Directory receiving captured artifacts
    pub output_dir: PathBuf,
    /// Artifact file extension, without the dot
    pub extension: String,
    /// Per-invocation deadline (None = wait indefinitely)
    pub timeout: Option<Duration>,
    /// Characters of each captured text shown in console previews
    pub preview_limit: usize,
}

impl CompareConfig {
    /// Flags associated with `mode`
    pub fn flags_for(&self, mode: OptimizationMode) -> &FlagSet {
        match mode {
            OptimizationMode::Unoptimized => &self.unoptimized_flags,
            OptimizationMode::Optimized => &self.optimized_flags,
        }
    }

    /// Build the request for running `module` under `mode`
    pub fn request(&self, module: &Path, mode: OptimizationMode) -> CompilationRequest {
        CompilationRequest::new(module, mode, self.flags_for(mode).clone())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            base_args: vec!["-f".to_string(), "bb_runtime".to_string()],
            unoptimized_flags: FlagSet::new(["--no-optimize"]),
            optimized_flags: FlagSet::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            timeout: None,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}
