//! Error types for the comparison pipeline

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use super::config::OptimizationMode;

/// Classification of a failed compiler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationErrorKind {
    /// The compiler could not be started
    SpawnFailure,
    /// The compiler exited with a non-zero status
    CompilerFailure,
    /// The compiler exceeded its deadline and was killed
    Timeout,
}

impl InvocationErrorKind {
    /// Stable identifier used in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpawnFailure => "spawn_failure",
            Self::CompilerFailure => "compiler_failure",
            Self::Timeout => "timeout",
        }
    }
}

/// A compiler invocation that did not produce usable output
///
/// Every variant is fatal to the batch.
#[derive(Error, Debug)]
pub enum InvocationError {
    /// Process could not be started (not found, permission denied, ...)
    #[error("failed to start `{program}` for {} ({mode}): {source}", .module.display())]
    SpawnFailure {
        /// Compiler executable
        program: String,
        /// Module being compiled
        module: PathBuf,
        /// Mode of the failed run
        mode: OptimizationMode,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Process ran and exited unsuccessfully
    #[error(
        "`{program}` failed on {} ({mode}) with {}",
        .module.display(),
        describe_status(.status)
    )]
    CompilerFailure {
        /// Compiler executable
        program: String,
        /// Module being compiled
        module: PathBuf,
        /// Mode of the failed run
        mode: OptimizationMode,
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Process exceeded its deadline
    #[error("`{program}` timed out on {} ({mode}) after {timeout:?}", .module.display())]
    Timeout {
        /// Compiler executable
        program: String,
        /// Module being compiled
        module: PathBuf,
        /// Mode of the failed run
        mode: OptimizationMode,
        /// Configured deadline
        timeout: Duration,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

impl InvocationError {
    /// Failure classification
    pub fn kind(&self) -> InvocationErrorKind {
        match self {
            Self::SpawnFailure { .. } => InvocationErrorKind::SpawnFailure,
            Self::CompilerFailure { .. } => InvocationErrorKind::CompilerFailure,
            Self::Timeout { .. } => InvocationErrorKind::Timeout,
        }
    }

    /// Module whose invocation failed
    pub fn module(&self) -> &std::path::Path {
        match self {
            Self::SpawnFailure { module, .. }
            | Self::CompilerFailure { module, .. }
            | Self::Timeout { module, .. } => module,
        }
    }

    /// Mode of the failed invocation
    pub fn mode(&self) -> OptimizationMode {
        match self {
            Self::SpawnFailure { mode, .. }
            | Self::CompilerFailure { mode, .. }
            | Self::Timeout { mode, .. } => *mode,
        }
    }

    /// Diagnostics captured from the compiler, if any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CompilerFailure { stderr, .. } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }
}

/// Failure to persist a captured artifact
///
/// Never fatal: the in-memory comparison is still reported.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Output directory could not be created
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// I/O error source
        #[source]
        source: std::io::Error,
    },

    /// Artifact file could not be written
    #[error("failed to write artifact {}: {source}", .path.display())]
    Write {
        /// Artifact path
        path: PathBuf,
        /// I/O error source
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    /// Path that could not be created or written
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => path,
        }
    }
}
