//! Comparison results for a module and for a whole batch

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::error::{ArtifactError, InvocationError};
use super::metrics::LineMetrics;

/// Comparison of one module's optimized and unoptimized IR
///
/// Only constructed from two successful compiler runs, all at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    module_name: String,
    module_path: PathBuf,
    metrics: LineMetrics,
    reduction_percent: f64,
    unoptimized_artifact: PathBuf,
    optimized_artifact: PathBuf,
}

impl ComparisonReport {
    /// Build the report for a module from its metrics and artifact locations
    pub fn new(
        module_name: impl Into<String>,
        module_path: impl Into<PathBuf>,
        metrics: LineMetrics,
        unoptimized_artifact: PathBuf,
        optimized_artifact: PathBuf,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            module_path: module_path.into(),
            reduction_percent: metrics.reduction_percent(),
            metrics,
            unoptimized_artifact,
            optimized_artifact,
        }
    }

    /// Module stem
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Module path as configured
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    /// Unoptimized line count
    pub fn unoptimized_lines(&self) -> usize {
        self.metrics.unoptimized_lines
    }

    /// Optimized line count
    pub fn optimized_lines(&self) -> usize {
        self.metrics.optimized_lines
    }

    /// Lines removed by the optimizer
    pub fn line_delta(&self) -> i64 {
        self.metrics.line_delta()
    }

    /// Line reduction percentage (0 when the unoptimized IR is empty)
    pub fn reduction_percent(&self) -> f64 {
        self.reduction_percent
    }

    /// Where the unoptimized IR is persisted
    pub fn unoptimized_artifact(&self) -> &Path {
        &self.unoptimized_artifact
    }

    /// Where the optimized IR is persisted
    pub fn optimized_artifact(&self) -> &Path {
        &self.optimized_artifact
    }
}

/// Terminal state of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Every module was processed (skips allowed)
    Completed,
    /// A compiler invocation failed and the batch stopped
    Aborted,
}

impl BatchStatus {
    /// Name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        }
    }
}

/// A captured artifact that could not be persisted
#[derive(Debug)]
pub struct ArtifactFailure {
    /// Module whose artifact was lost
    pub module: PathBuf,
    /// The write error
    pub error: ArtifactError,
}

/// Outcome of a batch run
#[derive(Debug)]
pub struct BatchSummary {
    /// Reports for analyzed modules, in list order
    pub reports: Vec<ComparisonReport>,
    /// Modules not found on disk, in list order
    pub skipped_modules: Vec<PathBuf>,
    /// Non-fatal artifact write failures
    pub artifact_failures: Vec<ArtifactFailure>,
    /// The invocation failure that aborted the batch
    pub failure: Option<InvocationError>,
    /// Terminal state
    pub status: BatchStatus,
}

impl BatchSummary {
    /// Number of modules compared successfully
    pub fn analyzed_count(&self) -> usize {
        self.reports.len()
    }

    /// Number of modules skipped as missing
    pub fn skipped_count(&self) -> usize {
        self.skipped_modules.len()
    }

    /// Number of modules whose compilation failed
    pub fn failed_count(&self) -> usize {
        usize::from(self.failure.is_some())
    }

    /// Whether the batch reached `Completed`
    pub fn is_success(&self) -> bool {
        self.status == BatchStatus::Completed
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self.status {
            BatchStatus::Completed => 0,
            BatchStatus::Aborted => 1,
        }
    }
}
