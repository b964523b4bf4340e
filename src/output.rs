//! JSON output for scripted consumers

use crate::pipeline::{ArtifactFailure, BatchSummary, ComparisonReport, InvocationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// JSON document describing one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Whether the batch completed
    pub success: bool,
    /// "completed" or "aborted"
    pub status: String,
    /// Number of modules compared
    pub analyzed: usize,
    /// Number of modules not found
    pub skipped: usize,
    /// Number of modules whose compilation failed
    pub failed: usize,
    /// Per-module results, in list order
    pub modules: Vec<ModuleInfo>,
    /// Modules not found on disk
    pub skipped_modules: Vec<PathBuf>,
    /// Artifacts that could not be written
    pub artifact_failures: Vec<ArtifactFailureInfo>,
    /// The failure that aborted the batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Comparison result for one module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Module stem
    pub name: String,
    /// Module path as configured
    pub path: PathBuf,
    /// Lines of unoptimized IR
    pub unoptimized_lines: usize,
    /// Lines of optimized IR
    pub optimized_lines: usize,
    /// Lines removed (negative = growth)
    pub line_delta: i64,
    /// Reduction percentage
    pub reduction_percent: f64,
    /// Unoptimized artifact location
    pub unoptimized_artifact: PathBuf,
    /// Optimized artifact location
    pub optimized_artifact: PathBuf,
}

impl ModuleInfo {
    /// Convert from ComparisonReport
    pub fn from_report(report: &ComparisonReport) -> Self {
        Self {
            name: report.module_name().to_string(),
            path: report.module_path().to_path_buf(),
            unoptimized_lines: report.unoptimized_lines(),
            optimized_lines: report.optimized_lines(),
            line_delta: report.line_delta(),
            reduction_percent: report.reduction_percent(),
            unoptimized_artifact: report.unoptimized_artifact().to_path_buf(),
            optimized_artifact: report.optimized_artifact().to_path_buf(),
        }
    }
}

/// An artifact that could not be written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFailureInfo {
    /// Module whose capture was lost
    pub module: PathBuf,
    /// Path that could not be written
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

impl ArtifactFailureInfo {
    /// Convert from ArtifactFailure
    pub fn from_failure(failure: &ArtifactFailure) -> Self {
        Self {
            module: failure.module.clone(),
            path: failure.error.path().to_path_buf(),
            message: failure.error.to_string(),
        }
    }
}

/// The invocation failure that aborted a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// "spawn_failure", "compiler_failure" or "timeout"
    pub kind: String,
    /// Module being compiled
    pub module: PathBuf,
    /// Mode of the failed run
    pub mode: String,
    /// Error message
    pub message: String,
    /// Compiler diagnostics, if any were captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl ErrorInfo {
    /// Convert from InvocationError
    pub fn from_error(error: &InvocationError) -> Self {
        Self {
            kind: error.kind().as_str().to_string(),
            module: error.module().to_path_buf(),
            mode: error.mode().as_str().to_string(),
            message: error.to_string(),
            stderr: error.stderr().map(str::to_string),
        }
    }
}

impl JsonOutput {
    /// Build the document for a finished batch
    pub fn from_summary(summary: &BatchSummary) -> Self {
        Self {
            success: summary.is_success(),
            status: summary.status.as_str().to_string(),
            analyzed: summary.analyzed_count(),
            skipped: summary.skipped_count(),
            failed: summary.failed_count(),
            modules: summary.reports.iter().map(ModuleInfo::from_report).collect(),
            skipped_modules: summary.skipped_modules.clone(),
            artifact_failures: summary
                .artifact_failures
                .iter()
                .map(ArtifactFailureInfo::from_failure)
                .collect(),
            error: summary.failure.as_ref().map(ErrorInfo::from_error),
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))
    }

    /// Print JSON to stdout
    pub fn print(&self) {
        match self.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error formatting JSON: {}", e),
        }
    }
}
