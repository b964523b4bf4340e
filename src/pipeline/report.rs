//! Comparison report formatting
//!
//! Everything here returns strings; the batch driver decides where they go.

use console::style;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::comparison::{BatchStatus, BatchSummary, ComparisonReport};
use super::config::OptimizationMode;
use crate::fmt::{
    format_line_delta, format_percent, CHART, CHECKMARK, CROSSMARK, ELLIPSIS, MICROSCOPE, WARNING,
};

const RULE_WIDTH: usize = 60;

/// Reviewer guidance printed after every batch
pub const OPTIMIZATION_CATEGORIES: [&str; 5] = [
    "Constant folding (literal values computed at compile time)",
    "Dead code elimination (unreachable blocks removed)",
    "Strength reduction (mul/div by powers of 2 → shifts)",
    "Comparison optimizations (iszero chains)",
    "SCCP results (complex constant propagation)",
];

/// First `limit` characters of `text`, with [`ELLIPSIS`] appended when cut
///
/// # Examples
///
/// ```
/// use ir_compare::pipeline::preview;
///
/// assert_eq!(preview("abcdef", 3), "abc...");
/// assert_eq!(preview("abc", 3), "abc");
/// ```
pub fn preview(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], ELLIPSIS)),
        None => Cow::Borrowed(text),
    }
}

/// Formats per-module and batch summaries
pub struct ReportRenderer;

impl ReportRenderer {
    /// Banner printed before a module is compiled
    pub fn render_module_header(module: &Path) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let name = module
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| module.display().to_string());
        format!(
            "\n{}\n{} Analyzing: {}\n{}\n",
            rule,
            MICROSCOPE,
            style(name).bold(),
            rule
        )
    }

    /// Progress line for one of the two compiler runs
    pub fn render_step(mode: OptimizationMode) -> String {
        let step = match mode {
            OptimizationMode::Unoptimized => 1,
            OptimizationMode::Optimized => 2,
        };
        format!(
            "{}. Generating {} IR...",
            step,
            mode.as_str().to_uppercase()
        )
    }

    /// Warning for a module missing from disk
    pub fn render_skip(module: &Path) -> String {
        format!(
            "{} {} {} not found, skipping...",
            WARNING,
            style("Warning:").yellow().bold(),
            module.display()
        )
    }

    /// Warning for an artifact that could not be written
    pub fn render_artifact_warning(message: &str) -> String {
        format!(
            "   {} {} {}",
            WARNING,
            style("Warning:").yellow().bold(),
            message
        )
    }

    /// Previews, artifact locations and line statistics for one module
    pub fn render_module(
        report: &ComparisonReport,
        unoptimized: &str,
        optimized: &str,
        unsaved: &[PathBuf],
        preview_limit: usize,
    ) -> String {
        let mut out = String::new();

        out.push_str("\n--- UNOPTIMIZED IR ---\n");
        out.push_str(&preview(unoptimized, preview_limit));
        out.push_str("\n\n--- OPTIMIZED IR ---\n");
        out.push_str(&preview(optimized, preview_limit));
        out.push('\n');

        out.push_str("\nFull output saved to:\n");
        for path in [report.unoptimized_artifact(), report.optimized_artifact()] {
            if unsaved.iter().any(|p| p == path) {
                out.push_str(&format!(
                    "   {} {}\n",
                    style(path.display()).dim(),
                    style("(not saved)").yellow()
                ));
            } else {
                out.push_str(&format!("   {}\n", style(path.display()).cyan()));
            }
        }

        out.push_str(&format!("\n{} Optimization Statistics:\n", CHART));
        out.push_str(&format!(
            "  Unoptimized: {} lines\n",
            report.unoptimized_lines()
        ));
        out.push_str(&format!("  Optimized:   {} lines\n", report.optimized_lines()));

        let reduction = format_percent(report.reduction_percent());
        let reduction = if report.line_delta() > 0 {
            style(reduction).green().bold().to_string()
        } else {
            style(reduction).yellow().to_string()
        };
        out.push_str(&format!(
            "  Reduction:   {} ({})\n",
            reduction,
            format_line_delta(report.line_delta())
        ));

        out
    }

    /// Counts of analyzed, skipped and failed modules plus reviewer guidance
    pub fn render_batch(summary: &BatchSummary, output_dir: &Path) -> String {
        let mut out = String::new();

        let counts = format!(
            "{} analyzed, {} skipped, {} failed",
            summary.analyzed_count(),
            summary.skipped_count(),
            summary.failed_count()
        );

        match summary.status {
            BatchStatus::Completed => out.push_str(&format!(
                "\n{} {} {}\n",
                CHECKMARK,
                style("Analysis complete:").green().bold(),
                counts
            )),
            BatchStatus::Aborted => out.push_str(&format!(
                "\n{} {} {}\n",
                CROSSMARK,
                style("Analysis aborted:").red().bold(),
                counts
            )),
        }

        if summary.analyzed_count() > 0 {
            out.push_str(&format!(
                "   Check {}/ for full IR code.\n",
                output_dir.display()
            ));
        }

        for module in &summary.skipped_modules {
            out.push_str(&format!("   skipped: {}\n", module.display()));
        }
        for failure in &summary.artifact_failures {
            out.push_str(&format!("   not saved: {}\n", failure.error.path().display()));
        }
        if let Some(failure) = &summary.failure {
            out.push_str(&format!("   failed: {}\n", failure.module().display()));
        }

        out.push_str("\nKey things to look for:\n");
        for category in OPTIMIZATION_CATEGORIES {
            out.push_str(&format!("  - {}\n", category));
        }

        out
    }
}
