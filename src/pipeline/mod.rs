//! Optimized/unoptimized IR comparison pipeline
//!
//! For every module in a batch:
//! 1. compile with optimizations disabled and capture the IR
//! 2. compile with optimizations enabled and capture the IR
//! 3. persist both captures under the output directory
//! 4. count lines and report the reduction

pub mod artifacts;
pub mod batch;
pub mod comparison;
pub mod config;
pub mod error;
pub mod invoker;
pub mod metrics;
pub mod report;
pub mod telemetry;

#[cfg(test)]
mod mock;

pub use artifacts::{artifact_path, module_stem, ArtifactStore};
pub use batch::BatchDriver;
pub use comparison::{ArtifactFailure, BatchStatus, BatchSummary, ComparisonReport};
pub use config::{
    CompareConfig, CompilationRequest, FlagSet, OptimizationMode, DEFAULT_COMPILER,
    DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR, DEFAULT_PREVIEW_LIMIT,
};
pub use error::{ArtifactError, InvocationError, InvocationErrorKind};
pub use invoker::{CompilationResult, CompilerInvoker};
pub use metrics::{count_lines, LineMetrics};
pub use report::{preview, ReportRenderer, OPTIMIZATION_CATEGORIES};
pub use telemetry::{BatchEvent, BatchObserver, LogObserver, MemoryObserver, NoOpObserver};
