#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! ir-compare library
//!
//! Runs a compiler twice per module, once with optimizations disabled and
//! once enabled, captures the emitted IR text, persists both captures and
//! reports the line-count reduction. It can be used programmatically in
//! addition to the CLI interface.
//!
//! # Basic Example
//!
//! Measuring the reduction between two captured IR texts:
//!
//! ```
//! use ir_compare::pipeline::LineMetrics;
//!
//! let unoptimized = "%1 = 2\n%2 = 3\n%3 = add %1, %2\nreturn %3\n";
//! let optimized = "return 5\n";
//!
//! let metrics = LineMetrics::compare(unoptimized, optimized);
//! assert_eq!(metrics.unoptimized_lines, 4);
//! assert_eq!(metrics.optimized_lines, 1);
//! assert_eq!(metrics.reduction_percent(), 75.0);
//! ```
//!
//! # Advanced Example: Configuration
//!
//! Resolving a config file into the engine configuration:
//!
//! ```
//! use ir_compare::config::ConfigFile;
//! use ir_compare::pipeline::OptimizationMode;
//!
//! let file = ConfigFile {
//!     compiler: "vyper".to_string(),
//!     timeout_secs: Some(60),
//!     ..ConfigFile::starter()
//! };
//! assert!(file.validate().is_ok());
//!
//! let config = file.to_compare_config();
//! let request = config.request(&file.modules[0], OptimizationMode::Unoptimized);
//! assert_eq!(request.flags().as_slice(), ["--no-optimize"]);
//! ```
//!
//! # Advanced Example: Running a Batch
//!
//! ```no_run
//! use ir_compare::pipeline::{BatchDriver, CompareConfig, MemoryObserver};
//!
//! let observer = MemoryObserver::new();
//! let driver = BatchDriver::new(CompareConfig::default())
//!     .with_observer(Box::new(observer.clone()));
//!
//! let summary = driver.run(&["src/sccp_demo.vy", "src/branch_demo.vy"]);
//! for report in &summary.reports {
//!     println!("{}: {:.1}%", report.module_name(), report.reduction_percent());
//! }
//! std::process::exit(summary.exit_code());
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file support
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// JSON output for scripted consumers
pub mod output;
/// IR comparison pipeline
pub mod pipeline;
/// Compiler detection and version checking
pub mod tools;
