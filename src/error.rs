//! Top-level error types with contextual suggestions
//!
//! Every variant carries:
//! - an actionable message
//! - a suggested fix, where one exists
//! - a sysexits-style exit code
//!
//! # Examples
//!
//! ```no_run
//! use ir_compare::error::{ErrorFormatter, IrCompareError};
//! use ir_compare::pipeline::{BatchDriver, CompareConfig};
//!
//! let driver = BatchDriver::new(CompareConfig::default());
//! let summary = driver.run(&["contracts/token.vy"]);
//!
//! if let Some(failure) = summary.failure {
//!     let error = anyhow::Error::from(IrCompareError::from(failure));
//!     eprint!("{}", ErrorFormatter::format(&error));
//!     std::process::exit(ErrorFormatter::exit_code(&error));
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::config::CONFIG_FILE_NAME;
use crate::pipeline::{InvocationError, InvocationErrorKind};

/// ir-compare errors with contextual suggestions
#[derive(Error, Debug)]
pub enum IrCompareError {
    /// A compiler run failed and the batch stopped
    #[error("Comparison aborted at {}", .module.display())]
    BatchAborted {
        /// Module whose compilation failed
        module: PathBuf,
        #[source]
        /// The failed invocation
        source: InvocationError,
    },

    /// Explicitly requested configuration file is missing
    #[error("Configuration file not found: {}", .path.display())]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Configuration values are unusable
    #[error("Invalid configuration in {}: {reason}", .path.display())]
    InvalidConfig {
        /// Path to config file
        path: PathBuf,
        /// What is wrong
        reason: String,
    },

    /// `init` would overwrite an existing file
    #[error("Configuration file already exists: {}", .path.display())]
    ConfigExists {
        /// Path to config file
        path: PathBuf,
    },

    /// Nothing to compare
    #[error("No modules to compare")]
    NoModules,

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl From<InvocationError> for IrCompareError {
    fn from(source: InvocationError) -> Self {
        Self::BatchAborted {
            module: source.module().to_path_buf(),
            source,
        }
    }
}

impl IrCompareError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ir_compare::error::IrCompareError;
    ///
    /// let suggestion = IrCompareError::NoModules.suggestion().unwrap();
    /// assert!(suggestion.contains("modules"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::BatchAborted { source, .. } => match source {
                InvocationError::SpawnFailure { program, .. } => Some(format!(
                    "Install '{}' or point --compiler at the right executable",
                    program
                )),
                InvocationError::CompilerFailure { .. } => Some(
                    "Fix the compiler errors shown above, or remove the module from the list"
                        .to_string(),
                ),
                InvocationError::Timeout { .. } => Some(
                    "Raise --timeout (or timeout-secs in the config file) for large modules"
                        .to_string(),
                ),
            },
            Self::ConfigNotFound { .. } => Some(format!(
                "Run 'ir-compare init' to create a {}",
                CONFIG_FILE_NAME
            )),
            Self::InvalidConfig { .. } => Some(format!(
                "Fix the value in {} or delete the key to use its default",
                CONFIG_FILE_NAME
            )),
            Self::ConfigExists { .. } => {
                Some("Pass --force to overwrite the existing file".to_string())
            }
            Self::NoModules => Some(format!(
                "Pass module paths as arguments or list them under 'modules' in {}",
                CONFIG_FILE_NAME
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use ir_compare::error::IrCompareError;
    ///
    /// assert_eq!(IrCompareError::NoModules.exit_code(), 64);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BatchAborted { source, .. } => match source.kind() {
                InvocationErrorKind::SpawnFailure => 127, // Command not found
                InvocationErrorKind::CompilerFailure | InvocationErrorKind::Timeout => 1,
            },
            Self::ConfigNotFound { .. } => 66, // EX_NOINPUT
            Self::InvalidConfig { .. } => 65,  // EX_DATAERR
            Self::ConfigExists { .. } => 73,   // EX_CANTCREAT
            Self::NoModules => 64,             // EX_USAGE
            Self::Io { .. } => 74,             // EX_IOERR
        }
    }

    /// Returns the invocation error if this is a `BatchAborted` variant.
    pub fn as_invocation_error(&self) -> Option<&InvocationError> {
        match self {
            Self::BatchAborted { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain, compiler diagnostics and a suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(ic_error) = error.downcast_ref::<IrCompareError>() {
            if let Some(stderr) = ic_error
                .as_invocation_error()
                .and_then(InvocationError::stderr)
            {
                output.push_str(&format!("\n{}\n", style("stderr:").dim()));
                for line in stderr.trim_end().lines() {
                    output.push_str(&format!("  {}\n", line));
                }
            }

            if let Some(suggestion) = ic_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(ic_error) = error.downcast_ref::<IrCompareError>() {
            ic_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
