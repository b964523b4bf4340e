//! Compiler detection
//!
//! Looks the configured compiler up on the search path and asks it for its
//! version. Purely informational: the batch runs either way, and a missing
//! compiler surfaces as a spawn failure on the first existing module.

use crate::infra::{CommandExecutor, RealCommandExecutor};
use console::style;
use std::path::PathBuf;
use thiserror::Error;

use crate::fmt::{CHECKMARK, WARNING};

/// Errors that can occur while probing the compiler
#[derive(Error, Debug)]
pub enum ToolError {
    /// I/O error during tool execution
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Version query exited unsuccessfully
    #[error("Failed to get version for {0}")]
    VersionFailed(String),
}

/// The external compiler, as configured
///
/// # Examples
///
/// ```no_run
/// use ir_compare::tools::CompilerTool;
///
/// let vyper = CompilerTool::new("vyper");
/// if vyper.is_installed() {
///     println!("{}", vyper.version()?);
/// }
/// # Ok::<(), ir_compare::tools::ToolError>(())
/// ```
#[derive(Debug)]
pub struct CompilerTool<CE: CommandExecutor = RealCommandExecutor> {
    program: String,
    version_flag: &'static str,
    cmd_executor: CE,
}

impl CompilerTool<RealCommandExecutor> {
    /// Probe `program` with real command execution
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_executor(program, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> CompilerTool<CE> {
    /// Probe `program` with a custom command executor
    pub fn with_executor(program: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            program: program.into(),
            version_flag: "--version",
            cmd_executor,
        }
    }

    /// Resolved location on the search path
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }

    /// Whether the compiler can be found
    pub fn is_installed(&self) -> bool {
        self.locate().is_some()
    }

    /// First line of `<program> --version`
    pub fn version(&self) -> Result<String, ToolError> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg(self.version_flag), &self.program)?;

        if !output.status.success() {
            return Err(ToolError::VersionFailed(self.program.clone()));
        }

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_string();

        Ok(version)
    }

    /// Check and report the compiler status
    pub fn check(&self) -> ToolStatus {
        match self.locate() {
            Some(path) => {
                log::debug!("{} resolved to {}", self.program, path.display());
                match self.version() {
                    Ok(version) if !version.is_empty() => ToolStatus::Available(version),
                    _ => ToolStatus::InstalledButVersionUnknown,
                }
            }
            None => ToolStatus::Missing,
        }
    }

    /// One console line describing `status`
    pub fn describe(&self, status: &ToolStatus) -> String {
        match status {
            ToolStatus::Available(version) => format!(
                "{} Using {} ({})",
                CHECKMARK,
                style(&self.program).bold(),
                style(version).dim()
            ),
            ToolStatus::InstalledButVersionUnknown => format!(
                "{} Using {} (version unknown)",
                CHECKMARK,
                style(&self.program).bold()
            ),
            ToolStatus::Missing => format!(
                "{} {} not found on PATH; compilation will fail",
                WARNING,
                style(&self.program).yellow().bold()
            ),
        }
    }
}

/// Status of a compiler check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Compiler is available and reported its version
    Available(String),
    /// Compiler binary exists but the version query failed
    InstalledButVersionUnknown,
    /// Compiler binary not found
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::mock_exit_status;
    use std::io;
    use std::process::{Command, Output};

    struct MockCommandExecutor {
        exit_code: i32,
        stdout: &'static str,
    }

    impl CommandExecutor for MockCommandExecutor {
        fn output(&self, _cmd: &mut Command) -> io::Result<Output> {
            Ok(Output {
                status: mock_exit_status(self.exit_code),
                stdout: self.stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            })
        }
    }

    struct FailingExecutor;

    impl CommandExecutor for FailingExecutor {
        fn output(&self, _cmd: &mut Command) -> io::Result<Output> {
            Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
        }
    }

    #[test]
    fn test_version_returns_first_line() {
        let tool = CompilerTool::with_executor(
            "vyper",
            MockCommandExecutor {
                exit_code: 0,
                stdout: "0.4.1+commit.abc\nextra\n",
            },
        );

        assert_eq!(tool.version().unwrap(), "0.4.1+commit.abc");
    }

    #[test]
    fn test_version_with_failed_status_errors() {
        let tool = CompilerTool::with_executor(
            "vyper",
            MockCommandExecutor {
                exit_code: 2,
                stdout: "",
            },
        );

        assert!(matches!(tool.version(), Err(ToolError::VersionFailed(p)) if p == "vyper"));
    }

    #[test]
    fn test_version_spawn_error_is_io() {
        let tool = CompilerTool::with_executor("vyper", FailingExecutor);
        assert!(matches!(tool.version(), Err(ToolError::Io(_))));
    }

    #[test]
    fn test_nonexistent_compiler_is_missing() {
        let tool = CompilerTool::new("ir-compare-no-such-compiler-xyz");

        assert!(!tool.is_installed());
        assert_eq!(tool.check(), ToolStatus::Missing);
        assert!(tool.describe(&ToolStatus::Missing).contains("not found"));
    }

    #[test]
    fn test_describe_available_includes_version() {
        let tool = CompilerTool::new("vyper");
        let line = tool.describe(&ToolStatus::Available("0.4.1".to_string()));

        assert!(line.contains("vyper"));
        assert!(line.contains("0.4.1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_sh_is_located() {
        let tool = CompilerTool::new("sh");
        assert!(tool.is_installed());
        assert!(tool.locate().unwrap().is_absolute());
    }
}
