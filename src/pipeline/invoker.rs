//! Compiler invocation for the comparison pipeline
//!
//! Runs the external compiler once per request and captures what it emits.

use crate::infra::CommandExecutor;
use std::borrow::Cow;
use std::ffi::OsString;
use std::io;
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

use super::config::{CompareConfig, CompilationRequest};
use super::error::InvocationError;

/// Output of one successful compiler run
#[derive(Debug, Clone)]
pub struct CompilationResult {
    request: CompilationRequest,
    exit_status: ExitStatus,
    stdout: Vec<u8>,
    stderr: String,
    duration: Duration,
}

impl CompilationResult {
    /// Request that produced this result
    pub fn request(&self) -> &CompilationRequest {
        &self.request
    }

    /// Exit status of the compiler
    pub fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    /// Standard output exactly as captured
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    /// Standard output as text (invalid UTF-8 replaced)
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Standard error captured alongside the IR
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Wall-clock time of the run
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Runs the configured compiler for individual requests
///
/// Holds no mutable state, so separate modules can be invoked independently.
pub struct CompilerInvoker<CE: CommandExecutor> {
    program: String,
    base_args: Vec<String>,
    timeout: Option<Duration>,
    cmd_executor: CE,
}

impl<CE: CommandExecutor> CompilerInvoker<CE> {
    /// Create an invoker from the comparison configuration
    pub fn new(config: &CompareConfig, cmd_executor: CE) -> Self {
        Self {
            program: config.compiler.clone(),
            base_args: config.base_args.clone(),
            timeout: config.timeout,
            cmd_executor,
        }
    }

    /// Argument vector for `request`: base args, then mode flags, then the module
    pub fn arguments(&self, request: &CompilationRequest) -> Vec<OsString> {
        self.base_args
            .iter()
            .chain(request.flags().as_slice())
            .map(OsString::from)
            .chain(std::iter::once(request.module_path().as_os_str().to_owned()))
            .collect()
    }

    /// Run the compiler for `request` and capture its output
    ///
    /// # Errors
    ///
    /// - [`InvocationError::SpawnFailure`] if the process cannot be started
    /// - [`InvocationError::Timeout`] if the configured deadline passes
    /// - [`InvocationError::CompilerFailure`] on a non-zero exit status
    pub fn invoke(
        &self,
        request: &CompilationRequest,
    ) -> Result<CompilationResult, InvocationError> {
        let args = self.arguments(request);
        log::debug!(
            "{} ({}): {} {:?}",
            request.module_path().display(),
            request.mode(),
            self.program,
            args
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(&args);

        let start = Instant::now();
        let output = self
            .cmd_executor
            .output_with_timeout(&mut cmd, self.timeout)
            .map_err(|source| match (source.kind(), self.timeout) {
                (io::ErrorKind::TimedOut, Some(timeout)) => InvocationError::Timeout {
                    program: self.program.clone(),
                    module: request.module_path().to_path_buf(),
                    mode: request.mode(),
                    timeout,
                },
                _ => InvocationError::SpawnFailure {
                    program: self.program.clone(),
                    module: request.module_path().to_path_buf(),
                    mode: request.mode(),
                    source,
                },
            })?;
        let duration = start.elapsed();

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(InvocationError::CompilerFailure {
                program: self.program.clone(),
                module: request.module_path().to_path_buf(),
                mode: request.mode(),
                status: output.status.code(),
                stderr,
            });
        }

        log::debug!(
            "{} ({}) finished in {:?}, {} bytes of IR",
            request.module_path().display(),
            request.mode(),
            duration,
            output.stdout.len()
        );

        Ok(CompilationResult {
            request: request.clone(),
            exit_status: output.status,
            stdout: output.stdout,
            stderr,
            duration,
        })
    }
}
