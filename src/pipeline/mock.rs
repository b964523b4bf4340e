//! Test doubles shared by the pipeline unit tests

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;
use std::time::Duration;

use crate::infra::{mock_exit_status, CommandExecutor, FileSystem};

/// In-memory filesystem with switchable write failures
#[derive(Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
    existing: Arc<Mutex<HashSet<PathBuf>>>,
    fail_writes: Arc<Mutex<HashSet<PathBuf>>>,
    fail_create_dir: Arc<Mutex<bool>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark module paths as present on disk
    pub fn with_modules<I, P>(self, modules: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.existing
            .lock()
            .extend(modules.into_iter().map(Into::into));
        self
    }

    pub fn fail_write_to(&self, path: impl Into<PathBuf>) {
        self.fail_writes.lock().insert(path.into());
    }

    pub fn fail_create_dir(&self) {
        *self.fail_create_dir.lock() = true;
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    pub fn dir_created(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.lock().contains(path.as_ref())
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.existing.lock().contains(path)
            || self.files.lock().contains_key(path)
            || self.dirs.lock().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if *self.fail_create_dir.lock() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            ));
        }
        self.dirs.lock().insert(path.to_path_buf());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        if self.fail_writes.lock().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.files
            .lock()
            .insert(path.to_path_buf(), contents.as_ref().to_vec());
        Ok(())
    }
}

type Responder = dyn Fn(&[String]) -> io::Result<Output> + Send + Sync;

/// Compiler stand-in answering each invocation through a closure
#[derive(Clone)]
pub struct MockCompiler {
    responder: Arc<Responder>,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    timeouts: Arc<Mutex<Vec<Option<Duration>>>>,
}

impl MockCompiler {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[String]) -> io::Result<Output> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            calls: Arc::new(Mutex::new(Vec::new())),
            timeouts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Program name and arguments of every invocation, in order
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().clone()
    }

    pub fn timeouts(&self) -> Vec<Option<Duration>> {
        self.timeouts.lock().clone()
    }
}

/// Successful output with the given stdout
pub fn success(stdout: impl Into<Vec<u8>>) -> io::Result<Output> {
    Ok(Output {
        status: mock_exit_status(0),
        stdout: stdout.into(),
        stderr: Vec::new(),
    })
}

/// Failed output with the given exit code and stderr
pub fn failure(code: i32, stderr: &str) -> io::Result<Output> {
    Ok(Output {
        status: mock_exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    })
}

/// `n` numbered IR lines, newline terminated
pub fn ir_lines(n: usize) -> String {
    (0..n).map(|i| format!("%{} = add 1, {}\n", i, i)).collect()
}

impl CommandExecutor for MockCompiler {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        let program = cmd.get_program().to_string_lossy().into_owned();
        let args: Vec<String> = cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.calls.lock().push((program, args.clone()));
        (self.responder)(&args)
    }

    fn output_with_timeout(
        &self,
        cmd: &mut Command,
        timeout: Option<Duration>,
    ) -> io::Result<Output> {
        self.timeouts.lock().push(timeout);
        self.output(cmd)
    }
}
