//! Test fixture helpers
//!
//! The fake compiler is a POSIX shell script that behaves like a compiler
//! emitting IR to stdout:
//! - 50 lines with `--no-optimize`, 30 lines without
//! - exits 3 with a diagnostic when the module name contains `broken`
//! - sleeps when the module name contains `slow`
//! - answers `--version` without logging the call
//! - appends every other argument vector to `calls.log` next to the script

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Unoptimized line count emitted by the fake compiler
pub const UNOPTIMIZED_LINES: usize = 50;

/// Optimized line count emitted by the fake compiler
pub const OPTIMIZED_LINES: usize = 30;

const FAKE_COMPILER: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "0.4.0+fake"
    exit 0
fi

here=$(dirname "$0")
echo "$*" >> "$here/calls.log"

unopt=0
module=""
for arg in "$@"; do
    if [ "$arg" = "--no-optimize" ]; then
        unopt=1
    fi
    module="$arg"
done

case "$module" in
    *broken*)
        echo "$module:3: invalid syntax" >&2
        exit 3
        ;;
    *slow*)
        exec sleep 30
        ;;
esac

if [ "$unopt" = "1" ]; then n=50; else n=30; fi
i=0
while [ "$i" -lt "$n" ]; do
    echo "%$i = add $i, 1"
    i=$((i + 1))
done
"#;

/// Workspace holding a fake compiler and some modules
pub struct Workspace {
    /// Keeps the directory alive
    pub dir: TempDir,
    /// Absolute path of the fake compiler
    pub compiler: PathBuf,
}

impl Workspace {
    /// Create a workspace with the fake compiler installed under `bin/`
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let compiler = write_fake_compiler(&dir.path().join("bin"))?;
        Ok(Self { dir, compiler })
    }

    /// Workspace root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty module file at `relative`
    pub fn add_module(&self, relative: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, "# @version ^0.4.0\n")?;
        Ok(path)
    }

    /// Argument vectors the fake compiler received, one per run
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.compiler.with_file_name("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Contents of an artifact, relative to the workspace
    pub fn artifact(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.path().join(relative)).ok()
    }
}

/// Write the fake compiler into `dir` and make it executable
#[cfg(unix)]
pub fn write_fake_compiler(dir: &Path) -> anyhow::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(dir)?;
    let path = dir.join("fake-compiler");
    fs::write(&path, FAKE_COMPILER)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

/// `n` IR lines in the fake compiler's format
pub fn ir_lines(n: usize) -> String {
    (0..n).map(|i| format!("%{} = add {}, 1\n", i, i)).collect()
}
