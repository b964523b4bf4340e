//! Persistence of captured IR text
//!
//! Artifact locations depend only on the output directory, the module stem
//! and the mode, so repeated runs overwrite the same files.

use crate::infra::FileSystem;
use std::path::{Path, PathBuf};

use super::config::OptimizationMode;
use super::error::ArtifactError;

/// File stem used to name a module's artifacts
///
/// # Examples
///
/// ```
/// use ir_compare::pipeline::module_stem;
/// use std::path::Path;
///
/// assert_eq!(module_stem(Path::new("src/sccp_demo.vy")), "sccp_demo");
/// ```
pub fn module_stem(module: &Path) -> String {
    module
        .file_stem()
        .or_else(|| module.file_name())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_string())
}

/// `<output_dir>/<stem>_<mode>.<extension>`
pub fn artifact_path(
    output_dir: &Path,
    stem: &str,
    mode: OptimizationMode,
    extension: &str,
) -> PathBuf {
    output_dir.join(format!("{}_{}.{}", stem, mode.as_str(), extension))
}

/// Writes captured compiler output below a single directory
pub struct ArtifactStore<FS: FileSystem> {
    output_dir: PathBuf,
    extension: String,
    fs: FS,
}

impl<FS: FileSystem> ArtifactStore<FS> {
    /// Create a store rooted at `output_dir`
    ///
    /// The directory is created on first save, not here.
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>, fs: FS) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
            fs,
        }
    }

    /// Location of the artifact for `stem` under `mode`
    pub fn path_for(&self, stem: &str, mode: OptimizationMode) -> PathBuf {
        artifact_path(&self.output_dir, stem, mode, &self.extension)
    }

    /// Persist `contents` verbatim, replacing any earlier artifact
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::CreateDir`] if the output directory cannot be
    /// created (e.g. the path is an existing file) and [`ArtifactError::Write`]
    /// if the file itself cannot be written.
    pub fn save(
        &self,
        stem: &str,
        mode: OptimizationMode,
        contents: &[u8],
    ) -> Result<PathBuf, ArtifactError> {
        // create_dir_all tolerates a directory that already exists, including
        // one created concurrently by another writer.
        self.fs
            .create_dir_all(&self.output_dir)
            .map_err(|source| ArtifactError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;

        let path = self.path_for(stem, mode);
        self.fs
            .write(&path, contents)
            .map_err(|source| ArtifactError::Write {
                path: path.clone(),
                source,
            })?;

        log::debug!("wrote {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RealFileSystem;
    use crate::pipeline::mock::MockFileSystem;
    use tempfile::TempDir;

    #[test]
    fn test_module_stem_strips_directory_and_extension() {
        assert_eq!(module_stem(Path::new("track2-advanced/src/branch_demo.vy")), "branch_demo");
        assert_eq!(module_stem(Path::new("noext")), "noext");
        assert_eq!(module_stem(Path::new("archive.tar.gz")), "archive.tar");
    }

    #[test]
    fn test_artifact_path_is_pure_function_of_inputs() {
        let a = artifact_path(
            Path::new("out"),
            "storage_demo",
            OptimizationMode::Optimized,
            "venom",
        );
        let b = artifact_path(
            Path::new("out"),
            "storage_demo",
            OptimizationMode::Optimized,
            "venom",
        );

        assert_eq!(a, b);
        assert_eq!(a, PathBuf::from("out/storage_demo_optimized.venom"));
    }

    #[test]
    fn test_modes_never_share_a_path() {
        let store = ArtifactStore::new("out", "venom", MockFileSystem::new());
        assert_ne!(
            store.path_for("a", OptimizationMode::Unoptimized),
            store.path_for("a", OptimizationMode::Optimized)
        );
        assert_ne!(
            store.path_for("a", OptimizationMode::Optimized),
            store.path_for("b", OptimizationMode::Optimized)
        );
    }

    #[test]
    fn test_save_creates_directory_and_writes_bytes() {
        let fs = MockFileSystem::new();
        let store = ArtifactStore::new("venom_output", "venom", fs.clone());

        let path = store
            .save("algebraic_demo", OptimizationMode::Unoptimized, b"%1 = 2\n")
            .unwrap();

        assert!(fs.dir_created("venom_output"));
        assert_eq!(path, PathBuf::from("venom_output/algebraic_demo_unoptimized.venom"));
        assert_eq!(fs.file(&path).unwrap(), b"%1 = 2\n");
    }

    #[test]
    fn test_save_create_dir_failure_is_reported() {
        let fs = MockFileSystem::new();
        fs.fail_create_dir();
        let store = ArtifactStore::new("venom_output", "venom", fs.clone());

        let err = store.save("a", OptimizationMode::Optimized, b"x").unwrap_err();

        assert!(matches!(err, ArtifactError::CreateDir { .. }));
        assert!(fs.written_paths().is_empty());
    }

    #[test]
    fn test_save_write_failure_is_reported() {
        let fs = MockFileSystem::new();
        fs.fail_write_to("out/a_optimized.venom");
        let store = ArtifactStore::new("out", "venom", fs);

        let err = store.save("a", OptimizationMode::Optimized, b"x").unwrap_err();

        assert!(matches!(err, ArtifactError::Write { .. }));
        assert_eq!(err.path(), Path::new("out/a_optimized.venom"));
    }

    #[test]
    fn test_real_save_overwrites_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested").join("venom_output");
        let store = ArtifactStore::new(&out, "venom", RealFileSystem);

        store
            .save("a", OptimizationMode::Optimized, b"first run with more lines\n\n\n")
            .unwrap();
        let path = store.save("a", OptimizationMode::Optimized, b"second\n").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second\n");
    }

    #[test]
    fn test_real_save_into_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("venom_output");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let store = ArtifactStore::new(&blocker, "venom", RealFileSystem);

        let err = store.save("a", OptimizationMode::Unoptimized, b"x").unwrap_err();
        assert!(matches!(err, ArtifactError::CreateDir { .. }));
    }

    #[test]
    fn test_real_save_preserves_non_utf8_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(temp_dir.path(), "venom", RealFileSystem);
        let bytes = b"ret\r\n\xfe\xff tail without newline";

        let path = store.save("raw", OptimizationMode::Unoptimized, bytes).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), bytes);
    }
}
