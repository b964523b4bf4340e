//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::IrCompareError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .ir-compare.toml in the given directory
    ///
    /// A missing file yields the defaults.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ir_compare::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Comparing {} modules with {}", config.modules.len(), config.compiler);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", config_path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(IrCompareError::Io {
                    context: config_path.display().to_string(),
                    source: e,
                })
                .context("Failed to read .ir-compare.toml");
            }
        };

        Self::parse(&config_path, &contents)
    }

    /// Load an explicitly named config file, which must exist
    pub fn load_file_with_fs<FS: FileSystem>(config_path: &Path, fs: &FS) -> Result<ConfigFile> {
        let contents =
            fs.read_to_string(config_path)
                .map_err(|source| match source.kind() {
                    std::io::ErrorKind::NotFound => IrCompareError::ConfigNotFound {
                        path: config_path.to_path_buf(),
                        source,
                    },
                    _ => IrCompareError::Io {
                        context: config_path.display().to_string(),
                        source,
                    },
                })?;

        Self::parse(config_path, &contents)
    }

    fn parse(config_path: &Path, contents: &str) -> Result<ConfigFile> {
        let config: ConfigFile = toml_edit::de::from_str(contents)
            .map_err(|e| IrCompareError::InvalidConfig {
                path: config_path.to_path_buf(),
                reason: e.to_string().trim_end().to_string(),
            })
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .validate()
            .map_err(|e| IrCompareError::InvalidConfig {
                path: config_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Save config to .ir-compare.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ir_compare::config::{ConfigFile, ConfigLoader};
    /// use std::path::Path;
    ///
    /// let mut config = ConfigFile::default();
    /// config.compiler = "/opt/vyper/bin/vyper".to_string();
    /// ConfigLoader::save(&config, Path::new("."))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .map_err(|source| IrCompareError::Io {
                context: config_path.display().to_string(),
                source,
            })
            .context("Failed to write .ir-compare.toml")?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> bool {
        fs.exists(&project_root.join(CONFIG_FILE_NAME))
    }
}
