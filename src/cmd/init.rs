//! Init command implementation
//!
//! Handles the `ir-compare init` command which writes a starter
//! `.ir-compare.toml` listing the demo modules

use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::error::IrCompareError;
use crate::fmt::{CHECKMARK, SPARKLES};
use crate::infra::{FileSystem, RealFileSystem};

/// Write a starter configuration in the current directory
///
/// # Examples
///
/// ```no_run
/// use ir_compare::cmd::init::cmd_init;
///
/// cmd_init(false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`IrCompareError::ConfigExists`] if the file is already present
/// and `force` is not set.
pub fn cmd_init(force: bool) -> Result<()> {
    let project_root = std::env::current_dir().map_err(|source| IrCompareError::Io {
        context: "the current directory".to_string(),
        source,
    })?;

    let config = ConfigFile::starter();
    let path = init_with_fs(&project_root, &config, force, &RealFileSystem)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(path.display()).cyan().bold()
    );
    println!();
    println!("{} Modules:", SPARKLES);
    for module in &config.modules {
        println!("   {} {}", style("•").dim(), module.display());
    }
    println!();
    println!(
        "   Edit {} to change the compiler, flags or module list,",
        CONFIG_FILE_NAME
    );
    println!(
        "   then run {} to compare optimized and unoptimized IR.",
        style("ir-compare compare").cyan()
    );

    Ok(())
}

/// Save `config` under `project_root`, refusing to clobber unless `force`
pub fn init_with_fs<FS: FileSystem>(
    project_root: &Path,
    config: &ConfigFile,
    force: bool,
    fs: &FS,
) -> Result<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);

    if ConfigLoader::exists_with_fs(project_root, fs) {
        if !force {
            return Err(IrCompareError::ConfigExists { path }.into());
        }
        log::warn!("overwriting {}", path.display());
    }

    ConfigLoader::save_with_fs(config, project_root, fs)?;
    Ok(path)
}
