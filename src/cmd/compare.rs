//! Compare command implementation
//!
//! Handles the `ir-compare compare` command which compiles every configured
//! module with and without optimization and reports the IR line reduction

use anyhow::Result;
use console::style;
use std::io;
use std::path::PathBuf;

use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::error::IrCompareError;
use crate::fmt::ROCKET;
use crate::infra::RealFileSystem;
use crate::output::JsonOutput;
use crate::pipeline::{BatchDriver, BatchSummary, LogObserver};
use crate::tools::CompilerTool;

/// Command-line overrides for a comparison run
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Modules given on the command line (replace the configured list)
    pub modules: Vec<PathBuf>,
    /// Compiler executable override
    pub compiler: Option<String>,
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// Timeout override, in seconds
    pub timeout_secs: Option<u64>,
    /// Preview length override
    pub preview_limit: Option<usize>,
    /// Explicit config file (must exist)
    pub config: Option<PathBuf>,
    /// Emit JSON instead of the human report
    pub json: bool,
}

impl CompareOptions {
    /// Apply the overrides on top of a loaded config file
    pub fn apply(&self, mut file: ConfigFile) -> ConfigFile {
        if !self.modules.is_empty() {
            file.modules = self.modules.clone();
        }
        if let Some(compiler) = &self.compiler {
            file.compiler = compiler.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            file.output_dir = output_dir.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            file.timeout_secs = Some(timeout);
        }
        if let Some(limit) = self.preview_limit {
            file.preview_limit = limit;
        }
        file
    }

    /// Load, override and validate the configuration for this run
    ///
    /// # Errors
    ///
    /// - [`IrCompareError::ConfigNotFound`] if `--config` names a missing file
    /// - [`IrCompareError::InvalidConfig`] if the merged values are unusable
    /// - [`IrCompareError::NoModules`] if there is nothing to compare
    pub fn resolve(&self) -> Result<ConfigFile> {
        let (loaded, origin) = match &self.config {
            Some(path) => (
                ConfigLoader::load_file_with_fs(path, &RealFileSystem)?,
                path.clone(),
            ),
            None => {
                let project_root = std::env::current_dir().map_err(|source| {
                    IrCompareError::Io {
                        context: "the current directory".to_string(),
                        source,
                    }
                })?;
                (
                    ConfigLoader::load(&project_root)?,
                    PathBuf::from(CONFIG_FILE_NAME),
                )
            }
        };

        self.merge(loaded, origin)
    }

    fn merge(&self, loaded: ConfigFile, origin: PathBuf) -> Result<ConfigFile> {
        let file = self.apply(loaded);

        file.validate()
            .map_err(|e| IrCompareError::InvalidConfig {
                path: origin,
                reason: e.to_string(),
            })?;

        if file.modules.is_empty() {
            return Err(IrCompareError::NoModules.into());
        }

        Ok(file)
    }
}

/// Compare optimized and unoptimized IR for every configured module
///
/// # Examples
///
/// ```no_run
/// use ir_compare::cmd::compare::{cmd_compare, CompareOptions};
/// use std::path::PathBuf;
///
/// cmd_compare(&CompareOptions {
///     modules: vec![PathBuf::from("contracts/token.vy")],
///     ..CompareOptions::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the configuration is unusable, or
/// [`IrCompareError::BatchAborted`] when a compiler run fails. Skipped
/// modules and unwritable artifacts are not errors.
pub fn cmd_compare(options: &CompareOptions) -> Result<()> {
    let file = options.resolve()?;
    let config = file.to_compare_config();

    if !options.json {
        println!(
            "{} {} {} module(s) with {}",
            ROCKET,
            style("Comparing").bold(),
            file.modules.len(),
            style(&config.compiler).cyan()
        );
        let tool = CompilerTool::new(config.compiler.as_str());
        println!("{}", tool.describe(&tool.check()));
    }

    let driver = BatchDriver::new(config).with_observer(Box::new(LogObserver));

    let summary = if options.json {
        let summary = driver.run_with_output(&file.modules, &mut io::sink());
        JsonOutput::from_summary(&summary).print();
        summary
    } else {
        driver.run(&file.modules)
    };

    into_result(summary)
}

/// Map a finished batch onto the command result
fn into_result(summary: BatchSummary) -> Result<()> {
    match summary.failure {
        Some(failure) => Err(IrCompareError::from(failure).into()),
        None => Ok(()),
    }
}
