//! Batch orchestration
//!
//! Walks the module list in order: skip what is missing, compile the rest
//! twice, persist both captures, compare. The first failed compiler run
//! stops the batch; modules after it are never touched.

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};

use super::artifacts::{module_stem, ArtifactStore};
use super::comparison::{ArtifactFailure, BatchStatus, BatchSummary, ComparisonReport};
use super::config::{CompareConfig, OptimizationMode};
use super::error::InvocationError;
use super::invoker::{CompilationResult, CompilerInvoker};
use super::metrics::LineMetrics;
use super::report::ReportRenderer;
use super::telemetry::{BatchEvent, BatchObserver, NoOpObserver};

/// Captured output of both compiler runs for one module
struct CapturedPair {
    unoptimized: CompilationResult,
    optimized: CompilationResult,
}

/// Drives a comparison batch over a list of modules
pub struct BatchDriver<FS: FileSystem, CE: CommandExecutor> {
    config: CompareConfig,
    fs: FS,
    invoker: CompilerInvoker<CE>,
    store: ArtifactStore<FS>,
    observer: Box<dyn BatchObserver>,
}

impl BatchDriver<RealFileSystem, RealCommandExecutor> {
    /// Driver backed by the real filesystem and process spawning
    pub fn new(config: CompareConfig) -> Self {
        Self::with_executors(config, RealFileSystem, RealCommandExecutor)
    }
}

impl<FS: FileSystem + Clone, CE: CommandExecutor> BatchDriver<FS, CE> {
    /// Driver with injected filesystem and command executor
    pub fn with_executors(config: CompareConfig, fs: FS, cmd_executor: CE) -> Self {
        let invoker = CompilerInvoker::new(&config, cmd_executor);
        let store = ArtifactStore::new(
            config.output_dir.clone(),
            config.extension.clone(),
            fs.clone(),
        );
        Self {
            config,
            fs,
            invoker,
            store,
            observer: Box::new(NoOpObserver),
        }
    }

    /// Replace the batch observer
    pub fn with_observer(mut self, observer: Box<dyn BatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run the batch, printing the human-readable report to stdout
    pub fn run<P: AsRef<Path>>(&self, modules: &[P]) -> BatchSummary {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(modules, &mut out)
    }

    /// Run the batch, writing the human-readable report to `out`
    ///
    /// Never returns an error: skips and artifact write failures are
    /// recorded in the summary, and an invocation failure ends the batch
    /// with [`BatchStatus::Aborted`].
    pub fn run_with_output<P: AsRef<Path>>(
        &self,
        modules: &[P],
        out: &mut dyn Write,
    ) -> BatchSummary {
        let mut summary = BatchSummary {
            reports: Vec::with_capacity(modules.len()),
            skipped_modules: Vec::new(),
            artifact_failures: Vec::new(),
            failure: None,
            status: BatchStatus::Completed,
        };
        let mut stems = HashSet::new();

        for module in modules {
            let module = module.as_ref();

            if !self.fs.exists(module) {
                log::warn!("{} not found, skipping", module.display());
                emit(out, &ReportRenderer::render_skip(module));
                self.observer.record(&BatchEvent::ModuleSkipped {
                    module: module.to_path_buf(),
                });
                summary.skipped_modules.push(module.to_path_buf());
                continue;
            }

            self.observer.record(&BatchEvent::ModuleStarted {
                module: module.to_path_buf(),
            });
            emit(out, &ReportRenderer::render_module_header(module));

            let stem = module_stem(module);
            if !stems.insert(stem.clone()) {
                log::warn!(
                    "{} shares the stem '{}' with an earlier module, overwriting its artifacts",
                    module.display(),
                    stem
                );
            }

            let pair = match self.compile_pair(module, out) {
                Ok(pair) => pair,
                Err(error) => {
                    log::error!("aborting batch: {}", error);
                    self.observer.record(&BatchEvent::BatchAborted {
                        module: module.to_path_buf(),
                    });
                    summary.failure = Some(error);
                    summary.status = BatchStatus::Aborted;
                    break;
                }
            };

            let (unoptimized_artifact, unoptimized_saved) =
                self.persist(module, &stem, &pair.unoptimized, &mut summary, out);
            let (optimized_artifact, optimized_saved) =
                self.persist(module, &stem, &pair.optimized, &mut summary, out);
            let unsaved: Vec<PathBuf> = [
                (&unoptimized_artifact, unoptimized_saved),
                (&optimized_artifact, optimized_saved),
            ]
            .into_iter()
            .filter(|(_, saved)| !saved)
            .map(|(path, _)| path.clone())
            .collect();

            let unoptimized = pair.unoptimized.text();
            let optimized = pair.optimized.text();
            let metrics = LineMetrics::compare(&unoptimized, &optimized);
            let report = ComparisonReport::new(
                stem,
                module,
                metrics,
                unoptimized_artifact,
                optimized_artifact,
            );

            emit(
                out,
                &ReportRenderer::render_module(
                    &report,
                    &unoptimized,
                    &optimized,
                    &unsaved,
                    self.config.preview_limit,
                ),
            );
            self.observer.record(&BatchEvent::ModuleCompared {
                module: module.to_path_buf(),
                unoptimized_lines: metrics.unoptimized_lines,
                optimized_lines: metrics.optimized_lines,
            });
            summary.reports.push(report);
        }

        if summary.status == BatchStatus::Completed {
            self.observer.record(&BatchEvent::BatchCompleted {
                analyzed: summary.analyzed_count(),
                skipped: summary.skipped_count(),
            });
        }
        self.observer.flush();

        emit(
            out,
            &ReportRenderer::render_batch(&summary, &self.config.output_dir),
        );
        summary
    }

    /// Unoptimized run first, optimized second; the first error wins
    fn compile_pair(
        &self,
        module: &Path,
        out: &mut dyn Write,
    ) -> Result<CapturedPair, InvocationError> {
        let unoptimized = self.compile(module, OptimizationMode::Unoptimized, out)?;
        let optimized = self.compile(module, OptimizationMode::Optimized, out)?;
        Ok(CapturedPair {
            unoptimized,
            optimized,
        })
    }

    fn compile(
        &self,
        module: &Path,
        mode: OptimizationMode,
        out: &mut dyn Write,
    ) -> Result<CompilationResult, InvocationError> {
        emit(out, &ReportRenderer::render_step(mode));
        let request = self.config.request(module, mode);
        let result = self.invoker.invoke(&request)?;
        self.observer.record(&BatchEvent::InvocationFinished {
            module: module.to_path_buf(),
            mode,
            duration: result.duration(),
        });
        Ok(result)
    }

    /// Save one capture, returning its path and whether it was written
    ///
    /// A failure is recorded and the intended path returned.
    fn persist(
        &self,
        module: &Path,
        stem: &str,
        result: &CompilationResult,
        summary: &mut BatchSummary,
        out: &mut dyn Write,
    ) -> (PathBuf, bool) {
        let mode = result.request().mode();
        match self.store.save(stem, mode, result.stdout()) {
            Ok(path) => {
                log::debug!("{} IR of {} saved to {}", mode, module.display(), path.display());
                (path, true)
            }
            Err(error) => {
                log::warn!("{}", error);
                emit(
                    out,
                    &ReportRenderer::render_artifact_warning(&error.to_string()),
                );
                let path = error.path().to_path_buf();
                let intended = self.store.path_for(stem, mode);
                self.observer.record(&BatchEvent::ArtifactWriteFailed {
                    module: module.to_path_buf(),
                    path,
                });
                summary.artifact_failures.push(ArtifactFailure {
                    module: module.to_path_buf(),
                    error,
                });
                (intended, false)
            }
        }
    }
}

/// Write a rendered block; a broken console never fails the batch
fn emit(out: &mut dyn Write, text: &str) {
    if let Err(e) = writeln!(out, "{}", text) {
        log::debug!("console write failed: {}", e);
    }
}
