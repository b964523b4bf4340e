//! Batch lifecycle events
//!
//! Observers receive one event per state transition of the batch driver.
//! Nothing is emitted after [`BatchEvent::BatchAborted`].

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::config::OptimizationMode;

/// Batch lifecycle events
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// A module exists and is about to be compiled
    ModuleStarted {
        /// Module path
        module: PathBuf,
    },
    /// A module was not found on disk
    ModuleSkipped {
        /// Module path
        module: PathBuf,
    },
    /// One compiler run finished successfully
    InvocationFinished {
        /// Module path
        module: PathBuf,
        /// Mode of the run
        mode: OptimizationMode,
        /// Wall-clock time of the run
        duration: Duration,
    },
    /// An artifact could not be written
    ArtifactWriteFailed {
        /// Module path
        module: PathBuf,
        /// Path that could not be written
        path: PathBuf,
    },
    /// A module was compared
    ModuleCompared {
        /// Module path
        module: PathBuf,
        /// Unoptimized line count
        unoptimized_lines: usize,
        /// Optimized line count
        optimized_lines: usize,
    },
    /// Every module was processed
    BatchCompleted {
        /// Modules compared
        analyzed: usize,
        /// Modules skipped
        skipped: usize,
    },
    /// A compiler run failed and the batch stopped
    BatchAborted {
        /// Module whose run failed
        module: PathBuf,
    },
}

impl BatchEvent {
    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ModuleStarted { .. } => "module_started",
            Self::ModuleSkipped { .. } => "module_skipped",
            Self::InvocationFinished { .. } => "invocation_finished",
            Self::ArtifactWriteFailed { .. } => "artifact_write_failed",
            Self::ModuleCompared { .. } => "module_compared",
            Self::BatchCompleted { .. } => "batch_completed",
            Self::BatchAborted { .. } => "batch_aborted",
        }
    }
}

/// Trait for pluggable batch observation
pub trait BatchObserver: Send + Sync {
    /// Observer name
    fn name(&self) -> &str;

    /// Record a batch event
    fn record(&self, event: &BatchEvent);

    /// Flush any buffered events
    fn flush(&self) {}
}

/// No-op observer (default)
pub struct NoOpObserver;

impl BatchObserver for NoOpObserver {
    fn name(&self) -> &str {
        "noop"
    }

    fn record(&self, _event: &BatchEvent) {}
}

/// Forwards events to the `log` facade
pub struct LogObserver;

impl BatchObserver for LogObserver {
    fn name(&self) -> &str {
        "log"
    }

    fn record(&self, event: &BatchEvent) {
        match event {
            BatchEvent::InvocationFinished {
                module,
                mode,
                duration,
            } => log::info!(
                "{}: {} {} in {:.2?}",
                event.name(),
                module.display(),
                mode,
                duration
            ),
            other => log::info!("{}: {:?}", other.name(), other),
        }
    }
}

/// In-memory observer for testing
#[derive(Clone, Default)]
pub struct MemoryObserver {
    events: Arc<Mutex<Vec<BatchEvent>>>,
}

impl MemoryObserver {
    /// Create a new memory observer
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in order
    pub fn events(&self) -> Vec<BatchEvent> {
        self.events.lock().clone()
    }

    /// Names of all recorded events, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(BatchEvent::name).collect()
    }

    /// Clear all recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl BatchObserver for MemoryObserver {
    fn name(&self) -> &str {
        "memory"
    }

    fn record(&self, event: &BatchEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_observer_accepts_events() {
        let observer = NoOpObserver;
        assert_eq!(observer.name(), "noop");

        observer.record(&BatchEvent::ModuleSkipped {
            module: PathBuf::from("a.vy"),
        });
        observer.flush();
    }

    #[test]
    fn test_log_observer_accepts_all_events() {
        let observer = LogObserver;
        assert_eq!(observer.name(), "log");

        observer.record(&BatchEvent::InvocationFinished {
            module: PathBuf::from("a.vy"),
            mode: OptimizationMode::Optimized,
            duration: Duration::from_millis(12),
        });
        observer.record(&BatchEvent::BatchCompleted {
            analyzed: 1,
            skipped: 0,
        });
    }

    #[test]
    fn test_memory_observer_records_in_order() {
        let observer = MemoryObserver::new();
        assert_eq!(observer.name(), "memory");

        observer.record(&BatchEvent::ModuleStarted {
            module: PathBuf::from("b.vy"),
        });
        observer.record(&BatchEvent::BatchAborted {
            module: PathBuf::from("b.vy"),
        });

        assert_eq!(observer.names(), vec!["module_started", "batch_aborted"]);
        assert_eq!(
            observer.events()[1],
            BatchEvent::BatchAborted {
                module: PathBuf::from("b.vy")
            }
        );
    }

    #[test]
    fn test_memory_observer_clones_share_storage() {
        let observer = MemoryObserver::new();
        let handle = observer.clone();

        handle.record(&BatchEvent::ModuleSkipped {
            module: PathBuf::from("a.vy"),
        });
        assert_eq!(observer.events().len(), 1);

        observer.clear();
        assert!(handle.events().is_empty());
    }

    #[test]
    fn test_memory_observer_handles_concurrent_events() {
        use std::thread;

        let observer = MemoryObserver::new();
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let observer = observer.clone();
                thread::spawn(move || {
                    observer.record(&BatchEvent::ModuleStarted {
                        module: PathBuf::from(format!("m{}.vy", i)),
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(observer.events().len(), 10);
    }
}
