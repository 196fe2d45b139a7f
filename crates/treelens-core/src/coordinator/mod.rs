/// Execution coordinator: runs resolved analysers concurrently on a bounded
/// worker pool and gathers their artifacts back in request order.
///
/// Each task analyses and then renders inside its own worker. Completion
/// order is arbitrary; outcomes travel back over a channel tagged with
/// their request index and are slotted into place afterwards, so the merged
/// report never depends on scheduling.
pub mod task;

pub use task::{TaskOutcome, TaskState};

use crate::diagnostics::Diagnostic;
use crate::error::ConfigError;
use crate::registry::AnalyserTask;
use crate::report::{ReportArtifact, ReportRenderer};
use std::time::{Duration, Instant};
use tracing::info;

/// Results of one coordinated run.
#[derive(Debug, Default)]
pub struct CoordinatorReport {
    /// `(identifier, artifact)` for each analyser that finished both phases,
    /// in request order.
    pub succeeded: Vec<(String, ReportArtifact)>,
    /// One diagnostic per analyser that failed, in request order.
    pub failures: Vec<Diagnostic>,
    pub duration: Duration,
}

impl CoordinatorReport {
    /// Artifacts only, in request order.
    pub fn into_artifacts(self) -> Vec<ReportArtifact> {
        self.succeeded.into_iter().map(|(_, artifact)| artifact).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Coordinator {
    workers: usize,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl Coordinator {
    /// A coordinator running at most `workers` tasks at once (minimum 1).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every task to a terminal state.
    ///
    /// Fails only if the worker pool cannot be started; analyser failures
    /// are reported in [`CoordinatorReport::failures`].
    pub fn run(
        &self,
        tasks: Vec<AnalyserTask>,
        renderer: &dyn ReportRenderer,
    ) -> Result<CoordinatorReport, ConfigError> {
        let started = Instant::now();
        if tasks.is_empty() {
            return Ok(CoordinatorReport::default());
        }

        let threads = self.workers.min(tasks.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("treelens-worker-{i}"))
            .build()
            .map_err(|e| ConfigError::WorkerPool(e.to_string()))?;

        info!("Running {} analyser(s) on {threads} worker(s)", tasks.len());

        let total = tasks.len();
        let (tx, rx) = crossbeam_channel::unbounded::<TaskOutcome>();
        pool.scope(|scope| {
            for queued in tasks {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    // Receiver outlives the scope; send cannot fail here.
                    let _ = tx.send(task::execute(queued, renderer));
                });
            }
        });
        drop(tx);

        let mut outcomes: Vec<TaskOutcome> = rx.iter().collect();
        debug_assert_eq!(outcomes.len(), total);
        outcomes.sort_by_key(|outcome| outcome.index);

        let mut report = CoordinatorReport::default();
        for outcome in outcomes {
            tracing::debug!(
                analyser = %outcome.identifier,
                state = ?outcome.state,
                "finished in {:.2?}",
                outcome.elapsed
            );
            match outcome.result {
                Ok(artifact) => report.succeeded.push((outcome.identifier, artifact)),
                Err(diagnostic) => report.failures.push(diagnostic),
            }
        }
        report.duration = started.elapsed();

        info!(
            "{} of {total} analyser(s) succeeded in {:.2?}",
            report.succeeded.len(),
            report.duration
        );
        Ok(report)
    }
}
