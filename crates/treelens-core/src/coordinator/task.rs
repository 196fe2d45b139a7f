/// One analyser's trip through the pipeline, run on a worker thread.
///
/// States move strictly forward:
/// `Pending -> Analysing -> Reporting -> Succeeded`, with `Failed`
/// reachable from either working state. A task never restarts.
use crate::diagnostics::{Diagnostic, Phase};
use crate::error::{panic_message, AnalysisError, ReportError};
use crate::registry::AnalyserTask;
use crate::report::{ReportArtifact, ReportRenderer};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Analysing,
    Reporting,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    fn can_move_to(self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Analysing)
                | (Self::Analysing, Self::Reporting)
                | (Self::Analysing, Self::Failed)
                | (Self::Reporting, Self::Succeeded)
                | (Self::Reporting, Self::Failed)
        )
    }
}

/// What a finished task sends back to the coordinator.
#[derive(Debug)]
pub struct TaskOutcome {
    /// Request position, used to restore submission order.
    pub index: usize,
    pub identifier: String,
    pub state: TaskState,
    pub result: Result<ReportArtifact, Diagnostic>,
    pub elapsed: Duration,
}

struct Tracker<'a> {
    identifier: &'a str,
    state: TaskState,
}

impl Tracker<'_> {
    fn advance(&mut self, next: TaskState) {
        debug_assert!(
            self.state.can_move_to(next),
            "illegal task transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(analyser = self.identifier, "{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Analyse, then render, one task. Errors and panics from either phase
/// become a diagnostic; nothing escapes to the caller.
pub(crate) fn execute(task: AnalyserTask, renderer: &dyn ReportRenderer) -> TaskOutcome {
    let started = Instant::now();
    let AnalyserTask {
        index,
        identifier,
        mut analyser,
    } = task;
    let mut tracker = Tracker {
        identifier: &identifier,
        state: TaskState::Pending,
    };

    tracker.advance(TaskState::Analysing);
    let analysed = catch_unwind(AssertUnwindSafe(|| analyser.analyse()))
        .unwrap_or_else(|payload| Err(AnalysisError::Panicked(panic_message(payload.as_ref()))));

    let result = match analysed {
        Err(err) => {
            tracker.advance(TaskState::Failed);
            Err(Diagnostic::emit(
                identifier.as_str(),
                Phase::Analyse,
                format!("{} failed: {err}", analyser.name()),
            ))
        }
        Ok(()) => {
            tracker.advance(TaskState::Reporting);
            let rendered = catch_unwind(AssertUnwindSafe(|| analyser.generate_report(renderer)))
                .unwrap_or_else(|payload| {
                    Err(ReportError::Panicked(panic_message(payload.as_ref())))
                });
            match rendered {
                Ok(artifact) => {
                    tracker.advance(TaskState::Succeeded);
                    Ok(artifact)
                }
                Err(err) => {
                    tracker.advance(TaskState::Failed);
                    Err(Diagnostic::emit(
                        identifier.as_str(),
                        Phase::Report,
                        format!("{} could not produce a report: {err}", analyser.name()),
                    ))
                }
            }
        }
    };

    let state = tracker.state;
    TaskOutcome {
        index,
        identifier,
        state,
        result,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_only_move_forward() {
        use TaskState::*;
        assert!(Pending.can_move_to(Analysing));
        assert!(Analysing.can_move_to(Failed));
        assert!(Reporting.can_move_to(Succeeded));
        assert!(!Pending.can_move_to(Reporting));
        assert!(!Succeeded.can_move_to(Analysing));
        assert!(!Failed.can_move_to(Reporting));
        assert!(Failed.is_terminal() && Succeeded.is_terminal());
        assert!(!Reporting.is_terminal());
    }
}
