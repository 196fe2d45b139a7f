/// The analyser interface every plugin implements.
use crate::error::{AnalysisError, ReportError};
use crate::model::FileForest;
use crate::report::{ReportArtifact, ReportDocument, ReportRenderer};
use std::sync::Arc;

/// The built forest, shared read-only by every analyser in a run.
pub type SharedForest = Arc<FileForest>;

/// Root path strings the run was asked to analyse.
pub type SharedPaths = Arc<[String]>;

/// A self-contained unit of analysis over the forest.
///
/// Lifecycle: [`analyse`](Self::analyse) once, then
/// [`generate_report`](Self::generate_report). Implementations keep their
/// accumulated results privately and never mutate the forest.
pub trait Analyser: Send {
    /// Name used in report titles and diagnostics.
    fn name(&self) -> &str;

    /// One-sentence description for the report header.
    fn description(&self) -> &str;

    /// Walk the forest and accumulate results.
    fn analyse(&mut self) -> Result<(), AnalysisError>;

    /// Lay the accumulated results out as a document.
    fn report(&self) -> Result<ReportDocument, ReportError>;

    /// Render [`report`](Self::report) through `renderer`.
    fn generate_report(&self, renderer: &dyn ReportRenderer) -> Result<ReportArtifact, ReportError> {
        let document = self.report()?;
        let mut artifact = renderer.render(&document)?;
        artifact.analyser = self.name().to_string();
        Ok(artifact)
    }
}

/// Fail analysis early when there is nothing to look at.
pub(crate) fn require_trees(forest: &FileForest) -> Result<(), AnalysisError> {
    if forest.roots.is_empty() {
        Err(AnalysisError::EmptyForest)
    } else {
        Ok(())
    }
}
