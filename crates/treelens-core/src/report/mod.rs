/// Reporting collaborator: renders analyser documents into opaque
/// artifacts, merges artifacts in submission order, and hands the merged
/// artifact to a sink.
pub mod aggregate;
pub mod csv_table;
pub mod document;
pub mod json;
pub mod sink;

pub use aggregate::aggregate;
pub use csv_table::CsvRenderer;
pub use document::{Cell, ReportArtifact, ReportDocument, ReportFormat, SummaryLine};
pub use json::JsonRenderer;
pub use sink::{FileSink, MemorySink, ReportSink};

use crate::error::ReportError;

/// Turns documents into artifacts and artifacts into one merged artifact.
///
/// Shared by every worker thread during a run, hence `Send + Sync`.
pub trait ReportRenderer: Send + Sync {
    fn format(&self) -> ReportFormat;

    /// Serialise one analyser's document.
    fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ReportError>;

    /// Combine artifacts, in the order given, into a single artifact.
    fn merge(&self, artifacts: &[ReportArtifact]) -> Result<ReportArtifact, ReportError>;
}

/// The stock renderer for a format.
pub fn renderer_for(format: ReportFormat) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Json => Box::new(JsonRenderer),
        ReportFormat::Csv => Box::new(CsvRenderer),
    }
}

/// Reject artifacts a renderer did not produce.
fn expect_format(artifact: &ReportArtifact, expected: ReportFormat) -> Result<(), ReportError> {
    if artifact.format == expected {
        Ok(())
    } else {
        Err(ReportError::FormatMismatch {
            analyser: artifact.analyser.clone(),
            expected,
            found: artifact.format,
        })
    }
}
