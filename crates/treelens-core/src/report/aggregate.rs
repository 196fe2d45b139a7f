/// Merge successful artifacts and deliver the result.
use super::{ReportArtifact, ReportRenderer, ReportSink};
use crate::error::MergeError;
use tracing::{info, warn};

/// Merge `artifacts` in the order given and hand the result to `sink`.
///
/// Returns the number of bytes delivered. The caller passes only artifacts
/// from analysers that succeeded, already in request order.
pub fn aggregate(
    renderer: &dyn ReportRenderer,
    artifacts: &[ReportArtifact],
    sink: &dyn ReportSink,
) -> Result<usize, MergeError> {
    if artifacts.is_empty() {
        warn!("No analyser produced a report; delivering an empty {} report", renderer.format());
    }

    let merged = renderer.merge(artifacts).map_err(|source| MergeError::Merge {
        count: artifacts.len(),
        source,
    })?;

    sink.deliver(&merged).map_err(|source| MergeError::Write {
        sink: sink.describe(),
        source,
    })?;

    info!(
        "Delivered {} section(s), {} bytes, to {}",
        artifacts.len(),
        merged.bytes.len(),
        sink.describe()
    );
    Ok(merged.bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Cell, JsonRenderer, MemorySink, ReportDocument, ReportFormat};
    use std::io;

    struct BrokenSink;

    impl ReportSink for BrokenSink {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        fn deliver(&self, _artifact: &ReportArtifact) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    fn artifact(title: &str) -> ReportArtifact {
        let mut doc = ReportDocument::new(title, "d", &[]).columns(&["n"]);
        doc.push_row(vec![Cell::from(1u64)]);
        JsonRenderer.render(&doc).unwrap()
    }

    #[test]
    fn delivers_merged_artifact() {
        let sink = MemorySink::new();
        let written = aggregate(&JsonRenderer, &[artifact("A"), artifact("C")], &sink).unwrap();
        let delivered = sink.take().unwrap();
        assert_eq!(delivered.bytes.len(), written);

        let value: serde_json::Value = serde_json::from_slice(&delivered.bytes).unwrap();
        assert_eq!(value["reports"][0]["title"], "A");
        assert_eq!(value["reports"][1]["title"], "C");
    }

    #[test]
    fn write_failure_is_reported() {
        let err = aggregate(&JsonRenderer, &[artifact("A")], &BrokenSink).unwrap_err();
        assert!(matches!(err, MergeError::Write { .. }));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn merge_failure_is_reported() {
        let bad = ReportArtifact {
            analyser: "bad".to_string(),
            format: ReportFormat::Csv,
            bytes: Vec::new(),
        };
        let err = aggregate(&JsonRenderer, &[bad], &MemorySink::new()).unwrap_err();
        assert!(matches!(err, MergeError::Merge { count: 1, .. }));
    }

    #[test]
    fn empty_input_still_delivers() {
        let sink = MemorySink::new();
        aggregate(&JsonRenderer, &[], &sink).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&sink.take().unwrap().bytes).unwrap();
        assert_eq!(value["report_count"], 0);
    }
}
