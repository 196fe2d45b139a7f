/// JSON rendering: one document per analyser, merged into an envelope that
/// keeps the analysers' submission order.
use super::{ReportArtifact, ReportDocument, ReportFormat, ReportRenderer};
use crate::error::ReportError;
use serde::Serialize;
use serde_json::Value;

/// Renders reports as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct Section<'a> {
    generated_at: String,
    #[serde(flatten)]
    document: &'a ReportDocument,
}

#[derive(Serialize)]
struct Envelope {
    generated_at: String,
    report_count: usize,
    reports: Vec<Value>,
}

impl ReportRenderer for JsonRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ReportError> {
        let section = Section {
            generated_at: chrono::Utc::now().to_rfc3339(),
            document,
        };
        Ok(ReportArtifact {
            analyser: document.title.clone(),
            format: ReportFormat::Json,
            bytes: serde_json::to_vec_pretty(&section)?,
        })
    }

    fn merge(&self, artifacts: &[ReportArtifact]) -> Result<ReportArtifact, ReportError> {
        let reports = artifacts
            .iter()
            .map(|artifact| {
                super::expect_format(artifact, ReportFormat::Json)?;
                Ok(serde_json::from_slice::<Value>(&artifact.bytes)?)
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let envelope = Envelope {
            generated_at: chrono::Utc::now().to_rfc3339(),
            report_count: reports.len(),
            reports,
        };
        Ok(ReportArtifact {
            analyser: "merged".to_string(),
            format: ReportFormat::Json,
            bytes: serde_json::to_vec_pretty(&envelope)?,
        })
    }
}
