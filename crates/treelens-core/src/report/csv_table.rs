/// CSV rendering. Each artifact is a block of `#` header lines followed by
/// one table; merging concatenates blocks separated by a blank line.
use super::{ReportArtifact, ReportDocument, ReportFormat, ReportRenderer};
use crate::error::ReportError;
use std::io::Write;

/// Renders reports as commented CSV sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl CsvRenderer {
    fn header(document: &ReportDocument) -> String {
        let mut header = String::new();
        header.push_str(&format!("# {}\n", document.title));
        header.push_str(&format!("# {}\n", document.description));
        header.push_str(&format!("# paths: {}\n", document.paths.join("; ")));
        header.push_str(&format!("# generated_at: {}\n", chrono::Utc::now().to_rfc3339()));
        header
    }
}

impl ReportRenderer for CsvRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ReportError> {
        let mut out = Self::header(document).into_bytes();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&document.columns)?;
        for row in &document.rows {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        let table = writer
            .into_inner()
            .map_err(|e| ReportError::Failed(format!("flushing CSV table: {}", e.error())))?;
        out.extend_from_slice(&table);

        for line in &document.summary {
            out.extend_from_slice(format!("# {}: {}\n", line.label, line.value).as_bytes());
        }

        Ok(ReportArtifact {
            analyser: document.title.clone(),
            format: ReportFormat::Csv,
            bytes: out,
        })
    }

    fn merge(&self, artifacts: &[ReportArtifact]) -> Result<ReportArtifact, ReportError> {
        let mut out: Vec<u8> = Vec::new();
        for (i, artifact) in artifacts.iter().enumerate() {
            super::expect_format(artifact, ReportFormat::Csv)?;
            if i > 0 {
                out.write_all(b"\n")
                    .map_err(|e| ReportError::Failed(e.to_string()))?;
            }
            out.extend_from_slice(&artifact.bytes);
        }
        Ok(ReportArtifact {
            analyser: "merged".to_string(),
            format: ReportFormat::Csv,
            bytes: out,
        })
    }
}
