/// Destinations for the merged report.
use super::ReportArtifact;
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where the merged artifact ends up. Exactly one writer touches a sink,
/// after every analyser has finished.
pub trait ReportSink {
    /// Human-readable name for messages.
    fn describe(&self) -> String;

    fn deliver(&self, artifact: &ReportArtifact) -> io::Result<()>;
}

/// Writes the artifact to a file.
///
/// Bytes go to a sibling `.tmp` file first and are renamed into place, so
/// a failed write never leaves a truncated report at `path`.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ReportSink for FileSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn deliver(&self, artifact: &ReportArtifact) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(&artifact.bytes)?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }
        Ok(())
    }
}

/// Keeps the delivered artifact in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Option<ReportArtifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently delivered artifact.
    pub fn take(&self) -> Option<ReportArtifact> {
        self.delivered.lock().take()
    }
}

impl ReportSink for MemorySink {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn deliver(&self, artifact: &ReportArtifact) -> io::Result<()> {
        *self.delivered.lock() = Some(artifact.clone());
        Ok(())
    }
}
