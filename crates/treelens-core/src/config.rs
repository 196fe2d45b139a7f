/// Run configuration: what to walk, which analysers to run, where the merged
/// report goes.
///
/// Loaded from a JSON file and/or assembled by a frontend, then checked
/// with [`RunConfig::validate`] before anything touches the filesystem.
use crate::builder::{BuildOptions, EntryFilter, DEFAULT_MAX_DEPTH};
use crate::error::ConfigError;
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Roots to walk. `None` means the platform's default roots.
    #[serde(alias = "paths")]
    pub roots: Option<Vec<PathBuf>>,
    pub max_depth: u32,
    #[serde(alias = "ignores")]
    pub ignore: Vec<String>,
    pub type_filters: Vec<String>,
    /// Analyser identifiers, in the order their sections appear in the report.
    pub analysers: Vec<String>,
    #[serde(alias = "logpath")]
    pub output: Option<PathBuf>,
    /// Output format; inferred from the output extension when unset.
    pub format: Option<ReportFormat>,
    /// Worker threads; defaults to the number of CPUs.
    pub workers: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            roots: None,
            max_depth: DEFAULT_MAX_DEPTH,
            ignore: Vec::new(),
            type_filters: Vec::new(),
            analysers: Vec::new(),
            output: None,
            format: None,
            workers: None,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reject configurations that cannot produce a report.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.output {
            Some(output) if !output.as_os_str().is_empty() => {}
            _ => return Err(ConfigError::MissingOutput),
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(self.max_depth));
        }
        if self.analysers.iter().all(|id| id.trim().is_empty()) {
            return Err(ConfigError::NoAnalysers);
        }
        if let Some(roots) = &self.roots {
            if let Some(pos) = roots.iter().position(|r| r.as_os_str().is_empty()) {
                return Err(ConfigError::EmptyRoot(pos));
            }
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }
        // Surface bad glob patterns now rather than after a long walk.
        EntryFilter::compile(&self.ignore, &self.type_filters)?;
        Ok(())
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            max_depth: self.max_depth,
            ignore: self.ignore.clone(),
            type_filters: self.type_filters.clone(),
        }
    }

    /// Configured roots, or empty for "use the defaults".
    pub fn requested_roots(&self) -> &[PathBuf] {
        self.roots.as_deref().unwrap_or(&[])
    }

    /// The explicit format, else whatever the output extension implies.
    pub fn effective_format(&self) -> ReportFormat {
        self.format.unwrap_or_else(|| {
            self.output
                .as_deref()
                .map(ReportFormat::from_path)
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid() -> RunConfig {
        RunConfig {
            analysers: vec!["file-count".into()],
            output: Some(PathBuf::from("report.json")),
            ..RunConfig::default()
        }
    }

    #[test]
    fn defaults_are_sensible() {
        let config = RunConfig::default();
        assert_eq!(config.max_depth, 1000);
        assert!(config.roots.is_none());
        assert!(matches!(config.validate(), Err(ConfigError::MissingOutput)));
    }

    #[test]
    fn validate_accepts_minimal_config() {
        valid().validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut c = valid();
        c.max_depth = 0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidMaxDepth(0))));

        let mut c = valid();
        c.analysers = vec![" ".into(), String::new()];
        assert!(matches!(c.validate(), Err(ConfigError::NoAnalysers)));

        let mut c = valid();
        c.roots = Some(vec![PathBuf::from("/tmp"), PathBuf::new()]);
        assert!(matches!(c.validate(), Err(ConfigError::EmptyRoot(1))));

        let mut c = valid();
        c.workers = Some(0);
        assert!(matches!(c.validate(), Err(ConfigError::InvalidWorkers)));

        let mut c = valid();
        c.ignore = vec!["[unclosed".into()];
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidIgnorePattern { .. })
        ));

        let mut c = valid();
        c.output = Some(PathBuf::new());
        assert!(matches!(c.validate(), Err(ConfigError::MissingOutput)));
    }

    #[test]
    fn parses_json_with_aliases_and_defaults() {
        let config = RunConfig::from_json(
            r#"{
                "paths": ["/srv/data"],
                "ignores": ["node_modules"],
                "analysers": ["file-count", "file-type-count"],
                "logpath": "out/report.csv"
            }"#,
        )
        .unwrap();
        assert_eq!(config.roots, Some(vec![PathBuf::from("/srv/data")]));
        assert_eq!(config.ignore, vec!["node_modules"]);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.effective_format(), ReportFormat::Csv);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RunConfig::from_json(r#"{"analyzers": []}"#).is_err());
    }

    #[test]
    fn explicit_format_wins_over_extension() {
        let mut c = valid();
        c.output = Some(PathBuf::from("report.csv"));
        c.format = Some(ReportFormat::Json);
        assert_eq!(c.effective_format(), ReportFormat::Json);
    }

    #[test]
    fn load_file_reports_read_and_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            RunConfig::load_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::File::create(&broken)
            .unwrap()
            .write_all(b"{ not json")
            .unwrap();
        assert!(matches!(
            RunConfig::load_file(&broken),
            Err(ConfigError::Parse { .. })
        ));

        let good = dir.path().join("good.json");
        fs::write(&good, r#"{"analysers":["file-info"],"output":"r.json","max_depth":3}"#).unwrap();
        let config = RunConfig::load_file(&good).unwrap();
        assert_eq!(config.max_depth, 3);
        config.validate().unwrap();
    }
}
