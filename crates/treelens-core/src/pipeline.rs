/// End-to-end run: validate -> build -> resolve -> coordinate -> deliver.
use crate::analysis::{SharedForest, SharedPaths};
use crate::builder::{BuildStats, FileSystem, TreeBuilder};
use crate::config::RunConfig;
use crate::coordinator::Coordinator;
use crate::diagnostics::{Diagnostic, Phase};
use crate::error::{ConfigError, RunError};
use crate::registry::AnalyserRegistry;
use crate::report::{aggregate, renderer_for, FileSink, ReportFormat, ReportRenderer, ReportSink};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub output: PathBuf,
    pub format: ReportFormat,
    /// Trees in the forest, one per usable root.
    pub trees: usize,
    /// Analysers that resolved and were scheduled.
    pub resolved: usize,
    /// Identifiers whose sections made it into the report, in order.
    pub succeeded: Vec<String>,
    /// Every recovered failure, resolution first, then execution.
    pub diagnostics: Vec<Diagnostic>,
    pub build_stats: BuildStats,
    pub bytes_written: usize,
}

/// Run `config` against the local filesystem and write the merged report
/// to `config.output`.
pub fn run(config: &RunConfig, registry: &AnalyserRegistry) -> Result<RunSummary, RunError> {
    config.validate()?;
    let output = config.output.clone().ok_or(ConfigError::MissingOutput)?;
    let builder = TreeBuilder::new(config.build_options())?;
    let renderer = renderer_for(config.effective_format());
    let sink = FileSink::new(&output);
    run_with(config, registry, &builder, renderer.as_ref(), &sink)
}

/// [`run`] with the filesystem, renderer and sink supplied by the caller.
pub fn run_with<F: FileSystem>(
    config: &RunConfig,
    registry: &AnalyserRegistry,
    builder: &TreeBuilder<F>,
    renderer: &dyn ReportRenderer,
    sink: &dyn ReportSink,
) -> Result<RunSummary, RunError> {
    config.validate()?;
    let coordinator = config.workers.map(Coordinator::new).unwrap_or_default();

    let roots = match config.requested_roots() {
        [] => crate::platform::default_roots(),
        requested => requested.to_vec(),
    };
    let built = builder.build(&roots);
    let forest: SharedForest = Arc::new(built.forest);
    let paths: SharedPaths = roots.iter().map(|r| r.display().to_string()).collect();

    let resolution = registry.resolve(&config.analysers, &forest, &paths);
    let resolved = resolution.tasks.len();
    let mut diagnostics = resolution.diagnostics;

    let report = coordinator.run(resolution.tasks, renderer)?;
    diagnostics.extend(report.failures);
    let (succeeded, artifacts): (Vec<String>, Vec<_>) = report.succeeded.into_iter().unzip();

    let bytes_written = aggregate(renderer, &artifacts, sink).map_err(|err| {
        Diagnostic::emit(sink.describe(), Phase::Merge, err.to_string());
        err
    })?;

    info!(
        "Run complete: {} of {} requested analyser(s) reported, {} diagnostic(s)",
        succeeded.len(),
        config.analysers.len(),
        diagnostics.len()
    );

    Ok(RunSummary {
        output: config.output.clone().unwrap_or_default(),
        format: renderer.format(),
        trees: forest.roots.len(),
        resolved,
        succeeded,
        diagnostics,
        build_stats: built.stats,
        bytes_written,
    })
}
