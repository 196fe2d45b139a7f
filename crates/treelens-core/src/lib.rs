/// TreeLens Core: tree building, analyser orchestration and report merging.
///
/// This crate holds all of the logic and none of the frontend. A run walks
/// one or more filesystem roots into a shared read-only forest, resolves
/// analysers by name, runs them concurrently, and merges their reports in
/// request order.
///
/// # Modules
///
/// - [`model`]: Arena-allocated file forest and supporting types.
/// - [`builder`]: Breadth-first tree builder with depth limit and filters.
/// - [`analysis`]: The `Analyser` trait and the built-in analysers.
/// - [`registry`]: Identifier -> factory resolution.
/// - [`coordinator`]: Bounded parallel execution with failure isolation.
/// - [`report`]: Documents, renderers, merging and sinks.
/// - [`config`]: Run configuration and validation.
/// - [`platform`]: Default roots and hidden-file detection.
pub mod analysis;
pub mod builder;
pub mod config;
pub mod coordinator;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod platform;
pub mod registry;
pub mod report;

pub use config::RunConfig;
pub use diagnostics::{Diagnostic, Phase};
pub use error::RunError;
pub use pipeline::{run, run_with, RunSummary};
pub use registry::AnalyserRegistry;
