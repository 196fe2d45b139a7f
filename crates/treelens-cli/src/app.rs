/// Turns parsed flags into a run and reports the outcome to the operator.
use crate::args::Args;
use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use treelens_core::{run, AnalyserRegistry, RunConfig};

/// Exit status for a run that failed after its flags were accepted.
pub const EXIT_FAILURE: u8 = 1;

/// Parse command-line words into [`Args`].
///
/// Usage errors and help or version requests are printed the way clap
/// prints them and come back as the status to exit with: 2 for a usage
/// error, 0 for help.
pub fn parse_args<I, T>(argv: I) -> std::result::Result<Args, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv).map_err(|err| {
        let _ = err.print();
        u8::try_from(err.exit_code()).unwrap_or(EXIT_FAILURE)
    })
}

/// Exit status for the outcome of [`execute`]. Errors are written to
/// `err` with their full context chain.
pub fn exit_status(outcome: Result<()>, err: &mut dyn Write) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(err, "Error: {error:?}");
            EXIT_FAILURE
        }
    }
}

/// Start from the config file (if any) and let every flag that was given
/// replace the corresponding setting.
pub fn resolve_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RunConfig::default(),
    };

    if !args.paths.is_empty() {
        config.roots = Some(args.paths.clone());
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if !args.ignore.is_empty() {
        config.ignore = args.ignore.clone();
    }
    if !args.type_filters.is_empty() {
        config.type_filters = args.type_filters.clone();
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if !args.analysers.is_empty() {
        config.analysers = args.analysers.clone();
    }
    if args.format.is_some() {
        config.format = args.format;
    }
    if args.workers.is_some() {
        config.workers = args.workers;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Run the command described by `args`, writing operator messages to `out`.
pub fn execute(args: &Args, registry: &AnalyserRegistry, out: &mut dyn Write) -> Result<()> {
    if args.list_analysers {
        writeln!(out, "Available analysers:")?;
        for id in registry.identifiers() {
            writeln!(out, "  {id}")?;
        }
        return Ok(());
    }

    let config = resolve_config(args)?;
    let summary = run(&config, registry).context("the report could not be delivered")?;

    if !summary.diagnostics.is_empty() {
        writeln!(
            out,
            "{} analyser(s) reported diagnostics:",
            summary.diagnostics.len()
        )?;
        for diagnostic in &summary.diagnostics {
            writeln!(out, "  {diagnostic}")?;
        }
    }
    writeln!(
        out,
        "Finished! Your report is ready at path: {}",
        summary.output.display()
    )?;
    Ok(())
}
