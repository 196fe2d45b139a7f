/// Command-line flags.
use clap::Parser;
use std::path::PathBuf;
use treelens_core::report::ReportFormat;

/// Walk filesystem roots and merge analyser reports into one document
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "treelens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Walk filesystem roots, run analysers over the tree and merge their reports")]
#[command(after_help = "EXAMPLES:
    # Count files and file types under a directory
    treelens --path ./data --analysers file-count,file-type-count --output report.json

    # Several roots, skip VCS metadata, CSV output
    treelens --path /srv/a --path /srv/b --ignore .git --output report.csv -a file-info

    # Everything from a config file, overriding the output
    treelens --config treelens.json --output /tmp/report.json

    # Show the analysers that can be requested
    treelens --list-analysers
")]
pub struct Args {
    /// Root directories to walk (repeatable or comma-separated; defaults to the filesystem roots)
    #[arg(short, long = "path", value_name = "PATH", value_delimiter = ',')]
    pub paths: Vec<PathBuf>,

    /// Deepest level kept in the tree; the root is level 1
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<u32>,

    /// Glob patterns for entry names to leave out, with everything beneath them
    #[arg(short, long, value_name = "PATTERN", value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Only keep files of these types (extensions); directories are always kept
    #[arg(short, long = "type-filter", value_name = "TYPE", value_delimiter = ',')]
    pub type_filters: Vec<String>,

    /// Where to write the merged report
    #[arg(short, long, visible_alias = "logpath", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Analysers to run, in report order (e.g. file-count,FileTypeCountAnalyser)
    #[arg(short, long, value_name = "ID", value_delimiter = ',')]
    pub analysers: Vec<String>,

    /// Report format (json or csv); inferred from the output extension if omitted
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// Worker threads for running analysers (defaults to the CPU count)
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the available analyser identifiers and exit
    #[arg(long)]
    pub list_analysers: bool,

    /// Log per-analyser progress
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by `--verbose` / `--quiet`.
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}
