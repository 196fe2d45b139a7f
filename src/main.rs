//! TreeLens: filesystem forest analysis with pluggable analysers.
//!
//! Thin binary entry point: parses flags, sets up logging and hands off to
//! the CLI crate, whose exit status becomes the process status.

use std::process::ExitCode;
use treelens_core::AnalyserRegistry;

fn main() -> ExitCode {
    let args = match treelens_cli::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(status) => return ExitCode::from(status),
    };

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("treelens {} starting", env!("CARGO_PKG_VERSION"));

    let registry = AnalyserRegistry::with_builtins();
    let outcome = treelens_cli::execute(&args, &registry, &mut std::io::stdout().lock());
    ExitCode::from(treelens_cli::exit_status(outcome, &mut std::io::stderr()))
}
