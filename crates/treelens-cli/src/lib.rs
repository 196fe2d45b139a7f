/// TreeLens CLI: command-line frontend.
///
/// Flag parsing and operator messages live here. Everything else lives in
/// `treelens-core`.
pub mod app;
pub mod args;

pub use app::{execute, exit_status, parse_args, resolve_config, EXIT_FAILURE};
pub use args::Args;
