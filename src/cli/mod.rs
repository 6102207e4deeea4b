//! CLI module for medir
//!
//! Argument parsing, command dispatch, and console logging.

mod args;
mod commands;
pub mod logging;

pub use args::{parse_args, AllArgs, AnalyzeArgs, Cli, Command, ReportArgs, RunArgs};
pub use commands::run_command;
pub use logging::LogLevel;
