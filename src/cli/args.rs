//! CLI argument types
//!
//! ```bash
//! medir run p1_counter                    # sweep the registered grid
//! medir run p1_counter 4 100000 -n 10     # explicit parameters
//! medir all                               # every registered workload
//! medir analyze data/benchmark_results.csv
//! medir report data/
//! ```

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Medir: benchmark harness for concurrency workload binaries
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "medir")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Runs concurrency workload binaries across parameter grids and aggregates the results")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Benchmark one workload
    Run(RunArgs),

    /// Benchmark every registered workload
    All(AllArgs),

    /// Analyze an existing results log
    Analyze(AnalyzeArgs),

    /// Generate an HTML report from a results directory
    Report(ReportArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Workload identifier (p1_counter, p2_ring, p3_rw, p4_deadlock, p5_pipeline)
    #[arg(value_name = "WORKLOAD")]
    pub workload: String,

    /// Explicit positional parameters; sweeps the registered grid when absent
    #[arg(value_name = "PARAMS")]
    pub params: Vec<String>,

    /// Repetitions per configuration
    #[arg(short = 'n', long, default_value_t = crate::suite::DEFAULT_REPETITIONS)]
    pub repetitions: usize,

    /// Timeout override in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Quick mode: 2 repetitions, 15s timeout
    #[arg(long)]
    pub quick: bool,

    /// Directory holding the workload binaries
    #[arg(long, default_value = "bin")]
    pub bin_dir: PathBuf,

    /// Results CSV path; defaults to <data-dir>/benchmark_results.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for results, snapshot and report
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

/// Arguments for the all command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AllArgs {
    /// Repetitions per configuration
    #[arg(short = 'n', long, default_value_t = crate::suite::DEFAULT_REPETITIONS)]
    pub repetitions: usize,

    /// Timeout override in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Quick mode: 2 repetitions, 15s timeout
    #[arg(long)]
    pub quick: bool,

    /// Directory holding the workload binaries
    #[arg(long, default_value = "bin")]
    pub bin_dir: PathBuf,

    /// Results CSV path; defaults to <data-dir>/benchmark_results.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for results, snapshot and report
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

/// Arguments for the analyze command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AnalyzeArgs {
    /// Path to the results CSV log
    #[arg(value_name = "CSV")]
    pub results: PathBuf,
}

/// Arguments for the report command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ReportArgs {
    /// Data directory containing analysis_report.json
    #[arg(value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

/// Parse CLI arguments from an iterator, for tests and `main`.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_sweep() {
        let cli = parse_args(["medir", "run", "p1_counter"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.workload, "p1_counter");
                assert!(args.params.is_empty());
                assert_eq!(args.repetitions, 5);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_with_params_and_reps() {
        let cli =
            parse_args(["medir", "run", "p1_counter", "4", "100000", "-n", "10"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.params, vec!["4", "100000"]);
                assert_eq!(args.repetitions, 10);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_all_quick() {
        let cli = parse_args(["medir", "all", "--quick"]).unwrap();
        match cli.command {
            Command::All(args) => assert!(args.quick),
            _ => panic!("Expected All command"),
        }
    }

    #[test]
    fn test_parse_analyze() {
        let cli = parse_args(["medir", "analyze", "data/results.csv"]).unwrap();
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.results, PathBuf::from("data/results.csv"));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_parse_report_default_dir() {
        let cli = parse_args(["medir", "report"]).unwrap();
        match cli.command {
            Command::Report(args) => assert_eq!(args.data_dir, PathBuf::from("data")),
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["medir", "-v", "all"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(parse_args(["medir"]).is_err());
    }
}
