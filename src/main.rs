//! Medir CLI
//!
//! Benchmark-execution entry point.
//!
//! # Usage
//!
//! ```bash
//! # Sweep one workload's registered parameter grid
//! medir run p1_counter
//!
//! # One explicit configuration, 10 repetitions
//! medir run p1_counter 4 100000 -n 10
//!
//! # Every registered workload
//! medir all
//!
//! # Analyze an existing results log
//! medir analyze data/benchmark_results.csv
//!
//! # Regenerate the HTML report
//! medir report data/
//! ```

use clap::Parser;
use medir::cli::{run_command, Cli};
use medir::MedirError;
use std::process::ExitCode;

/// Exit status for operator interruption, matching shell convention.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(MedirError::Interrupted) => {
            eprintln!("Interrupted");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.code());
            ExitCode::FAILURE
        }
    }
}
