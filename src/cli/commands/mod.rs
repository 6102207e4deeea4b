//! CLI command implementations

mod all;
mod analyze;
mod report;
mod run;

use crate::cli::logging::{log, LogLevel};
use crate::cli::{Cli, Command};
use crate::error::Result;
use crate::persist::{self, Snapshot};
use crate::suite::{Harness, Suite};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default results log name inside the data directory.
pub const RESULTS_FILE: &str = "benchmark_results.csv";
/// Default snapshot name inside the data directory.
pub const ANALYSIS_FILE: &str = "analysis_report.json";

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run(args) => run::run_workload(args, level),
        Command::All(args) => all::run_all(args, level),
        Command::Analyze(args) => analyze::run_analyze(&args, level),
        Command::Report(args) => report::run_report(&args, level),
    }
}

/// Build a harness from the shared run/all knobs.
pub(crate) fn build_harness(
    repetitions: usize,
    timeout: Option<u64>,
    quick: bool,
    bin_dir: PathBuf,
    level: LogLevel,
) -> Harness {
    let (repetitions, timeout) = if quick {
        (2, Some(15))
    } else {
        (repetitions, timeout)
    };
    let mut harness = Harness::new(repetitions).with_bin_dir(bin_dir).with_level(level);
    if let Some(secs) = timeout {
        harness = harness.with_timeout(Duration::from_secs(secs));
    }
    harness
}

/// Persist completed suites and print the closing summary.
pub(crate) fn save_and_summarize(
    suites: &[Suite],
    harness: &Harness,
    data_dir: &Path,
    output: Option<PathBuf>,
    level: LogLevel,
) -> Result<()> {
    let results_path = output.unwrap_or_else(|| data_dir.join(RESULTS_FILE));
    let records: Vec<_> = suites.iter().flat_map(|s| s.records.iter().cloned()).collect();

    persist::append_results(&results_path, &records)?;
    log(level, LogLevel::Normal, &format!("Resultados guardados en {}", results_path.display()));

    let snapshot = Snapshot::from_suites(suites, harness);
    let snapshot_path = data_dir.join(ANALYSIS_FILE);
    persist::write_snapshot(&snapshot_path, &snapshot)?;
    log(level, LogLevel::Normal, &format!("Análisis guardado en {}", snapshot_path.display()));

    let report_path = crate::report::render(data_dir, &snapshot)?;
    log(level, LogLevel::Normal, &format!("Reporte HTML en {}", report_path.display()));

    let successful = records.iter().filter(|r| r.success).count();
    log(
        level,
        LogLevel::Normal,
        &format!("\nBenchmark completado: {successful}/{} experimentos exitosos", records.len()),
    );
    Ok(())
}
