//! All command implementation
//!
//! Runs every registered workload. A workload whose binary is missing is
//! logged and skipped; the batch continues with the rest.

use super::{build_harness, save_and_summarize};
use crate::cli::logging::{log, LogLevel};
use crate::cli::AllArgs;
use crate::error::Result;
use crate::registry::WorkloadId;

pub fn run_all(args: AllArgs, level: LogLevel) -> Result<()> {
    let harness =
        build_harness(args.repetitions, args.timeout, args.quick, args.bin_dir, level);

    log(level, LogLevel::Normal, "Iniciando benchmark completo de todos los workloads");

    let mut suites = Vec::new();
    for id in WorkloadId::ALL {
        match harness.run_suite(id) {
            Ok(suite) => suites.push(suite),
            Err(e) if e.is_user_error() => {
                log(level, LogLevel::Normal, &format!("[ERROR] Workload {id}: {e}"));
            }
            Err(e) => return Err(e),
        }
    }

    save_and_summarize(&suites, &harness, &args.data_dir, args.output, level)
}
