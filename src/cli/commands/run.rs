//! Run command implementation

use super::{build_harness, save_and_summarize};
use crate::cli::logging::{log, LogLevel};
use crate::cli::RunArgs;
use crate::error::Result;
use crate::params::ParameterSet;
use crate::registry::WorkloadId;
use crate::stats;
use crate::suite::Suite;

pub fn run_workload(args: RunArgs, level: LogLevel) -> Result<()> {
    let id: WorkloadId = args.workload.parse()?;
    let harness =
        build_harness(args.repetitions, args.timeout, args.quick, args.bin_dir, level);

    let suite = if args.params.is_empty() {
        harness.run_suite(id)?
    } else {
        // Explicit parameter override: one configuration, no grid sweep.
        let params = ParameterSet::from_cli(id, &args.params)?;
        harness.check_executable(id)?;
        log(
            level,
            LogLevel::Normal,
            &format!("Benchmark {} con configuración {}", id, params.label()),
        );
        let records = harness.run_config(&params)?;
        let statistics = stats::aggregate(&records);
        Suite { workload: id, name: id.descriptor().name.to_string(), records, statistics }
    };

    save_and_summarize(&[suite], &harness, &args.data_dir, args.output, level)
}
