//! Repetition controller: sweeps, repetitions, result records.
//!
//! A suite is one full sweep of a workload: every parameter set in its
//! descriptor, each repeated N times sequentially with a fixed pause between
//! repetitions. Individual failures and timeouts become unsuccessful records
//! and never abort the sweep; only a missing binary does, before any
//! repetition starts.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cli::logging::{log, LogLevel};
use crate::error::{MedirError, Result};
use crate::extract;
use crate::params::ParameterSet;
use crate::registry::{WorkloadDescriptor, WorkloadId};
use crate::runner::{self, RunOutcome};
use crate::stats::{self, SuiteStatistics};

/// Default number of repetitions per configuration.
pub const DEFAULT_REPETITIONS: usize = 5;
/// Pause inserted between consecutive repetitions.
pub const REPETITION_PAUSE: Duration = Duration::from_millis(500);

/// One execution outcome. Created once per invocation, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Workload that produced this record.
    pub workload: WorkloadId,
    /// Serialized configuration label, e.g. `threads=4_iterations=100000`.
    pub config: String,
    /// RFC 3339 timestamp taken at record creation.
    pub timestamp: String,
    /// Wall-clock seconds; equals the configured timeout exactly for a
    /// timed-out run.
    pub elapsed: f64,
    /// Operations per second; always 0 for unsuccessful runs.
    pub throughput: f64,
    /// Whether the workload exited with status 0 within its timeout.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Extracted metric name → value. Best-effort for failed runs.
    pub metrics: BTreeMap<String, f64>,
}

impl ResultRecord {
    /// Build a record, enforcing the throughput invariant for failed runs.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        workload: WorkloadId,
        config: String,
        elapsed: f64,
        throughput: f64,
        success: bool,
        stdout: String,
        stderr: String,
        metrics: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            workload,
            config,
            timestamp: Utc::now().to_rfc3339(),
            elapsed,
            throughput: if success { throughput } else { 0.0 },
            success,
            stdout,
            stderr,
            metrics,
        }
    }
}

/// Full set of records from sweeping one workload.
#[derive(Debug, Clone, Serialize)]
pub struct Suite {
    /// Workload that was swept.
    pub workload: WorkloadId,
    /// Human-readable workload title.
    pub name: String,
    /// All records, in execution order.
    pub records: Vec<ResultRecord>,
    /// Aggregate statistics over `records`.
    pub statistics: SuiteStatistics,
}

/// Sequential benchmark driver.
///
/// Runs one child process at a time; there is deliberately no parallelism at
/// this level, the concurrency under test lives inside the workloads.
#[derive(Debug, Clone)]
pub struct Harness {
    /// Repetitions per configuration.
    pub repetitions: usize,
    /// Pause between consecutive repetitions (not after the last).
    pub pause: Duration,
    /// Directory holding the workload binaries.
    pub bin_dir: PathBuf,
    /// Overrides the per-workload timeout from the registry when set.
    pub timeout_override: Option<Duration>,
    /// Console verbosity.
    pub level: LogLevel,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            pause: REPETITION_PAUSE,
            bin_dir: PathBuf::from("bin"),
            timeout_override: None,
            level: LogLevel::Normal,
        }
    }
}

impl Harness {
    /// Create a harness with the given repetition count.
    #[must_use]
    pub fn new(repetitions: usize) -> Self {
        Self { repetitions, ..Self::default() }
    }

    /// Set the binary directory.
    #[must_use]
    pub fn with_bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = dir.into();
        self
    }

    /// Override every workload's timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_override = Some(timeout);
        self
    }

    /// Set the pause between repetitions.
    #[must_use]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Set console verbosity.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn effective_timeout(&self, descriptor: &WorkloadDescriptor) -> Duration {
        self.timeout_override.unwrap_or(descriptor.timeout)
    }

    /// Verify the workload binary exists and is runnable.
    ///
    /// Distinct from execution failure: this aborts the whole suite before
    /// any repetition is attempted.
    pub fn check_executable(&self, id: WorkloadId) -> Result<PathBuf> {
        let path = self.bin_dir.join(id.descriptor().executable);
        let unavailable = || MedirError::ExecutableUnavailable { path: path.clone() };

        let meta = std::fs::metadata(&path).map_err(|_| unavailable())?;
        if !meta.is_file() {
            return Err(unavailable());
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if meta.permissions().mode() & 0o111 == 0 {
                return Err(unavailable());
            }
        }
        Ok(path)
    }

    /// Execute one repetition of `params` and record the outcome.
    pub fn run_once(&self, params: &ParameterSet) -> Result<ResultRecord> {
        let id = params.workload();
        let descriptor = id.descriptor();
        let path = self.bin_dir.join(descriptor.executable);
        let args = params.args();
        let timeout = self.effective_timeout(descriptor);

        log(
            self.level,
            LogLevel::Verbose,
            &format!("Ejecutando: {} {}", path.display(), args.join(" ")),
        );

        let record = match runner::run(&path, &args, timeout)? {
            RunOutcome::Completed { elapsed, exit_success, stdout, stderr } => {
                let elapsed_secs = elapsed.as_secs_f64();
                let extraction = extract::extract(id, &stdout, &stderr);
                for note in &extraction.diagnostics {
                    log(self.level, LogLevel::Verbose, &format!("  [parse] {note}"));
                }
                let throughput = params.throughput(elapsed_secs);
                ResultRecord::new(
                    id,
                    params.label(),
                    elapsed_secs,
                    throughput,
                    exit_success,
                    stdout,
                    stderr,
                    extraction.metrics,
                )
            }
            RunOutcome::TimedOut { timeout } => {
                log(
                    self.level,
                    LogLevel::Normal,
                    &format!("[WARN] Timeout después de {}s", timeout.as_secs()),
                );
                ResultRecord::new(
                    id,
                    params.label(),
                    timeout.as_secs_f64(),
                    0.0,
                    false,
                    String::new(),
                    "Timeout expired".to_string(),
                    BTreeMap::new(),
                )
            }
        };

        if record.success {
            log(
                self.level,
                LogLevel::Normal,
                &format!(
                    "  completado en {:.3}s (throughput: {:.2} ops/s)",
                    record.elapsed, record.throughput
                ),
            );
        } else if !record.stderr.contains("Timeout") {
            log(self.level, LogLevel::Normal, "[WARN] El workload terminó con fallo");
        }

        Ok(record)
    }

    /// Run one configuration `repetitions` times, pausing between reps.
    pub fn run_config(&self, params: &ParameterSet) -> Result<Vec<ResultRecord>> {
        let mut records = Vec::with_capacity(self.repetitions);
        for rep in 0..self.repetitions {
            log(
                self.level,
                LogLevel::Verbose,
                &format!("Repetición {}/{}", rep + 1, self.repetitions),
            );
            records.push(self.run_once(params)?);
            if rep + 1 < self.repetitions {
                std::thread::sleep(self.pause);
            }
        }
        Ok(records)
    }

    /// Sweep every parameter set of one workload.
    pub fn run_suite(&self, id: WorkloadId) -> Result<Suite> {
        let descriptor = id.descriptor();
        self.check_executable(id)?;

        log(
            self.level,
            LogLevel::Normal,
            &format!("Iniciando suite de benchmarks: {}", descriptor.name),
        );

        let mut records = Vec::new();
        for params in &descriptor.params {
            log(self.level, LogLevel::Normal, &format!("Configuración: {}", params.label()));
            let config_records = self.run_config(params)?;

            let config_stats = stats::aggregate(&config_records);
            if let Some(time) = config_stats.time_stats {
                log(
                    self.level,
                    LogLevel::Normal,
                    &format!(
                        "  config completada - tiempo promedio: {:.3}s ± {:.3}s",
                        time.mean, time.stdev
                    ),
                );
            }
            records.extend(config_records);
        }

        let statistics = stats::aggregate(&records);
        log(
            self.level,
            LogLevel::Normal,
            &format!("Suite {} completada con {} resultados", descriptor.name, records.len()),
        );

        Ok(Suite { workload: id, name: descriptor.name.to_string(), records, statistics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_record_has_zero_throughput() {
        let record = ResultRecord::new(
            WorkloadId::Counter,
            "threads=4_iterations=100000".to_string(),
            1.2,
            333_333.0,
            false,
            String::new(),
            String::new(),
            BTreeMap::new(),
        );
        assert_eq!(record.throughput, 0.0);
    }

    #[test]
    fn test_successful_record_keeps_throughput() {
        let record = ResultRecord::new(
            WorkloadId::Pipeline,
            "ticks=500".to_string(),
            2.0,
            250.0,
            true,
            String::new(),
            String::new(),
            BTreeMap::new(),
        );
        assert_eq!(record.throughput, 250.0);
    }

    #[test]
    fn test_missing_executable_fails_before_any_run() {
        let harness = Harness::new(3).with_bin_dir("/nonexistent/medir-bin");
        let err = harness.run_suite(WorkloadId::Counter).unwrap_err();
        assert!(matches!(err, MedirError::ExecutableUnavailable { .. }));
    }

    #[test]
    fn test_harness_defaults() {
        let harness = Harness::default();
        assert_eq!(harness.repetitions, DEFAULT_REPETITIONS);
        assert_eq!(harness.pause, REPETITION_PAUSE);
        assert_eq!(harness.bin_dir, PathBuf::from("bin"));
        assert!(harness.timeout_override.is_none());
    }
}
