//! Workload-specific throughput derivation.
//!
//! Throughput is total work divided by wall-clock time, where "total work"
//! comes from the parameter set rather than from extracted output. The
//! deadlock workload has no meaningful operation count; `1/elapsed` is kept
//! as a placeholder signal so plots stay total.

use crate::params::ParameterSet;

impl ParameterSet {
    /// Operations per second for a run that took `elapsed_secs`.
    ///
    /// Always finite and non-negative; exactly `0.0` when `elapsed_secs`
    /// is zero or negative.
    #[must_use]
    pub fn throughput(&self, elapsed_secs: f64) -> f64 {
        if elapsed_secs <= 0.0 {
            return 0.0;
        }
        match *self {
            Self::Counter { threads, iterations } => {
                (f64::from(threads) * iterations as f64) / elapsed_secs
            }
            Self::Ring { producers, items, .. } => {
                (f64::from(producers) * items as f64) / elapsed_secs
            }
            Self::ReaderWriter { threads, operations } => {
                (f64::from(threads) * operations as f64) / elapsed_secs
            }
            Self::Deadlock { .. } => 1.0 / elapsed_secs,
            Self::Pipeline { ticks } => ticks as f64 / elapsed_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_total_work() {
        let p = ParameterSet::Counter { threads: 4, iterations: 100_000 };
        assert!((p.throughput(2.0) - 200_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_counts_producer_side_only() {
        let p = ParameterSet::Ring { producers: 2, consumers: 8, items: 50_000 };
        assert!((p.throughput(1.0) - 100_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_reader_writer() {
        let p = ParameterSet::ReaderWriter { threads: 8, operations: 50_000 };
        assert!((p.throughput(4.0) - 100_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_deadlock_placeholder_signal() {
        let p = ParameterSet::Deadlock { threads: 4, skip_demo: 1 };
        assert!((p.throughput(0.5) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_ticks() {
        let p = ParameterSet::Pipeline { ticks: 2000 };
        assert!((p.throughput(4.0) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_is_zero() {
        for p in [
            ParameterSet::Counter { threads: 4, iterations: 100_000 },
            ParameterSet::Ring { producers: 1, consumers: 1, items: 50_000 },
            ParameterSet::ReaderWriter { threads: 2, operations: 50_000 },
            ParameterSet::Deadlock { threads: 2, skip_demo: 1 },
            ParameterSet::Pipeline { ticks: 500 },
        ] {
            assert_eq!(p.throughput(0.0), 0.0);
            assert_eq!(p.throughput(-1.0), 0.0);
        }
    }
}
