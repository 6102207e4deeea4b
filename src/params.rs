//! Typed workload parameters.
//!
//! Each workload takes a fixed-shape tuple of integers on its command line.
//! Modeling those shapes as enum variants makes argument serialization and
//! throughput formulas total: there is no runtime key-presence checking, an
//! exhaustive `match` covers every workload.

use serde::{Deserialize, Serialize};

use crate::error::{MedirError, Result};
use crate::registry::WorkloadId;

/// One concrete configuration for a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "workload")]
pub enum ParameterSet {
    /// Contended counter: `<threads> <iterations>`.
    Counter { threads: u32, iterations: u64 },
    /// Ring buffer: `<producers> <consumers> <items>`.
    Ring { producers: u32, consumers: u32, items: u64 },
    /// Reader/writer map: `<threads> <operations>`.
    ReaderWriter { threads: u32, operations: u64 },
    /// Deadlock avoidance: `<threads> <skip_demo>`.
    Deadlock { threads: u32, skip_demo: u32 },
    /// Staged pipeline: `<ticks>`.
    Pipeline { ticks: u64 },
}

impl ParameterSet {
    /// Workload this parameter set belongs to.
    #[must_use]
    pub const fn workload(&self) -> WorkloadId {
        match self {
            Self::Counter { .. } => WorkloadId::Counter,
            Self::Ring { .. } => WorkloadId::RingBuffer,
            Self::ReaderWriter { .. } => WorkloadId::ReaderWriter,
            Self::Deadlock { .. } => WorkloadId::Deadlock,
            Self::Pipeline { .. } => WorkloadId::Pipeline,
        }
    }

    /// Positional argument vector, in the order the binary expects.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match *self {
            Self::Counter { threads, iterations } => {
                vec![threads.to_string(), iterations.to_string()]
            }
            Self::Ring { producers, consumers, items } => {
                vec![producers.to_string(), consumers.to_string(), items.to_string()]
            }
            Self::ReaderWriter { threads, operations } => {
                vec![threads.to_string(), operations.to_string()]
            }
            Self::Deadlock { threads, skip_demo } => {
                vec![threads.to_string(), skip_demo.to_string()]
            }
            Self::Pipeline { ticks } => vec![ticks.to_string()],
        }
    }

    /// Configuration label used in the results log, `key=value` pairs joined
    /// with underscores.
    #[must_use]
    pub fn label(&self) -> String {
        match *self {
            Self::Counter { threads, iterations } => {
                format!("threads={threads}_iterations={iterations}")
            }
            Self::Ring { producers, consumers, items } => {
                format!("producers={producers}_consumers={consumers}_items={items}")
            }
            Self::ReaderWriter { threads, operations } => {
                format!("threads={threads}_operations={operations}")
            }
            Self::Deadlock { threads, skip_demo } => {
                format!("threads={threads}_skip_demo={skip_demo}")
            }
            Self::Pipeline { ticks } => format!("ticks={ticks}"),
        }
    }

    /// Expected positional arguments for one workload, for error messages.
    #[must_use]
    pub const fn usage(id: WorkloadId) -> &'static str {
        match id {
            WorkloadId::Counter => "<threads> <iterations>",
            WorkloadId::RingBuffer => "<producers> <consumers> <items>",
            WorkloadId::ReaderWriter => "<threads> <operations>",
            WorkloadId::Deadlock => "<threads>",
            WorkloadId::Pipeline => "<ticks>",
        }
    }

    /// Parse an explicit parameter override from CLI positionals.
    ///
    /// Arity and integer parsing follow the workload's argument contract;
    /// `skip_demo` is always forced to 1 for deadlock runs so the interactive
    /// demonstration phase never blocks a benchmark.
    pub fn from_cli(id: WorkloadId, values: &[String]) -> Result<Self> {
        let invalid = |message: String| MedirError::InvalidParameters {
            workload: id.to_string(),
            message,
            expected: Self::usage(id),
        };
        let int = |v: &String| {
            v.parse::<u64>().map_err(|_| invalid(format!("'{v}' is not a positive integer")))
        };

        let arity = match id {
            WorkloadId::Counter | WorkloadId::ReaderWriter => 2,
            WorkloadId::RingBuffer => 3,
            WorkloadId::Deadlock | WorkloadId::Pipeline => 1,
        };
        if values.len() < arity {
            return Err(invalid(format!("expected {arity} values, got {}", values.len())));
        }

        Ok(match id {
            WorkloadId::Counter => Self::Counter {
                threads: int(&values[0])? as u32,
                iterations: int(&values[1])?,
            },
            WorkloadId::RingBuffer => Self::Ring {
                producers: int(&values[0])? as u32,
                consumers: int(&values[1])? as u32,
                items: int(&values[2])?,
            },
            WorkloadId::ReaderWriter => Self::ReaderWriter {
                threads: int(&values[0])? as u32,
                operations: int(&values[1])?,
            },
            WorkloadId::Deadlock => {
                Self::Deadlock { threads: int(&values[0])? as u32, skip_demo: 1 }
            }
            WorkloadId::Pipeline => Self::Pipeline { ticks: int(&values[0])? },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_positional_and_ordered() {
        let p = ParameterSet::Ring { producers: 2, consumers: 1, items: 50_000 };
        assert_eq!(p.args(), vec!["2", "1", "50000"]);

        let p = ParameterSet::Pipeline { ticks: 500 };
        assert_eq!(p.args(), vec!["500"]);
    }

    #[test]
    fn test_label_format() {
        let p = ParameterSet::Counter { threads: 4, iterations: 100_000 };
        assert_eq!(p.label(), "threads=4_iterations=100000");
    }

    #[test]
    fn test_from_cli_counter() {
        let vals = vec!["4".to_string(), "100000".to_string()];
        let p = ParameterSet::from_cli(WorkloadId::Counter, &vals).unwrap();
        assert_eq!(p, ParameterSet::Counter { threads: 4, iterations: 100_000 });
    }

    #[test]
    fn test_from_cli_deadlock_forces_skip_demo() {
        let vals = vec!["8".to_string()];
        let p = ParameterSet::from_cli(WorkloadId::Deadlock, &vals).unwrap();
        assert_eq!(p, ParameterSet::Deadlock { threads: 8, skip_demo: 1 });
    }

    #[test]
    fn test_from_cli_arity_error() {
        let vals = vec!["4".to_string()];
        let err = ParameterSet::from_cli(WorkloadId::Counter, &vals).unwrap_err();
        assert!(matches!(err, MedirError::InvalidParameters { .. }));
    }

    #[test]
    fn test_from_cli_rejects_non_numeric() {
        let vals = vec!["four".to_string(), "100000".to_string()];
        assert!(ParameterSet::from_cli(WorkloadId::Counter, &vals).is_err());
    }
}
