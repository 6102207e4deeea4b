//! Static catalog of benchmarkable workloads.
//!
//! The registry is an immutable lookup table built once at startup. Each
//! entry describes one workload binary: where it lives, which parameter
//! grids to sweep, how long a single run may take, and which metrics its
//! output is expected to yield.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MedirError;
use crate::params::ParameterSet;

/// Identifier for one workload under benchmark.
///
/// Serialized forms match the executable stems so logs, snapshots and the
/// CLI all speak the same names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkloadId {
    /// Contended counter (race conditions, mutex, sharded, atomic).
    #[serde(rename = "p1_counter")]
    Counter,
    /// Bounded producer/consumer ring buffer.
    #[serde(rename = "p2_ring")]
    RingBuffer,
    /// Reader/writer hash map.
    #[serde(rename = "p3_rw")]
    ReaderWriter,
    /// Deadlock avoidance with ordered lock acquisition.
    #[serde(rename = "p4_deadlock")]
    Deadlock,
    /// Staged pipeline with barriers.
    #[serde(rename = "p5_pipeline")]
    Pipeline,
}

impl WorkloadId {
    /// All registered workloads, in sweep order.
    pub const ALL: [WorkloadId; 5] = [
        WorkloadId::Counter,
        WorkloadId::RingBuffer,
        WorkloadId::ReaderWriter,
        WorkloadId::Deadlock,
        WorkloadId::Pipeline,
    ];

    /// Executable stem, also used as the identifier in logs and the CLI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Counter => "p1_counter",
            Self::RingBuffer => "p2_ring",
            Self::ReaderWriter => "p3_rw",
            Self::Deadlock => "p4_deadlock",
            Self::Pipeline => "p5_pipeline",
        }
    }

    /// Descriptor for this workload.
    #[must_use]
    pub fn descriptor(&self) -> &'static WorkloadDescriptor {
        &REGISTRY[*self as usize]
    }
}

impl fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadId {
    type Err = MedirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p1_counter" => Ok(Self::Counter),
            "p2_ring" => Ok(Self::RingBuffer),
            "p3_rw" => Ok(Self::ReaderWriter),
            "p4_deadlock" => Ok(Self::Deadlock),
            "p5_pipeline" => Ok(Self::Pipeline),
            other => Err(MedirError::UnknownWorkload { id: other.to_string() }),
        }
    }
}

/// Static description of one workload: read-only configuration, loaded at
/// startup and never mutated.
#[derive(Debug, Clone)]
pub struct WorkloadDescriptor {
    /// Workload identifier.
    pub id: WorkloadId,
    /// Name of the binary under the bin directory.
    pub executable: &'static str,
    /// Human-readable title for reports.
    pub name: &'static str,
    /// Parameter grids to sweep, in execution order.
    pub params: Vec<ParameterSet>,
    /// Per-run timeout.
    pub timeout: Duration,
    /// Metric names this workload's output is expected to yield.
    pub metrics: &'static [&'static str],
}

static REGISTRY: LazyLock<[WorkloadDescriptor; 5]> = LazyLock::new(|| {
    [
        WorkloadDescriptor {
            id: WorkloadId::Counter,
            executable: "p1_counter",
            name: "Race Conditions en Contador",
            params: vec![
                ParameterSet::Counter { threads: 1, iterations: 100_000 },
                ParameterSet::Counter { threads: 2, iterations: 100_000 },
                ParameterSet::Counter { threads: 4, iterations: 100_000 },
                ParameterSet::Counter { threads: 8, iterations: 100_000 },
            ],
            timeout: Duration::from_secs(15),
            metrics: &["time", "throughput", "correctness"],
        },
        WorkloadDescriptor {
            id: WorkloadId::RingBuffer,
            executable: "p2_ring",
            name: "Búfer Circular Productor-Consumidor",
            params: vec![
                ParameterSet::Ring { producers: 1, consumers: 1, items: 50_000 },
                ParameterSet::Ring { producers: 2, consumers: 1, items: 50_000 },
                ParameterSet::Ring { producers: 1, consumers: 2, items: 50_000 },
                ParameterSet::Ring { producers: 2, consumers: 2, items: 50_000 },
            ],
            timeout: Duration::from_secs(20),
            metrics: &["time", "throughput", "efficiency"],
        },
        WorkloadDescriptor {
            id: WorkloadId::ReaderWriter,
            executable: "p3_rw",
            name: "Lectores/Escritores HashMap",
            params: vec![
                ParameterSet::ReaderWriter { threads: 2, operations: 50_000 },
                ParameterSet::ReaderWriter { threads: 4, operations: 50_000 },
                ParameterSet::ReaderWriter { threads: 8, operations: 50_000 },
            ],
            timeout: Duration::from_secs(25),
            metrics: &["time", "throughput", "read_write_ratio"],
        },
        WorkloadDescriptor {
            id: WorkloadId::Deadlock,
            executable: "p4_deadlock",
            name: "Prevención de Deadlock",
            params: vec![
                ParameterSet::Deadlock { threads: 2, skip_demo: 1 },
                ParameterSet::Deadlock { threads: 4, skip_demo: 1 },
                ParameterSet::Deadlock { threads: 8, skip_demo: 1 },
            ],
            timeout: Duration::from_secs(20),
            metrics: &["time", "success_rate", "retry_count"],
        },
        WorkloadDescriptor {
            id: WorkloadId::Pipeline,
            executable: "p5_pipeline",
            name: "Pipeline con Barreras",
            params: vec![
                ParameterSet::Pipeline { ticks: 500 },
                ParameterSet::Pipeline { ticks: 1000 },
                ParameterSet::Pipeline { ticks: 2000 },
            ],
            timeout: Duration::from_secs(30),
            metrics: &["time", "throughput", "latency", "efficiency"],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_workloads_have_descriptors() {
        for id in WorkloadId::ALL {
            let desc = id.descriptor();
            assert_eq!(desc.id, id);
            assert_eq!(desc.executable, id.as_str());
            assert!(!desc.params.is_empty());
            assert!(desc.timeout > Duration::ZERO);
        }
    }

    #[test]
    fn test_roundtrip_from_str() {
        for id in WorkloadId::ALL {
            assert_eq!(id.as_str().parse::<WorkloadId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_id_is_configuration_error() {
        let err = "p9_quantum".parse::<WorkloadId>().unwrap_err();
        assert!(matches!(err, MedirError::UnknownWorkload { .. }));
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_parameter_sets_belong_to_their_workload() {
        for id in WorkloadId::ALL {
            for params in &id.descriptor().params {
                assert_eq!(params.workload(), id);
            }
        }
    }
}
