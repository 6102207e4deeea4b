//! Benchmark harness for concurrency workload binaries.
//!
//! This crate provides tools for:
//! - Driving external workload programs across parameter grids with timeouts
//! - Extracting numeric metrics from their unstructured output
//! - Aggregating repeated runs into reproducible statistics
//! - Persisting results as an append-only CSV log plus a JSON snapshot
//!
//! The workloads themselves are opaque binaries (contended counters, ring
//! buffers, reader/writer maps, deadlock avoidance, staged pipelines); the
//! harness only measures wall-clock behavior and whatever counters they
//! print.

pub mod cli;
pub mod error;
pub mod extract;
pub mod params;
pub mod persist;
pub mod registry;
pub mod report;
pub mod runner;
pub mod stats;
pub mod suite;
mod throughput;

pub use error::{MedirError, Result};
pub use extract::{extract, Extraction};
pub use params::ParameterSet;
pub use persist::Snapshot;
pub use registry::{WorkloadDescriptor, WorkloadId};
pub use runner::RunOutcome;
pub use stats::{aggregate, aggregate_by_config, SampleStats, SuiteStatistics};
pub use suite::{Harness, ResultRecord, Suite};
