//! Error types with actionable diagnostics.
//!
//! Every variant carries enough context for the user to resolve the problem
//! without consulting external documentation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for medir operations.
pub type Result<T> = std::result::Result<T, MedirError>;

/// Errors that can occur while driving workload benchmarks.
#[derive(Error, Debug)]
pub enum MedirError {
    /// Unknown workload identifier.
    #[error("Unknown workload: {id}\n  → Valid workloads: p1_counter, p2_ring, p3_rw, p4_deadlock, p5_pipeline")]
    UnknownWorkload { id: String },

    /// Workload parameters could not be parsed from the command line.
    #[error("Invalid parameters for {workload}: {message}\n  → Expected: {expected}")]
    InvalidParameters { workload: String, message: String, expected: &'static str },

    /// Workload binary missing or not runnable.
    #[error("Executable not available: {path}\n  → Run 'make' to build the workload binaries first")]
    ExecutableUnavailable { path: PathBuf },

    /// The child process could not be spawned at all.
    #[error("Failed to spawn {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure writing the results log or the analysis snapshot.
    #[error("Persistence error: {context}\n  Cause: {source}")]
    Persistence {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Results file could not be read back for analysis.
    #[error("Cannot read results from {path}: {message}\n  → Run a benchmark first to produce the log")]
    Analysis { path: PathBuf, message: String },

    /// Operation cancelled by the operator.
    #[error("Benchmark interrupted by user")]
    Interrupted,
}

impl MedirError {
    /// Create a persistence error with context.
    pub fn persistence(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Persistence { context: context.into(), source }
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownWorkload { .. }
                | Self::InvalidParameters { .. }
                | Self::ExecutableUnavailable { .. }
                | Self::Analysis { .. }
                | Self::Interrupted
        )
    }

    /// Error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownWorkload { .. } => "E001",
            Self::InvalidParameters { .. } => "E002",
            Self::ExecutableUnavailable { .. } => "E010",
            Self::Spawn { .. } => "E011",
            Self::Persistence { .. } => "E020",
            Self::Analysis { .. } => "E021",
            Self::Interrupted => "E030",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = vec![
            MedirError::UnknownWorkload { id: "x".into() },
            MedirError::InvalidParameters {
                workload: "p1_counter".into(),
                message: "".into(),
                expected: "<threads> <iterations>",
            },
            MedirError::ExecutableUnavailable { path: "bin/p1_counter".into() },
            MedirError::Spawn {
                path: "bin/p1_counter".into(),
                source: std::io::Error::other("boom"),
            },
            MedirError::persistence("write csv", std::io::Error::other("disk full")),
            MedirError::Analysis { path: "data/results.csv".into(), message: "".into() },
            MedirError::Interrupted,
        ];

        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_unknown_workload_is_actionable() {
        let err = MedirError::UnknownWorkload { id: "p9_fake".into() };
        let msg = err.to_string();
        assert!(msg.contains("p9_fake"));
        assert!(msg.contains("p1_counter"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_spawn_is_not_user_error() {
        let err = MedirError::Spawn {
            path: "bin/p1_counter".into(),
            source: std::io::Error::other("fork failed"),
        };
        assert!(!err.is_user_error());
    }
}
