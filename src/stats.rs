//! Statistical rollup of benchmark results.
//!
//! All numeric aggregates are computed strictly over successful runs; the
//! success rate is the only figure that sees failed records. An empty
//! successful subset degrades to counts-only statistics so nothing downstream
//! ever divides by zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::suite::ResultRecord;

/// Five-number summary over one sample of f64 values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n-1 denominator), defined as 0 for n=1.
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleStats {
    /// Compute the summary; `None` for an empty sample.
    #[must_use]
    pub fn from_sample(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            f64::midpoint(sorted[mid - 1], sorted[mid])
        } else {
            sorted[mid]
        };

        let stdev = if values.len() > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Some(Self { mean, median, stdev, min: sorted[0], max: sorted[sorted.len() - 1] })
    }
}

/// Aggregate statistics for a collection of result records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteStatistics {
    /// Successful / total, in [0, 1]; 0 for an empty collection.
    pub success_rate: f64,
    pub total_runs: usize,
    pub successful_runs: usize,
    /// Elapsed-time summary over successful runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_stats: Option<SampleStats>,
    /// Throughput summary over successful runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput_stats: Option<SampleStats>,
}

/// Reduce a collection of records into suite statistics.
#[must_use]
pub fn aggregate(records: &[ResultRecord]) -> SuiteStatistics {
    let successful: Vec<&ResultRecord> = records.iter().filter(|r| r.success).collect();

    if successful.is_empty() {
        return SuiteStatistics {
            success_rate: 0.0,
            total_runs: records.len(),
            successful_runs: 0,
            time_stats: None,
            throughput_stats: None,
        };
    }

    let times: Vec<f64> = successful.iter().map(|r| r.elapsed).collect();
    let throughputs: Vec<f64> = successful.iter().map(|r| r.throughput).collect();

    SuiteStatistics {
        success_rate: successful.len() as f64 / records.len() as f64,
        total_runs: records.len(),
        successful_runs: successful.len(),
        time_stats: SampleStats::from_sample(&times),
        throughput_stats: SampleStats::from_sample(&throughputs),
    }
}

/// Group records by configuration label and aggregate each group.
///
/// Used for reporting only; per-configuration statistics are never persisted
/// as a first-class entity.
#[must_use]
pub fn aggregate_by_config(records: &[ResultRecord]) -> BTreeMap<String, SuiteStatistics> {
    let mut groups: BTreeMap<String, Vec<ResultRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.config.clone()).or_default().push(record.clone());
    }
    groups.into_iter().map(|(label, group)| (label, aggregate(&group))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WorkloadId;

    fn record(elapsed: f64, throughput: f64, success: bool) -> ResultRecord {
        let mut r = ResultRecord::new(
            WorkloadId::Counter,
            "threads=4_iterations=100000".to_string(),
            elapsed,
            if success { throughput } else { 0.0 },
            success,
            String::new(),
            String::new(),
            BTreeMap::new(),
        );
        r.timestamp = "2025-09-01T00:00:00+00:00".to_string();
        r
    }

    #[test]
    fn test_empty_collection() {
        let stats = aggregate(&[]);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.total_runs, 0);
        assert!(stats.time_stats.is_none());
    }

    #[test]
    fn test_all_failed_degrades_to_counts() {
        let records = vec![record(1.0, 100.0, false), record(2.0, 200.0, false)];
        let stats = aggregate(&records);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.total_runs, 2);
        assert_eq!(stats.successful_runs, 0);
        assert!(stats.time_stats.is_none());
        assert!(stats.throughput_stats.is_none());
    }

    #[test]
    fn test_single_success_has_zero_stdev() {
        let records = vec![record(1.5, 300.0, true)];
        let stats = aggregate(&records);
        let time = stats.time_stats.unwrap();
        assert_eq!(time.stdev, 0.0);
        assert_eq!(time.mean, 1.5);
        assert_eq!(time.median, 1.5);
        assert_eq!(stats.throughput_stats.unwrap().stdev, 0.0);
    }

    #[test]
    fn test_mixed_runs_exclude_failures_from_aggregates() {
        let records = vec![
            record(1.0, 100.0, true),
            record(1.1, 110.0, true),
            record(0.9, 90.0, true),
            record(1.0, 100.0, true),
            record(15.0, 0.0, false),
        ];
        let stats = aggregate(&records);
        assert!((stats.success_rate - 0.8).abs() < 1e-9);
        assert_eq!(stats.total_runs, 5);
        let time = stats.time_stats.unwrap();
        // Mean over the four successful values only; the 15s failure is out.
        assert!((time.mean - 1.0).abs() < 1e-9);
        assert_eq!(time.min, 0.9);
        assert_eq!(time.max, 1.1);
    }

    #[test]
    fn test_median_even_sample() {
        let stats = SampleStats::from_sample(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((stats.median - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_group_by_config() {
        let mut fast = record(1.0, 100.0, true);
        fast.config = "threads=1_iterations=100000".to_string();
        let slow = record(2.0, 50.0, true);

        let grouped = aggregate_by_config(&[fast, slow.clone(), slow]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["threads=1_iterations=100000"].total_runs, 1);
        assert_eq!(grouped["threads=4_iterations=100000"].total_runs, 2);
    }
}
