//! Pattern-based metric extraction from workload output.
//!
//! The workload binaries print human-oriented progress text in Spanish; the
//! harness imposes no format contract beyond the patterns here. Absent
//! patterns simply yield fewer metrics, and malformed values degrade to
//! diagnostics rather than errors: extraction never fails a run.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::registry::WorkloadId;

/// Best-effort extraction result: whatever metrics parsed cleanly plus
/// non-fatal diagnostics for anything that did not.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Metric name → numeric value.
    pub metrics: BTreeMap<String, f64>,
    /// Non-fatal parse notes, for Verbose logging only.
    pub diagnostics: Vec<String>,
}

/// Generic patterns applied to every workload's output, in order.
///
/// Workloads print running totals, so when a pattern matches more than once
/// the last occurrence is taken: final state wins.
static GENERIC_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("time", r"Tiempo[:\s]+([0-9.]+)"),
        ("throughput", r"Throughput[:\s]+([0-9.]+)"),
        ("operations", r"operaciones[:\s]+([0-9]+)"),
        ("items_produced", r"producidos[:\s]+([0-9]+)"),
        ("items_consumed", r"consumidos[:\s]+([0-9]+)"),
        ("speedup", r"Speedup[:\s]+([0-9.]+)"),
        ("latency", r"latencia[:\s]+([0-9.]+)"),
        ("efficiency", r"eficiencia[:\s]+([0-9.]+)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, case_insensitive(pattern)))
    .collect()
});

static COUNTER_RESULT: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"Resultado:\s*(\d+).*esperado:\s*(\d+)"));
static RING_PRODUCED: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"producidos:\s*(\d+)"));
static RING_CONSUMED: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"consumidos:\s*(\d+)"));
static RW_READS: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"R:\s*(\d+)"));
static RW_WRITES: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"W:\s*(\d+)"));
static PIPE_FILTERED: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"filtrados:\s*(\d+)"));
static PIPE_GENERATED: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"generados:\s*(\d+)"));

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern).case_insensitive(true).build().expect("invalid metric pattern")
}

/// Extract metrics from the captured streams of one run.
///
/// Pure function of its inputs: identical text always yields identical
/// metrics.
#[must_use]
pub fn extract(id: WorkloadId, stdout: &str, stderr: &str) -> Extraction {
    let combined = format!("{stdout}\n{stderr}");
    let mut out = Extraction::default();

    for (name, pattern) in GENERIC_PATTERNS.iter() {
        // Last match wins: later progress lines override earlier ones.
        let Some(caps) = pattern.captures_iter(&combined).last() else { continue };
        let raw = &caps[1];
        match raw.parse::<f64>() {
            Ok(value) => {
                out.metrics.insert((*name).to_string(), value);
            }
            Err(_) => {
                out.diagnostics.push(format!("{name}: '{raw}' is not numeric, dropped"));
            }
        }
    }

    derive_workload_metrics(id, &combined, &mut out);
    out
}

/// Workload-specific derived metrics, computed from raw counters.
fn derive_workload_metrics(id: WorkloadId, text: &str, out: &mut Extraction) {
    match id {
        WorkloadId::Counter => {
            if let Some((actual, expected)) = capture_pair(&COUNTER_RESULT, text, out) {
                if (actual - expected).abs() < f64::EPSILON {
                    out.metrics.insert("correctness".to_string(), 1.0);
                } else if expected > 0.0 {
                    out.metrics.insert("correctness".to_string(), actual / expected);
                }
            }
        }
        WorkloadId::RingBuffer => {
            let produced = capture_last(&RING_PRODUCED, text, out);
            let consumed = capture_last(&RING_CONSUMED, text, out);
            if let (Some(produced), Some(consumed)) = (produced, consumed) {
                if produced > 0.0 {
                    out.metrics.insert("efficiency".to_string(), consumed / produced);
                }
            }
        }
        WorkloadId::ReaderWriter => {
            let reads = capture_last(&RW_READS, text, out);
            let writes = capture_last(&RW_WRITES, text, out);
            if let (Some(reads), Some(writes)) = (reads, writes) {
                let total = reads + writes;
                if total > 0.0 {
                    out.metrics.insert("read_ratio".to_string(), reads / total);
                    out.metrics.insert("write_ratio".to_string(), writes / total);
                }
            }
        }
        WorkloadId::Pipeline => {
            let filtered = capture_last(&PIPE_FILTERED, text, out);
            let generated = capture_last(&PIPE_GENERATED, text, out);
            if let (Some(filtered), Some(generated)) = (filtered, generated) {
                if generated > 0.0 {
                    out.metrics.insert("filter_efficiency".to_string(), filtered / generated);
                }
            }
        }
        // Deadlock avoidance prints no counters worth deriving from.
        WorkloadId::Deadlock => {}
    }
}

fn capture_last(pattern: &Regex, text: &str, out: &mut Extraction) -> Option<f64> {
    let caps = pattern.captures_iter(text).last()?;
    parse_capture(&caps[1], out)
}

fn capture_pair(pattern: &Regex, text: &str, out: &mut Extraction) -> Option<(f64, f64)> {
    let caps = pattern.captures_iter(text).last()?;
    let a = parse_capture(&caps[1], out)?;
    let b = parse_capture(&caps[2], out)?;
    Some((a, b))
}

fn parse_capture(raw: &str, out: &mut Extraction) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            out.diagnostics.push(format!("derived metric: '{raw}' is not numeric, skipped"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_patterns() {
        let stdout = "Tiempo: 1.234 segundos\nThroughput: 81000.50 ops/seg\n";
        let out = extract(WorkloadId::Counter, stdout, "");
        assert_eq!(out.metrics["time"], 1.234);
        assert_eq!(out.metrics["throughput"], 81000.50);
    }

    #[test]
    fn test_last_match_wins() {
        let stdout = "Tiempo: 1.0\nTiempo: 2.5\n";
        let out = extract(WorkloadId::Counter, stdout, "");
        assert_eq!(out.metrics["time"], 2.5);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let stdout = "Tiempo: 1.5\nThroughput: 300.0\nResultado: 10 (esperado: 10)\n";
        let a = extract(WorkloadId::Counter, stdout, "");
        let b = extract(WorkloadId::Counter, stdout, "");
        assert_eq!(a.metrics, b.metrics);
    }

    #[test]
    fn test_stderr_is_included() {
        let out = extract(WorkloadId::Counter, "", "Tiempo: 0.75\n");
        assert_eq!(out.metrics["time"], 0.75);
    }

    #[test]
    fn test_counter_correctness_exact() {
        let stdout = "Resultado: 400000 (esperado: 400000)\n";
        let out = extract(WorkloadId::Counter, stdout, "");
        assert_eq!(out.metrics["correctness"], 1.0);
    }

    #[test]
    fn test_counter_correctness_lost_updates() {
        let stdout = "Resultado: 300000 (esperado: 400000)\n";
        let out = extract(WorkloadId::Counter, stdout, "");
        assert!((out.metrics["correctness"] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_ring_efficiency() {
        let stdout = "Elementos producidos: 50000\nElementos consumidos: 49000\n";
        let out = extract(WorkloadId::RingBuffer, stdout, "");
        assert!((out.metrics["efficiency"] - 0.98).abs() < 1e-9);
    }

    #[test]
    fn test_rw_ratios_sum_to_one() {
        let stdout = "Operaciones totales: 50000 (R: 45000, W: 5000)\n";
        let out = extract(WorkloadId::ReaderWriter, stdout, "");
        let read = out.metrics["read_ratio"];
        let write = out.metrics["write_ratio"];
        assert!((read - 0.9).abs() < 1e-9);
        assert!((read + write - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_filter_efficiency() {
        let stdout = "Items generados: 1000\nItems filtrados: 250\n";
        let out = extract(WorkloadId::Pipeline, stdout, "");
        assert!((out.metrics["filter_efficiency"] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_output_yields_no_metrics() {
        let out = extract(WorkloadId::Pipeline, "", "");
        assert!(out.metrics.is_empty());
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_zero_produced_skips_efficiency() {
        let stdout = "producidos: 0\nconsumidos: 0\n";
        let out = extract(WorkloadId::RingBuffer, stdout, "");
        assert!(!out.metrics.contains_key("efficiency"));
    }
}
