//! Analyze command implementation
//!
//! Reads an existing results log back, regroups it per workload and prints a
//! console summary: success counts, mean times, mean and best throughput,
//! and the top configurations overall.

use std::collections::BTreeMap;

use crate::cli::logging::{log, LogLevel};
use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::persist;
use crate::registry::WorkloadId;
use crate::stats;
use crate::suite::ResultRecord;

pub fn run_analyze(args: &AnalyzeArgs, level: LogLevel) -> Result<()> {
    let records = persist::read_results(&args.results)?;

    log(level, LogLevel::Normal, &format!("Analizando resultados desde {}", args.results.display()));
    log(level, LogLevel::Normal, "\n=== RESUMEN GENERAL ===");
    let successful = records.iter().filter(|r| r.success).count();
    log(level, LogLevel::Normal, &format!("Total de experimentos: {}", records.len()));
    if !records.is_empty() {
        log(
            level,
            LogLevel::Normal,
            &format!("Tasa de éxito: {:.1}%", successful as f64 / records.len() as f64 * 100.0),
        );
    }

    let mut by_workload: BTreeMap<WorkloadId, Vec<ResultRecord>> = BTreeMap::new();
    for record in &records {
        by_workload.entry(record.workload).or_default().push(record.clone());
    }

    log(level, LogLevel::Normal, "\n=== ANÁLISIS POR WORKLOAD ===");
    for (id, group) in &by_workload {
        let summary = stats::aggregate(group);
        log(level, LogLevel::Normal, &format!("\n{id}:"));
        log(
            level,
            LogLevel::Normal,
            &format!(
                "  Éxito: {}/{} ({:.1}%)",
                summary.successful_runs,
                summary.total_runs,
                summary.success_rate * 100.0
            ),
        );
        if let (Some(time), Some(tp)) = (summary.time_stats, summary.throughput_stats) {
            log(
                level,
                LogLevel::Normal,
                &format!("  Tiempo promedio: {:.3}s ± {:.3}s", time.mean, time.stdev),
            );
            log(level, LogLevel::Normal, &format!("  Throughput promedio: {:.2} ops/s", tp.mean));
            log(
                level,
                LogLevel::Normal,
                &format!("  Rango throughput: {:.2} - {:.2}", tp.min, tp.max),
            );
        }

        // Per-configuration breakdown, for the curious.
        for (label, config_stats) in stats::aggregate_by_config(group) {
            if let Some(time) = config_stats.time_stats {
                log(
                    level,
                    LogLevel::Verbose,
                    &format!(
                        "    {label}: {}/{} ok, {:.3}s ± {:.3}s",
                        config_stats.successful_runs,
                        config_stats.total_runs,
                        time.mean,
                        time.stdev
                    ),
                );
            }
        }
    }

    // Top configurations across the whole log, by throughput.
    let mut top: Vec<&ResultRecord> = records.iter().filter(|r| r.success).collect();
    top.sort_by(|a, b| {
        b.throughput.partial_cmp(&a.throughput).unwrap_or(std::cmp::Ordering::Equal)
    });
    if !top.is_empty() {
        log(level, LogLevel::Normal, "\n=== TOP CONFIGURACIONES (THROUGHPUT) ===");
        for record in top.iter().take(5) {
            log(
                level,
                LogLevel::Normal,
                &format!("  {} ({}): {:.2} ops/s", record.workload, record.config, record.throughput),
            );
        }
    }

    Ok(())
}
