//! Static HTML performance report.
//!
//! Renders a single self-contained summary page from the analysis snapshot.
//! Charts are produced by external tooling; the page references them by
//! conventional paths and hides anything missing.

use std::path::Path;

use chrono::Utc;

use crate::error::{MedirError, Result};
use crate::persist::Snapshot;

/// File name of the generated report inside the data directory.
pub const REPORT_FILE: &str = "performance_report.html";

/// Render the report into `data_dir` from an already-loaded snapshot.
pub fn render(data_dir: &Path, snapshot: &Snapshot) -> Result<std::path::PathBuf> {
    let mut suite_rows = String::new();
    for (id, suite) in &snapshot.suites {
        let (rate, mean_time, mean_tp) = match (&suite.statistics.time_stats, &suite.statistics.throughput_stats)
        {
            (Some(time), Some(tp)) => (
                format!("{:.1}%", suite.statistics.success_rate * 100.0),
                format!("{:.3}s ± {:.3}s", time.mean, time.stdev),
                format!("{:.2} ops/s", tp.mean),
            ),
            _ => ("0.0%".to_string(), "-".to_string(), "-".to_string()),
        };
        suite_rows.push_str(&format!(
            "      <tr><td>{id}</td><td>{}</td><td>{}</td><td>{rate}</td><td>{mean_time}</td><td>{mean_tp}</td></tr>\n",
            escape(&suite.name),
            suite.results_count,
        ));
    }
    if suite_rows.is_empty() {
        suite_rows.push_str("      <tr><td colspan=\"6\">Sin resultados</td></tr>\n");
    }

    let total_results: usize = snapshot.suites.values().map(|s| s.results_count).sum();
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8">
  <title>medir - Reporte de Rendimiento</title>
  <style>
    body {{ font-family: sans-serif; margin: 40px; background: #f5f5f5; }}
    .container {{ max-width: 1100px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; }}
    h1, h2 {{ color: #2c3e50; }}
    table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
    th, td {{ padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }}
    th {{ background: #f1f1f1; }}
    img {{ max-width: 100%; }}
    .meta {{ color: #666; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>Reporte de Rendimiento</h1>
    <p class="meta">Generado: {generated} · Repeticiones: {repetitions} · Resultados: {total_results}</p>
    <h2>Resumen por Workload</h2>
    <table>
      <tr><th>Workload</th><th>Nombre</th><th>Runs</th><th>Éxito</th><th>Tiempo</th><th>Throughput</th></tr>
{suite_rows}    </table>
    <h2>Gráficas</h2>
    <img src="plots/practices_comparison.png" alt="Comparación entre workloads" onerror="this.style.display='none'">
    <img src="plots/throughput_distribution.png" alt="Distribución de throughput" onerror="this.style.display='none'">
    <p class="meta">Datos crudos en benchmark_results.csv y analysis_report.json</p>
  </div>
</body>
</html>
"#,
        generated = Utc::now().format("%Y-%m-%d %H:%M:%S"),
        repetitions = snapshot.configuration.repetitions,
    );

    std::fs::create_dir_all(data_dir)
        .map_err(|e| MedirError::persistence(format!("create {}", data_dir.display()), e))?;
    let path = data_dir.join(REPORT_FILE);
    std::fs::write(&path, html)
        .map_err(|e| MedirError::persistence(format!("write {}", path.display()), e))?;
    Ok(path)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{SnapshotConfig, SnapshotSuite};
    use crate::stats::SuiteStatistics;
    use std::collections::BTreeMap;

    fn snapshot() -> Snapshot {
        let mut suites = BTreeMap::new();
        suites.insert(
            "p1_counter".to_string(),
            SnapshotSuite {
                name: "Race Conditions en Contador".to_string(),
                statistics: SuiteStatistics {
                    success_rate: 1.0,
                    total_runs: 20,
                    successful_runs: 20,
                    time_stats: crate::stats::SampleStats::from_sample(&[1.0, 1.2]),
                    throughput_stats: crate::stats::SampleStats::from_sample(&[9.0, 11.0]),
                },
                results_count: 20,
            },
        );
        Snapshot {
            timestamp: "2025-09-01T00:00:00+00:00".to_string(),
            configuration: SnapshotConfig { repetitions: 5, timeout: None },
            suites,
        }
    }

    #[test]
    fn test_render_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = render(dir.path(), &snapshot()).unwrap();
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("Race Conditions en Contador"));
        assert!(html.contains("100.0%"));
        assert!(html.contains("1.100s"));
    }

    #[test]
    fn test_render_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let empty = Snapshot {
            timestamp: String::new(),
            configuration: SnapshotConfig { repetitions: 5, timeout: None },
            suites: BTreeMap::new(),
        };
        let path = render(dir.path(), &empty).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("Sin resultados"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
