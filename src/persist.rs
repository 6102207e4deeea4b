//! Durable result storage: append-only CSV log and JSON analysis snapshot.
//!
//! The CSV log accumulates rows across harness runs; the header is written
//! only when the file is first created. The per-row metrics mapping is
//! serialized as a JSON blob inside one column, since the rest of the row
//! schema is fixed. The snapshot is a full overwrite: per-suite statistics
//! and counts, never raw records.
//!
//! The harness is strictly sequential, so there is never more than one
//! writer; exposing parallel sweeps would require sharding this log.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{MedirError, Result};
use crate::suite::{Harness, ResultRecord, Suite};

const CSV_HEADER: &str = "workload,config,timestamp,elapsed,throughput,success,metrics";

/// Quote a CSV field per RFC 4180 when it contains a delimiter, quote, or
/// newline. Only the config label and the metrics blob ever need it.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split one CSV line into fields, honoring RFC 4180 quoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Append records to the tabular log, creating it (with header) on first use.
pub fn append_results(path: &Path, records: &[ResultRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| MedirError::persistence(format!("create {}", parent.display()), e))?;
        }
    }

    let is_new = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| MedirError::persistence(format!("open {}", path.display()), e))?;

    let mut buf = String::new();
    if is_new {
        buf.push_str(CSV_HEADER);
        buf.push('\n');
    }
    for record in records {
        let metrics_blob = serde_json::to_string(&record.metrics)
            .map_err(|e| MedirError::persistence("serialize metrics", e.into()))?;
        buf.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            record.workload,
            csv_field(&record.config),
            csv_field(&record.timestamp),
            record.elapsed,
            record.throughput,
            record.success,
            csv_field(&metrics_blob),
        ));
    }

    file.write_all(buf.as_bytes())
        .map_err(|e| MedirError::persistence(format!("write {}", path.display()), e))?;
    Ok(())
}

/// Read records back from the tabular log.
///
/// Captured streams are not stored in the log, so they come back empty.
/// Rows that fail to parse are skipped; the log may span harness versions.
pub fn read_results(path: &Path) -> Result<Vec<ResultRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| MedirError::Analysis {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut records = Vec::new();
    for line in content.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = csv_split(line);
        if fields.len() < 7 {
            continue;
        }
        let (Ok(workload), Ok(elapsed), Ok(throughput), Ok(success)) = (
            fields[0].parse(),
            fields[3].parse::<f64>(),
            fields[4].parse::<f64>(),
            fields[5].parse::<bool>(),
        ) else {
            continue;
        };
        let metrics: BTreeMap<String, f64> = serde_json::from_str(&fields[6]).unwrap_or_default();

        records.push(ResultRecord {
            workload,
            config: fields[1].clone(),
            timestamp: fields[2].clone(),
            elapsed,
            throughput: if success { throughput } else { 0.0 },
            success,
            stdout: String::new(),
            stderr: String::new(),
            metrics,
        });
    }
    Ok(records)
}

/// Harness configuration echoed into the snapshot for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub repetitions: usize,
    /// Timeout override in seconds; absent when per-workload defaults apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// One suite entry in the snapshot: statistics and counts, no raw records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSuite {
    pub name: String,
    pub statistics: crate::stats::SuiteStatistics,
    pub results_count: usize,
}

/// The full analysis snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: String,
    pub configuration: SnapshotConfig,
    pub suites: BTreeMap<String, SnapshotSuite>,
}

impl Snapshot {
    /// Build a snapshot from completed suites and the harness that ran them.
    #[must_use]
    pub fn from_suites(suites: &[Suite], harness: &Harness) -> Self {
        let entries = suites
            .iter()
            .map(|suite| {
                (
                    suite.workload.to_string(),
                    SnapshotSuite {
                        name: suite.name.clone(),
                        statistics: suite.statistics.clone(),
                        results_count: suite.records.len(),
                    },
                )
            })
            .collect();

        Self {
            timestamp: Utc::now().to_rfc3339(),
            configuration: SnapshotConfig {
                repetitions: harness.repetitions,
                timeout: harness.timeout_override.map(|t| t.as_secs()),
            },
            suites: entries,
        }
    }
}

/// Write the snapshot document, replacing any previous one.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| MedirError::persistence(format!("create {}", parent.display()), e))?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| MedirError::persistence("serialize snapshot", e.into()))?;
    std::fs::write(path, json)
        .map_err(|e| MedirError::persistence(format!("write {}", path.display()), e))?;
    Ok(())
}

/// Read a previously written snapshot.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| MedirError::Analysis {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| MedirError::Analysis {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
