//! Report command implementation

use super::ANALYSIS_FILE;
use crate::cli::logging::{log, LogLevel};
use crate::cli::ReportArgs;
use crate::error::Result;
use crate::persist;
use crate::report;

pub fn run_report(args: &ReportArgs, level: LogLevel) -> Result<()> {
    let snapshot = persist::read_snapshot(&args.data_dir.join(ANALYSIS_FILE))?;
    let path = report::render(&args.data_dir, &snapshot)?;
    log(level, LogLevel::Normal, &format!("Reporte HTML generado: {}", path.display()));
    Ok(())
}
