//! CSV export for the hourly simulation log.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::{HourStatus, HourlyRecord};

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str =
    "hour,total_available_kw,deficit_kw,battery_level_kwh,controller_output,grid_kw,status";

/// Exports the hourly record log to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[HourlyRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes the hourly record log as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[HourlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        let status = match r.status {
            HourStatus::Sufficient => "sufficient",
            HourStatus::Deficit { .. } => "deficit",
        };
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.4}", r.total_available_kw),
            format!("{:.4}", r.deficit_kw),
            format!("{:.4}", r.battery_level_kwh),
            format!("{:.4}", r.controller_output),
            format!("{:.4}", r.grid_kw),
            status.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
