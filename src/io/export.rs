//! CSV export for load series and dispatch step results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::profile::LoadSeries;
use crate::sim::types::StepResult;

/// Column header of the load series export.
const SERIES_HEADER: &str = "timestamp,watts";

/// Column header of the dispatch telemetry export.
const STEPS_HEADER: &str = "timestamp,load_w,battery_setpoint_kwh,battery_kwh,\
                            battery_w,grid_w,battery_soc";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Exports a load series to a CSV file at the given path.
///
/// # Errors
///
/// Returns a `csv::Error` if file creation or writing fails.
pub fn export_series_csv(series: &LoadSeries, path: &Path) -> csv::Result<()> {
    let file = File::create(path)?;
    write_series_csv(series, io::BufWriter::new(file))
}

/// Writes a load series as CSV to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_series_csv(series: &LoadSeries, writer: impl Write) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SERIES_HEADER.split(','))?;
    for p in series {
        wtr.write_record(&[
            p.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.4}", p.watts),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports dispatch results to a CSV file at the given path.
///
/// # Errors
///
/// Returns a `csv::Error` if file creation or writing fails.
pub fn export_steps_csv(results: &[StepResult], path: &Path) -> csv::Result<()> {
    let file = File::create(path)?;
    write_steps_csv(results, io::BufWriter::new(file))
}

/// Writes dispatch results as CSV to any writer.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_steps_csv(results: &[StepResult], writer: impl Write) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(STEPS_HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in results {
        wtr.write_record(&[
            r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.4}", r.load_w),
            format!("{:.6}", r.battery_setpoint_kwh),
            format!("{:.6}", r.battery_kwh),
            format!("{:.4}", r.battery_w),
            format!("{:.4}", r.grid_w),
            format!("{:.6}", r.soc),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    fn make_step(i: i64) -> StepResult {
        StepResult {
            timestamp: NaiveDate::from_ymd_opt(2015, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("valid timestamp")
                + TimeDelta::minutes(15 * (i + 1)),
            load_w: 800.0,
            battery_setpoint_kwh: -0.075,
            battery_kwh: -0.075,
            battery_w: -300.0,
            grid_w: 500.0,
            soc: 0.48,
        }
    }

    #[test]
    fn steps_header_matches_schema() {
        let mut buf = Vec::new();
        write_steps_csv(&[make_step(0)], &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "timestamp,load_w,battery_setpoint_kwh,battery_kwh,battery_w,grid_w,battery_soc"
        );
    }

    #[test]
    fn row_count_matches_step_count() {
        let results: Vec<StepResult> = (0..96).map(make_step).collect();
        let mut buf = Vec::new();
        write_steps_csv(&results, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 96 data rows
        assert_eq!(lines.len(), 97);
        assert_eq!(lines[96].split(',').next(), Some("2015-01-02 00:00"));
    }

    #[test]
    fn deterministic_output() {
        let results: Vec<StepResult> = (0..5).map(make_step).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_steps_csv(&results, &mut buf1).ok();
        write_steps_csv(&results, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn steps_are_parseable() {
        let results: Vec<StepResult> = (0..3).map(make_step).collect();
        let mut buf = Vec::new();
        write_steps_csv(&results, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(7));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            for i in 1..7 {
                let val: Result<f64, _> = rec[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }

    #[test]
    fn empty_series_writes_header_only() {
        let mut buf = Vec::new();
        write_series_csv(&LoadSeries::default(), &mut buf).ok();
        assert_eq!(String::from_utf8(buf).ok().as_deref(), Some("timestamp,watts\n"));
    }
}
