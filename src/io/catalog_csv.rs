//! CSV reader for quarter-hourly profile tables.
//!
//! Layout: a header row whose first column holds the time label and whose
//! other columns are named `<season>_<day_type>` (e.g. `winter_saturday`, any
//! order, any case), followed by 96 rows labelled `00:15` through `24:00`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::calendar::{DayType, Season};
use crate::error::{ProfileError, Result};
use crate::profile::{INTERVAL_MINUTES, INTERVALS_PER_DAY, ProfileTable, ReferenceCurve};

/// Reads a profile table from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the table is malformed.
pub fn read_profile_table_file(path: &Path) -> Result<ProfileTable> {
    let file = File::open(path)?;
    read_profile_table(file, &path.display().to_string())
}

/// Reads a profile table from any CSV source; `source_name` is used in error messages.
///
/// # Errors
///
/// Returns [`ProfileError::Catalog`] for a missing or duplicate column, a wrong
/// row count, an out-of-sequence time label, or an unparsable value.
pub fn read_profile_table(reader: impl Read, source_name: &str) -> Result<ProfileTable> {
    let catalog_err = |message: String| ProfileError::Catalog {
        source_name: source_name.to_string(),
        message,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut columns: Vec<(usize, Season, DayType)> = Vec::with_capacity(9);
    for (idx, name) in headers.iter().enumerate().skip(1) {
        let (season, day_type) = parse_column(name).map_err(catalog_err)?;
        if columns.iter().any(|&(_, s, d)| s == season && d == day_type) {
            return Err(catalog_err(format!("duplicate column \"{name}\"")));
        }
        columns.push((idx, season, day_type));
    }

    let mut values: BTreeMap<(Season, DayType), Vec<f64>> = columns
        .iter()
        .map(|&(_, s, d)| ((s, d), Vec::with_capacity(INTERVALS_PER_DAY)))
        .collect();

    let mut rows = 0_usize;
    for record in rdr.records() {
        let record = record?;
        rows += 1;
        if rows > INTERVALS_PER_DAY {
            return Err(catalog_err(format!(
                "more than {INTERVALS_PER_DAY} data rows"
            )));
        }

        let label = record.get(0).unwrap_or_default();
        let expected = INTERVAL_MINUTES * rows as i64;
        if parse_minutes(label) != Some(expected) {
            return Err(catalog_err(format!(
                "row {rows}: time label \"{label}\", expected {:02}:{:02}",
                expected / 60,
                expected % 60
            )));
        }

        for &(idx, season, day_type) in &columns {
            let raw = record.get(idx).unwrap_or_default();
            let v: f64 = raw.parse().map_err(|_| {
                catalog_err(format!(
                    "row {rows}, column {season}_{day_type}: \"{raw}\" is not a number"
                ))
            })?;
            if let Some(curve) = values.get_mut(&(season, day_type)) {
                curve.push(v);
            }
        }
    }

    if rows != INTERVALS_PER_DAY {
        return Err(catalog_err(format!(
            "expected {INTERVALS_PER_DAY} data rows, got {rows}"
        )));
    }

    let mut curves = BTreeMap::new();
    for (key, v) in values {
        let curve = ReferenceCurve::new(v)
            .map_err(|e| catalog_err(format!("column {}_{}: {e}", key.0, key.1)))?;
        curves.insert(key, curve);
    }

    debug!(source = source_name, columns = curves.len(), "read profile table");
    ProfileTable::new(curves)
}

fn parse_column(name: &str) -> std::result::Result<(Season, DayType), String> {
    let (season, day_type) = name
        .split_once(['_', ' ', '/'])
        .ok_or_else(|| format!("column \"{name}\" is not <season>_<day_type>"))?;
    Ok((season.parse()?, day_type.parse()?))
}

/// Minutes past midnight of an `H:MM` or `HH:MM[:SS]` label; `24:00` is 1440.
fn parse_minutes(label: &str) -> Option<i64> {
    let mut parts = label.split(':');
    let h: i64 = parts.next()?.parse().ok()?;
    let m: i64 = parts.next()?.parse().ok()?;
    if !(0..60).contains(&m) {
        return None;
    }
    Some(h * 60 + m)
}
