//! CSV loading for the daily-change data file.
//!
//! Reads `date`, `state_abbrev` and `recovered` from a headed CSV (extra
//! columns are ignored) and converts each row into a validated
//! [`DailyRecord`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use recovery_core::error::{RecoveryError, Result};
use recovery_core::models::{parse_date, DailyRecord};

/// The three columns this tool needs; anything else in the file is skipped.
#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    state_abbrev: String,
    recovered: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every row of the CSV at `path`.
///
/// Fails on the first malformed row: a bad date yields
/// [`RecoveryError::InvalidDate`], a count that is not a whole number
/// [`RecoveryError::InvalidCount`]. An empty `recovered` cell counts as 0.
pub fn load_records(path: &Path) -> Result<Vec<DailyRecord>> {
    let file = File::open(path).map_err(|source| RecoveryError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;
    info!(
        path = %path.display(),
        records = records.len(),
        "csv loaded"
    );
    Ok(records)
}

/// Parse CSV content from any reader. The first line must be the header.
pub fn read_records<R: Read>(input: R) -> Result<Vec<DailyRecord>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    while reader.read_record(&mut row)? {
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawRow = row.deserialize(Some(&headers))?;
        records.push(convert_row(raw, line)?);
    }

    debug!(rows = records.len(), "csv rows converted");
    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn convert_row(raw: RawRow, line: u64) -> Result<DailyRecord> {
    let date = parse_date(&raw.date, line)?;
    let recovered = parse_count(&raw.recovered, line)?;
    Ok(DailyRecord::new(date, raw.state_abbrev, recovered))
}

/// Whole-number count; an empty cell is treated as zero.
///
/// Numeric spellings such as `3.0` or `1e1` are accepted when they denote a
/// whole number that fits in an `i64`.
fn parse_count(value: &str, line: u64) -> Result<i64> {
    if value.is_empty() {
        return Ok(0);
    }
    if let Ok(count) = value.parse::<i64>() {
        return Ok(count);
    }

    let invalid = || RecoveryError::InvalidCount {
        line,
        value: value.to_string(),
    };
    let number = value.parse::<f64>().map_err(|_| invalid())?;
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if number.is_finite()
        && number.fract() == 0.0
        && number >= i64::MIN as f64
        && number < i64::MAX as f64
    {
        Ok(number as i64)
    } else {
        Err(invalid())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
