//! Scanner for the three benchmark logs.
//!
//! The logs are the REPL transcripts of the same query script run against
//! the PostgreSQL backend, the MongoDB backend and both at once:
//!
//! ```text
//! Operation took 0.0123 seconds
//! Disconnecting from database movie-lens
//! ```
//!
//! Lines are walked in lockstep. The psql log decides what a line is; the
//! other two only contribute their numbers.

use crate::error::{Result, TableError};
use crate::types::{DatasetBlock, Timing, TimingRow};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Log of the PostgreSQL-only run
pub const PSQL_LOG: &str = "result_psql.out";
/// Log of the MongoDB-only run
pub const MONGO_LOG: &str = "result_mongo.out";
/// Log of the run using both backends
pub const BOTH_LOG: &str = "result_psql_mongo.out";

/// Marker of a timed statement
pub const TIMING_MARKER: &str = "Operation took";
/// Marker closing a dataset block
pub const BLOCK_END_MARKER: &str = "Disconnecting";

static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+-]?([0-9]*[.])?[0-9]+").expect("decimal pattern is valid")
});

/// First decimal number in a line, optionally signed, with optional
/// fractional part
///
/// Example: "Operation took 0.0123 seconds" -> Some("0.0123")
pub fn extract_first_decimal(line: &str) -> Option<&str> {
    DECIMAL.find(line).map(|m| m.as_str())
}

fn parse_timing(file: &str, line_no: usize, line: &str) -> Result<Timing> {
    let text = extract_first_decimal(line).ok_or_else(|| TableError::NumberNotFound {
        file: file.to_string(),
        line: line_no,
    })?;

    let seconds = text.parse::<f64>().map_err(|_| TableError::InvalidNumber {
        file: file.to_string(),
        line: line_no,
        value: text.to_string(),
    })?;

    Ok(Timing {
        text: text.to_string(),
        seconds,
    })
}

/// Split the aligned logs into one block of timing rows per dataset.
///
/// Scanning stops at the end of the shortest log. Rows after the last
/// `Disconnecting` marker belong to no block and are dropped.
pub fn scan_logs(psql: &[String], mongo: &[String], both: &[String]) -> Result<Vec<DatasetBlock>> {
    if psql.len() != mongo.len() || psql.len() != both.len() {
        warn!(
            psql = psql.len(),
            mongo = mongo.len(),
            both = both.len(),
            "log line counts differ, scanning up to the shortest"
        );
    }

    let mut blocks = Vec::new();
    let mut current: DatasetBlock = Vec::new();

    for (idx, ((psql_line, mongo_line), both_line)) in
        psql.iter().zip(mongo).zip(both).enumerate()
    {
        let line_no = idx + 1;

        if psql_line.contains(TIMING_MARKER) {
            current.push(TimingRow {
                psql: parse_timing(PSQL_LOG, line_no, psql_line)?,
                mongo: parse_timing(MONGO_LOG, line_no, mongo_line)?,
                both: parse_timing(BOTH_LOG, line_no, both_line)?,
            });
        } else if psql_line.contains(BLOCK_END_MARKER) {
            debug!(block = blocks.len(), rows = current.len(), "closed dataset block");
            blocks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        debug!(rows = current.len(), "dropping rows after the last disconnect");
    }

    Ok(blocks)
}
