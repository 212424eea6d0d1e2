//! Plain-text rendering of the timing tables.
//!
//! ```text
//! movie-lens KNN
//! 0.0123 ,0.0456 ,0.0789 ,
//!
//! movie-lens USER
//! ...
//! ```

use crate::types::{QueryCategory, Table, TableSet};
use std::io::{self, Write};

/// Format a value as the shortest decimal that reads back to the same f64,
/// always with a fractional part.
///
/// Magnitudes below 1e-4 or from 1e16 up switch to exponent notation with
/// an explicit sign and at least two exponent digits.
///
/// Example: 3.0 -> "3.0", 0.25 -> "0.25", 0.00001 -> "1e-05"
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e-5"
    let sci = format!("{:e}", value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if (-4..16).contains(&exp) {
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

        if exp >= 0 {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                format!("{sign}{digits}{}.0", "0".repeat(int_len - digits.len()))
            } else {
                format!("{sign}{}.{}", &digits[..int_len], &digits[int_len..])
            }
        } else {
            format!("{sign}0.{}{digits}", "0".repeat((-exp - 1) as usize))
        }
    } else {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exp.abs())
    }
}

fn write_table<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    writeln!(out, "{}", table.name)?;
    for row in &table.rows {
        for value in row.values() {
            write!(out, "{} ,", format_float(value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the KNN, USER and ITEM groups, separated by blank lines
pub fn write_tables<W: Write>(out: &mut W, tables: &TableSet) -> io::Result<()> {
    for (idx, category) in QueryCategory::ALL.into_iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        for table in tables.group(category) {
            write_table(out, table)?;
        }
    }
    Ok(())
}
