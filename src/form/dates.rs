//! Fiscal year-end derivation
//!
//! The CTR financial year-end is the last calendar day of the month nine
//! months before the due date's month, rolling the year across January.

use chrono::{Datelike, NaiveDate};

/// Last day of the month nine months before `due`'s month.
///
/// Returns `None` only when the target month falls outside chrono's
/// representable year range, which no business date reaches.
pub fn fiscal_year_end(due: NaiveDate) -> Option<NaiveDate> {
    // Month arithmetic on a flat month index so the year rolls for free.
    let months = due.year() as i64 * 12 + due.month0() as i64 - 9;
    let year = months.div_euclid(12) as i32;
    let month0 = months.rem_euclid(12) as u32;

    // Last day of (year, month0) = the day before the first of the next month.
    let first_of_next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    first_of_next.and_then(|d| d.pred_opt())
}

/// String-level helper for the form layer: parses a `YYYY-MM-DD` due date
/// and formats the derived year-end the same way. Blank or unparseable input
/// yields `None`, which callers treat as "leave the field alone".
pub fn derive_financial_year_end(due: &str) -> Option<String> {
    let due = NaiveDate::parse_from_str(due.trim(), "%Y-%m-%d").ok()?;
    fiscal_year_end(due).map(|d| d.format("%Y-%m-%d").to_string())
}
