//! Period code parsing.
//!
//! Period codes identify a calendar month. Exports carry them either as a
//! full date (`2021-03-01`, optionally with a time part) or as a bare month
//! (`2021-03`, `202103`). Month-only codes resolve to the first day.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised period code '{code}'")]
pub struct PeriodError {
    pub code: String,
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a period code into a calendar date.
pub fn parse_period_code(code: &str) -> Result<NaiveDate, PeriodError> {
    let s = code.trim();
    let err = || PeriodError {
        code: code.to_string(),
    };

    if s.is_empty() || !s.is_ascii() {
        return Err(err());
    }

    // Bare month codes carry no day, chrono refuses them as dates.
    if let Some(date) = parse_month_code(s) {
        return Ok(date);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(err())
}

/// `YYYYMM` or `YYYY-MM`.
fn parse_month_code(s: &str) -> Option<NaiveDate> {
    let (year, month) = match s.len() {
        6 if s.bytes().all(|b| b.is_ascii_digit()) => (&s[0..4], &s[4..6]),
        7 if &s[4..5] == "-" => (&s[0..4], &s[5..7]),
        _ => return None,
    };
    if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Year and month (1-12) of a parsed period.
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
