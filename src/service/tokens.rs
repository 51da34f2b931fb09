use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::ParseError;

/// Parses a single date token. `None` or an empty string is "no value",
/// not an error. Accepted shapes, first match wins:
///
/// 1. `YYYYMMDD`
/// 2. `MM/DD` or `MM-DD` (year taken from `now`)
/// 3. `YYYY/MM/DD` or `YYYY-MM-DD`
/// 4. `MM/DD/YYYY` or `MM-DD-YYYY`
pub fn parse_date(raw: Option<&str>, now: NaiveDate) -> Result<Option<NaiveDate>, ParseError> {
    let Some(s) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match date_from_token(s, now) {
        Some(date) => Ok(Some(date)),
        None => Err(ParseError::Format { raw: s.to_string() }),
    }
}

/// Parses a single time token (`HHMM` or `HH:MM`). `None` or an empty
/// string is "no value". Seconds are always zero.
pub fn parse_time(raw: Option<&str>) -> Result<Option<NaiveTime>, ParseError> {
    let Some(s) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match time_from_token(s) {
        Some(time) => Ok(Some(time)),
        None => Err(ParseError::Format { raw: s.to_string() }),
    }
}

fn date_from_token(s: &str, now: NaiveDate) -> Option<NaiveDate> {
    // YYYYMMDD
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[0..4].parse().ok()?;
        let month = s[4..6].parse().ok()?;
        let day = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let sep = if s.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = s.split(sep).collect();
    match parts.as_slice() {
        // MM/DD or MM-DD, completed with the current year
        [month, day] => {
            NaiveDate::from_ymd_opt(now.year(), number(month, 2)?, number(day, 2)?)
        }
        // YYYY/MM/DD or YYYY-MM-DD
        [year, month, day] if year.len() == 4 => {
            NaiveDate::from_ymd_opt(year_number(year)?, number(month, 2)?, number(day, 2)?)
        }
        // MM/DD/YYYY or MM-DD-YYYY
        [month, day, year] if year.len() == 4 => {
            NaiveDate::from_ymd_opt(year_number(year)?, number(month, 2)?, number(day, 2)?)
        }
        _ => None,
    }
}

fn time_from_token(s: &str) -> Option<NaiveTime> {
    // HHMM
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let hour = s[0..2].parse().ok()?;
        let minute = s[2..4].parse().ok()?;
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    // HH:MM
    let (hour, minute) = s.split_once(':')?;
    NaiveTime::from_hms_opt(number(hour, 2)?, number(minute, 2)?, 0)
}

// A 1..=max_len digit component. Rejects signs, spaces and empty parts,
// which str::parse alone would let through or misreport.
fn number(part: &str, max_len: usize) -> Option<u32> {
    if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn year_number(part: &str) -> Option<i32> {
    if part.len() != 4 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
