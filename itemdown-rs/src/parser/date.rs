//! Relative and absolute date tokens.
//!
//! Every function takes the evaluation time explicitly; nothing here reads
//! the system clock.

use crate::types::Timestamp;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, Timelike, Utc};

/// Resolve a relative token such as `+7d`, `-2w`, `+1m` or `+1y`.
///
/// The sign is required and the magnitude must be a positive integer.
/// Months and years use calendar arithmetic, clipping to the last valid
/// day of a shorter target month.
pub fn resolve_relative(token: &str, now: Timestamp) -> Option<Timestamp> {
    let token = token.trim();
    let mut chars = token.chars();

    let negative = match chars.next()? {
        '+' => false,
        '-' => true,
        _ => return None,
    };
    let unit = chars.next_back()?;
    let digits = chars.as_str();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u32 = digits.parse().ok()?;
    if amount == 0 {
        return None;
    }

    match unit {
        'd' => shift(now, TimeDelta::try_days(i64::from(amount))?, negative),
        'w' => shift(now, TimeDelta::try_weeks(i64::from(amount))?, negative),
        'm' => shift_months(now, amount, negative),
        'y' => shift_months(now, amount.checked_mul(12)?, negative),
        _ => None,
    }
}

fn shift(now: Timestamp, delta: TimeDelta, negative: bool) -> Option<Timestamp> {
    if negative {
        now.checked_sub_signed(delta)
    } else {
        now.checked_add_signed(delta)
    }
}

fn shift_months(now: Timestamp, months: u32, negative: bool) -> Option<Timestamp> {
    if negative {
        now.checked_sub_months(Months::new(months))
    } else {
        now.checked_add_months(Months::new(months))
    }
}

/// True when `s` has the exact `YYYY-MM-DD` shape.
fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a full calendar date (`YYYY-MM-DD`, no time) as midnight UTC.
pub fn parse_iso_date(s: &str) -> Option<Timestamp> {
    if !is_iso_date_shape(s) {
        return None;
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse an absolute date or date-time.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` (all UTC)
/// and RFC 3339 timestamps with an offset.
pub fn parse_absolute(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if let Some(date) = parse_iso_date(s) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Resolve a date token: relative grammar first, then absolute formats.
pub fn resolve_date(token: &str, now: Timestamp) -> Option<Timestamp> {
    resolve_relative(token, now).or_else(|| parse_absolute(token))
}

/// Render a timestamp so that [`parse_absolute`] reads back the same instant.
pub fn format_timestamp(ts: Timestamp) -> String {
    if ts.hour() == 0 && ts.minute() == 0 && ts.second() == 0 && ts.nanosecond() == 0 {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}
