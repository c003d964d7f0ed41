//! Fissures timestamp strings.
//!
//! Requests carry UTC times as `YYYY-MM-DDTHH:MM:SS.ffffZ`; servers answer in
//! either the extended form or the compact `YYYYMMDDTHHMMSS.fffZ` form.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::FissuresError;

const EXTENDED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const COMPACT_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Formats a UTC time with four fractional digits (truncated).
pub fn to_fissures_time(time: DateTime<Utc>) -> String {
    // Leap-second nanos run past 1e9; clamp rather than spill a fifth digit.
    let ten_thousandths = (time.nanosecond() / 100_000).min(9_999);
    format!("{}.{:04}Z", time.format(EXTENDED_FORMAT), ten_thousandths)
}

/// Parses an extended or compact Fissures timestamp. The trailing `Z` and
/// the fraction are optional; at most nine fractional digits are accepted.
pub fn parse_fissures_time(text: &str) -> Result<DateTime<Utc>, FissuresError> {
    let invalid = || FissuresError::InvalidTimestamp(text.to_string());

    let trimmed = text.trim();
    let body = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (body, None),
    };

    let format = if whole.contains('-') {
        EXTENDED_FORMAT
    } else {
        COMPACT_FORMAT
    };
    let naive = NaiveDateTime::parse_from_str(whole, format).map_err(|_| invalid())?;

    let nanos = match fraction {
        None => 0,
        Some(digits) => {
            if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let scale = 10i64.pow(9 - digits.len() as u32);
            digits.parse::<i64>().map_err(|_| invalid())? * scale
        }
    };

    Ok(Utc.from_utc_datetime(&naive) + Duration::nanoseconds(nanos))
}
