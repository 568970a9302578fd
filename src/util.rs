use crate::error::{ProfileError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 style timestamp into UTC. Timestamps without an offset are read as UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    // YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    Err(ProfileError::InvalidTimestamp(input.to_string()))
}

/// Parse a non-negative count. Float text is truncated toward zero; a blank cell counts as zero.
pub fn parse_count(input: &str) -> Result<u64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = input.parse::<u64>() {
        return Ok(n);
    }
    match input.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Ok(f.trunc() as u64),
        _ => Err(ProfileError::Parse(format!("invalid count '{input}'"))),
    }
}

pub fn day_key(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Long human form used in the report, e.g. `June 1, 2025`.
pub fn human_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

pub fn repository_url(owner: &str, repository: &str) -> String {
    format!("https://github.com/{owner}/{repository}")
}
