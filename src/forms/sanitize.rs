//! Sanitizers applied to submitted values before they are stored or shown.
//!
//! Text is trimmed and HTML-escaped on the way in; templates print stored
//! text as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Replaces HTML metacharacters with entities.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim then escape.
pub fn text(value: Option<&str>) -> String {
    escape(value.unwrap_or_default().trim())
}

/// Parses an ISO-8601 date or date-time, keeping the calendar date.
pub fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    if let Some(datetime) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(datetime.date());
    }
    parse_reduced_precision(value)
}

/// `YYYY` or `YYYY-MM`, resolved to the first day of the year or month.
fn parse_reduced_precision(value: &str) -> Option<NaiveDate> {
    let digits =
        |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());

    let (year, month) = match value.split_once('-') {
        Some((year, month)) if digits(month, 2) => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (value, 1),
    };
    if !digits(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Coerces a submitted value to a date; empty or unparsable becomes `None`.
pub fn date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_iso8601)
}
