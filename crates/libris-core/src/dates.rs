//! Best-effort date handling for book records
//!
//! Record dates are free text: a bare year from the upstream catalog, an
//! en-US locale date derived from a creation timestamp, or anything a user
//! typed into the add form. Parsing never fails loudly; text that does not
//! look like a date is simply `None`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Formats tried in order after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Parse a free-text date.
///
/// Accepts RFC 3339 and naive ISO timestamps, `YYYY-MM-DD`, `M/D/YYYY`,
/// `Month D, YYYY`, `YYYY-MM` and a bare `YYYY`. Partial dates resolve to
/// the first day of the period.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    // YYYY-MM
    if let Some((year, month)) = text.split_once('-') {
        if let (Some(year), Ok(month)) = (parse_year(year), month.parse::<u32>()) {
            return NaiveDate::from_ymd_opt(year, month, 1);
        }
    }

    parse_year(text).and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

fn parse_year(text: &str) -> Option<i32> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Format an upstream timestamp the way an en-US browser shows a date:
/// `M/D/YYYY` without zero padding.
pub fn locale_date(timestamp: &str) -> Option<String> {
    parse_date(timestamp).map(|d| format!("{}/{}/{}", d.month(), d.day(), d.year()))
}
