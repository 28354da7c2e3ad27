//! Lenient date/time parsing for survey export values.
//!
//! Exports arrive from many spreadsheet locales, so a value counts as a date
//! if any of the known layouts accepts it. Day-first layouts are tried before
//! month-first ones, so `03/04/2024` reads as 3 April.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p", // 01/15/2024 10:30:00 AM
    "%m/%d/%Y %I:%M %p",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%d %B %Y %H:%M",
];

const UTC_SUFFIXES: &[&str] = &[" UTC", " GMT", "Z"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%d/%m/%Y",  // 15/01/2024
    "%m/%d/%Y",  // 01/15/2024
    "%d.%m.%Y",  // 15.01.2024
    "%Y%m%d",    // 20240115
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
    "%d-%m-%Y",  // 15-01-2024
];

/// Parses a date or date-time string, returning `None` when no layout fits.
///
/// Date-only values resolve to midnight. Offsets are normalized to UTC, and a
/// trailing `UTC`, `GMT` or `Z` marker is dropped before the naive layouts run.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    let naive = strip_utc_suffix(trimmed);
    try_parse_datetime(naive).or_else(|| try_parse_date(naive).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Removes a UTC marker that follows a time component.
fn strip_utc_suffix(value: &str) -> &str {
    UTC_SUFFIXES
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
        .filter(|rest| rest.ends_with(|c: char| c.is_ascii_digit()))
        .map_or(value, str::trim_end)
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn parses_common_layouts() {
        assert_eq!(parse_datetime("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("15/01/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("Jan 15, 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime(" 15 January 2024 "), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn parses_export_timestamps() {
        let at = |h, m| ymd(2024, 1, 15).date().and_hms_opt(h, m, 0);
        assert_eq!(parse_datetime("01/15/2024 10:30:00 AM"), at(10, 30));
        assert_eq!(parse_datetime("1/15/2024 3:04 PM"), at(15, 4));
        assert_eq!(parse_datetime("15/01/2024 12:05 am"), at(0, 5));
        assert_eq!(parse_datetime("2024-01-15 10:30:00 UTC"), at(10, 30));
        assert_eq!(parse_datetime("2024-01-15 10:30:00Z"), at(10, 30));
        assert_eq!(parse_datetime("15 Jan 2024 10:30"), at(10, 30));
        assert_eq!(parse_datetime("15 January 2024 10:30"), at(10, 30));
    }

    #[test]
    fn utc_marker_needs_a_time_before_it() {
        assert_eq!(parse_datetime("UTC"), None);
        assert_eq!(parse_datetime("Tokyo GMT"), None);
    }

    #[test]
    fn day_first_wins_for_ambiguous_values() {
        assert_eq!(parse_datetime("03/04/2024"), Some(ymd(2024, 4, 3)));
        // Only month-first is valid here.
        assert_eq!(parse_datetime("01/25/2024"), Some(ymd(2024, 1, 25)));
    }

    #[test]
    fn parses_datetimes_and_offsets() {
        let parsed = parse_datetime("2024-03-01 09:30:00").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "09:30");

        let utc = parse_datetime("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(utc.format("%H:%M").to_string(), "08:00");
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("5"), None);
        assert_eq!(parse_datetime("I'm retiring"), None);
        assert_eq!(parse_datetime("2024-13-45"), None);
    }
}
