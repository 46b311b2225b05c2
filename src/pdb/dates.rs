//! Parsing of the free-form `date_added` track string

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-time patterns tried after RFC 3339, in order
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Date-only patterns tried last, in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date string leniently; the first matching format wins
///
/// Values without a zone are taken as UTC. Returns `None` for empty or
/// unrecognised input.
pub fn parse_date_loose(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date.with_timezone(&Utc));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso8601_with_zone() {
        let parsed = parse_date_loose("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_date_time_patterns() {
        let expected = Utc.with_ymd_and_hms(2023, 11, 5, 8, 15, 42).unwrap();
        assert_eq!(parse_date_loose("2023-11-05 08:15:42"), Some(expected));
        assert_eq!(parse_date_loose("2023/11/05 08:15:42"), Some(expected));
    }

    #[test]
    fn test_date_only_patterns() {
        let expected = Utc.with_ymd_and_hms(2022, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(parse_date_loose("2022-01-31"), Some(expected));
        assert_eq!(parse_date_loose(" 2022/01/31\n"), Some(expected));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date_loose(""), None);
        assert_eq!(parse_date_loose("   "), None);
        assert_eq!(parse_date_loose("yesterday"), None);
        assert_eq!(parse_date_loose("2022-13-45"), None);
    }
}
