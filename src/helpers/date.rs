//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format a date as a compact month/year label
///
/// # Examples
/// ```ignore
/// short_month_year(&date) // -> "Aug '25"
/// ```
pub fn short_month_year<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let month = SHORT_MONTHS[date.month0() as usize];
    let year = date.year() % 100;
    format!("{} '{:02}", month, year)
}

/// Format a date in full format (like "January 1, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_short_month_year() {
        assert_eq!(short_month_year(&date("2025-08-07T12:00:00Z")), "Aug '25");
        assert_eq!(short_month_year(&date("2009-01-01T00:00:00Z")), "Jan '09");
    }

    #[test]
    fn test_full_date() {
        assert_eq!(full_date(&date("2024-01-01T00:00:00Z")), "January 1, 2024");
    }

    #[test]
    fn test_date_xml() {
        assert!(date_xml(&date("2024-01-01T00:00:00Z")).starts_with("2024-01-01T00:00:00"));
    }
}
