//! Timestamp formatting and export date ranges

use chrono::{DateTime, Datelike, Local, SecondsFormat, TimeZone, Utc};
use std::fmt;

/// Fixed 14-character `YYYYMMDDHHMMSS` capture stamp
///
/// The stamp is rendered in the time zone of the datetime it was built
/// from; the export driver builds it from local time.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use photos_export::core::timestamp::CaptureStamp;
///
/// let stamp = CaptureStamp::from_datetime(&Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
/// assert_eq!(stamp.as_str(), "20250102030405");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureStamp(String);

impl CaptureStamp {
    /// Formats a datetime in its own time zone
    pub fn from_datetime<Tz: TimeZone>(date: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self(date.format("%Y%m%d%H%M%S").to_string())
    }

    /// Formats a UTC instant in the local time zone
    pub fn local(date: &DateTime<Utc>) -> Self {
        Self::from_datetime(&date.with_timezone(&Local))
    }

    /// Returns the stamp as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaptureStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO-8601 timestamp for the current instant
pub fn iso_now() -> String {
    iso_timestamp(&Utc::now())
}

/// Four-digit year folder name
pub fn year_string<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.year().to_string()
}

/// Two-digit month folder name
pub fn month_string<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!("{:02}", date.month())
}

/// Inclusive capture-date range to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First instant included
    pub start: DateTime<Utc>,
    /// Last instant included
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Whether an instant falls within the range
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        *date >= self.start && *date <= self.end
    }
}

/// Range from Jan 1 00:00:00 of `start_year` to Dec 31 23:59:59 of `end_year`, in UTC
///
/// Returns `None` when either year is outside chrono's representable range.
pub fn year_range(start_year: i32, end_year: i32) -> Option<DateRange> {
    let start = Utc
        .with_ymd_and_hms(start_year, 1, 1, 0, 0, 0)
        .single()?;
    let end = Utc
        .with_ymd_and_hms(end_year, 12, 31, 23, 59, 59)
        .single()?;
    Some(DateRange { start, end })
}

/// Range covering the current (local) calendar year
pub fn current_year_range() -> DateRange {
    let year = Local::now().year();
    year_range(year, year).unwrap_or(DateRange {
        start: DateTime::<Utc>::MIN_UTC,
        end: DateTime::<Utc>::MAX_UTC,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn test_capture_stamp_format() {
        let date = Utc.with_ymd_and_hms(2025, 12, 27, 13, 56, 27).unwrap();
        let stamp = CaptureStamp::from_datetime(&date);
        assert_eq!(stamp.as_str(), "20251227135627");
    }

    #[test]
    fn test_local_capture_stamp_shape() {
        let date = Utc.with_ymd_and_hms(2025, 12, 27, 13, 56, 27).unwrap();
        let stamp = CaptureStamp::local(&date);
        assert_eq!(stamp.as_str().len(), 14);
        assert!(stamp.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_iso_timestamp_has_fraction_and_zulu() {
        let s = iso_timestamp(&Utc.timestamp_opt(0, 0).unwrap());
        assert_eq!(s, "1970-01-01T00:00:00.000Z");
        assert!(iso_now().contains('T'));
    }

    #[test]
    fn test_month_and_year_string() {
        let date = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(year_string(&date), "2025");
        assert_eq!(month_string(&date), "01");
    }

    #[test]
    fn test_year_range_bounds() {
        let range = year_range(2022, 2025).unwrap();
        assert_eq!(range.start.year(), 2022);
        assert_eq!(range.start.month(), 1);
        assert_eq!(range.start.day(), 1);
        assert_eq!(range.start.hour(), 0);
        assert_eq!(range.end.year(), 2025);
        assert_eq!(range.end.month(), 12);
        assert_eq!(range.end.day(), 31);
        assert_eq!(range.end.hour(), 23);
        assert_eq!(range.end.minute(), 59);
        assert_eq!(range.end.second(), 59);
    }

    #[test]
    fn test_current_year_range_is_sane() {
        let range = current_year_range();
        assert!(range.start <= range.end);
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = year_range(2024, 2024).unwrap();
        assert!(range.contains(&range.start));
        assert!(range.contains(&range.end));
        let after = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(!range.contains(&after));
    }
}
