//! Time and date helpers built on chrono
//!
//! Format constants use strftime syntax.

use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use std::fmt::{Display, Write};

pub const FORMAT_DATE_ONLY: &str = "%Y-%m-%d";
pub const FORMAT_TIME_ONLY: &str = "%H:%M:%S";
pub const FORMAT_DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";
pub const FORMAT_ISO8601: &str = "%Y-%m-%dT%H:%M:%S%:z";
pub const FORMAT_ISO8601_COMPACT: &str = "%Y%m%dT%H%M%S%z";
pub const FORMAT_RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";
pub const FORMAT_RFC822: &str = "%d %b %y %H:%M %Z";

fn fixed_offset(hours: i32) -> Result<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or(Error::InvalidTimezone { hours })
}

/// Current time at a fixed UTC offset
///
/// Offsets must lie strictly between -24 and 24 hours.
pub fn time_in_zone(offset_hours: i32) -> Result<DateTime<FixedOffset>> {
    let offset = fixed_offset(offset_hours)?;
    Ok(Utc::now().with_timezone(&offset))
}

/// Render a time with a strftime pattern
///
/// Unknown specifiers are rejected instead of producing partial output.
pub fn format_time<Tz>(time: &DateTime<Tz>, format: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let invalid = || Error::InvalidTimeFormat {
        format: format.to_string(),
    };
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::new();
    write!(out, "{}", time.format(format)).map_err(|_| invalid())?;
    Ok(out)
}

/// Current time rendered with `format`, at UTC unless an offset is given
pub fn now_formatted(format: &str, offset_hours: Option<i32>) -> Result<String> {
    let now = time_in_zone(offset_hours.unwrap_or(0))?;
    format_time(&now, format)
}

/// Signed calendar-day difference from `start` to `end`
///
/// Only the local date of each value counts; the time of day is ignored.
pub fn days_diff<Tz1: TimeZone, Tz2: TimeZone>(start: &DateTime<Tz1>, end: &DateTime<Tz2>) -> i64 {
    (end.date_naive() - start.date_naive()).num_days()
}

pub fn days_between<Tz1: TimeZone, Tz2: TimeZone>(
    start: &DateTime<Tz1>,
    end: &DateTime<Tz2>,
) -> i64 {
    days_diff(start, end).abs()
}

/// Signed month difference, counting only year and month
pub fn months_diff<Tz1: TimeZone, Tz2: TimeZone>(
    start: &DateTime<Tz1>,
    end: &DateTime<Tz2>,
) -> i64 {
    let months = |year: i32, month: u32| i64::from(year) * 12 + i64::from(month);
    months(end.year(), end.month()) - months(start.year(), start.month())
}

pub fn months_between<Tz1: TimeZone, Tz2: TimeZone>(
    start: &DateTime<Tz1>,
    end: &DateTime<Tz2>,
) -> i64 {
    months_diff(start, end).abs()
}

/// Signed year difference, counting only the year field
pub fn years_diff<Tz1: TimeZone, Tz2: TimeZone>(start: &DateTime<Tz1>, end: &DateTime<Tz2>) -> i64 {
    i64::from(end.year()) - i64::from(start.year())
}

pub fn years_between<Tz1: TimeZone, Tz2: TimeZone>(
    start: &DateTime<Tz1>,
    end: &DateTime<Tz2>,
) -> i64 {
    years_diff(start, end).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_time_in_zone() {
        let tokyo = time_in_zone(9).unwrap();
        assert_eq!(tokyo.offset().local_minus_utc(), 9 * 3600);

        let west = time_in_zone(-5).unwrap();
        assert_eq!(west.offset().local_minus_utc(), -5 * 3600);

        assert!(matches!(time_in_zone(24), Err(Error::InvalidTimezone { hours: 24 })));
        assert!(time_in_zone(i32::MAX).is_err());
    }

    #[test]
    fn test_format_time() {
        let t = utc(2024, 3, 9, 14, 5);
        assert_eq!(format_time(&t, FORMAT_DATE_ONLY).unwrap(), "2024-03-09");
        assert_eq!(format_time(&t, FORMAT_TIME_ONLY).unwrap(), "14:05:00");
        assert_eq!(format_time(&t, FORMAT_DATE_TIME).unwrap(), "2024-03-09 14:05:00");
        assert_eq!(
            format_time(&t, FORMAT_ISO8601).unwrap(),
            "2024-03-09T14:05:00+00:00"
        );
        assert_eq!(
            format_time(&t, FORMAT_ISO8601_COMPACT).unwrap(),
            "20240309T140500+0000"
        );

        let err = format_time(&t, "%Q").unwrap_err();
        assert!(matches!(err, Error::InvalidTimeFormat { .. }));
    }

    #[test]
    fn test_now_formatted() {
        let stamp = now_formatted(FORMAT_DATE_ONLY, None).unwrap();
        assert_eq!(stamp.len(), 10);
        assert!(now_formatted(FORMAT_ISO8601, Some(8)).unwrap().ends_with("+08:00"));
        assert!(now_formatted(FORMAT_DATE_ONLY, Some(30)).is_err());
    }

    #[test]
    fn test_days_ignore_time_of_day() {
        let start = utc(2024, 1, 1, 23, 59);
        let end = utc(2024, 1, 2, 0, 1);
        assert_eq!(days_diff(&start, &end), 1);

        let earlier = utc(2023, 12, 25, 12, 0);
        assert_eq!(days_diff(&start, &earlier), -7);
        assert_eq!(days_between(&start, &earlier), 7);
    }

    #[test]
    fn test_months_and_years() {
        let start = utc(2023, 11, 30, 0, 0);
        let end = utc(2024, 2, 1, 0, 0);
        assert_eq!(months_diff(&start, &end), 3);
        assert_eq!(months_diff(&end, &start), -3);
        assert_eq!(months_between(&end, &start), 3);

        assert_eq!(years_diff(&start, &end), 1);
        assert_eq!(years_diff(&end, &start), -1);
        assert_eq!(years_between(&end, &start), 1);
    }
}
