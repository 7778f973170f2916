//! # Date Utilities
//!
//! Pure helpers shared by every layer. Pickers only ever deal in calendar dates
//! ([`NaiveDate`]); anything carrying a time of day is stripped on the way in.
//!
//! The supported span is years 1 through 9999. The overlay year field accepts at
//! most four digits, so the same span bounds navigation and month arithmetic.

use crate::error::{DatepickError, Result};
use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime, TimeZone};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Largest accepted pair offset: a century.
pub const MAX_SIBLING_OFFSET: u32 = 1200;

pub const DEFAULT_DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const DEFAULT_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Anything that can be reduced to a local calendar date.
pub trait CalendarDate {
    fn calendar_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDate for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDate for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Drops the time-of-day component.
pub fn strip_time<D: CalendarDate>(date: &D) -> NaiveDate {
    date.calendar_date()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn first_supported_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn last_supported_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX)
}

pub fn is_representable(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

pub fn ensure_representable(date: NaiveDate) -> Result<NaiveDate> {
    if is_representable(date) {
        Ok(date)
    } else {
        Err(DatepickError::OutOfRange(format!(
            "{} is outside the supported years {}-{}",
            date, MIN_YEAR, MAX_YEAR
        )))
    }
}

/// True when `prev` and `next` fall in different (year, month) pairs.
pub fn has_month_changed(prev: NaiveDate, next: NaiveDate) -> bool {
    prev.year() != next.year() || prev.month() != next.month()
}

/// Shifts `date` by `delta` months, clamping the day to the target month.
pub fn add_months(date: NaiveDate, delta: i32) -> Result<NaiveDate> {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };

    match shifted {
        Some(d) => ensure_representable(d),
        None => Err(DatepickError::OutOfRange(format!(
            "cannot move {} by {} months",
            date, delta
        ))),
    }
}

/// Maps a date on one side of a range pair to the matching date on the other.
///
/// The first picker looks `offset_months` ahead of its sibling, so it pushes
/// its date forward; the second pushes backward. An offset of zero mirrors.
/// Results past the supported span clamp to its first or last day.
pub fn sibling_date(is_first: bool, date: NaiveDate, offset_months: u32) -> NaiveDate {
    let months = Months::new(offset_months);
    let (mapped, edge) = if is_first {
        (date.checked_add_months(months), last_supported_date())
    } else {
        (date.checked_sub_months(months), first_supported_date())
    };
    mapped.filter(|d| is_representable(*d)).unwrap_or(edge)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday().num_days_from_sunday(), 0 | 6)
}

/// Rotates the 7 weekday labels so the header starts at `start_day`.
pub fn rotate_weekdays<S: AsRef<str>>(labels: &[S], start_day: u8) -> Vec<String> {
    let start = start_day as usize % labels.len().max(1);
    labels[start..]
        .iter()
        .chain(labels[..start].iter())
        .map(|s| s.as_ref().to_string())
        .collect()
}

/// 1-based grid column of the first day of `month_start`'s month.
pub fn first_day_column(month_start: NaiveDate, start_day: u8) -> u32 {
    let weekday = month_start.weekday().num_days_from_sunday() as i32;
    ((weekday - start_day as i32).rem_euclid(7) + 1) as u32
}

/// Parses `YYYY-MM-DD`, or `YYYY-MM` (first of month).
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d"))
        .map_err(|_| {
            DatepickError::Validation(format!(
                "Invalid date \"{}\" (expected YYYY-MM-DD or YYYY-MM)",
                trimmed
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn strips_time_of_day() {
        let dt = ymd(2023, 2, 5).and_hms_opt(17, 45, 12).unwrap();
        assert_eq!(strip_time(&dt), ymd(2023, 2, 5));
    }

    #[test]
    fn month_change_detection_ignores_day() {
        assert!(!has_month_changed(ymd(2023, 2, 1), ymd(2023, 2, 28)));
        assert!(has_month_changed(ymd(2023, 2, 1), ymd(2023, 3, 1)));
        assert!(has_month_changed(ymd(2023, 2, 1), ymd(2024, 2, 1)));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(ymd(2023, 1, 31), 1).unwrap(), ymd(2023, 2, 28));
        assert_eq!(add_months(ymd(2023, 1, 15), -1).unwrap(), ymd(2022, 12, 15));
    }

    #[test]
    fn add_months_past_supported_span_fails() {
        let err = add_months(ymd(9999, 12, 1), 1).unwrap_err();
        assert!(matches!(err, DatepickError::OutOfRange(_)));
    }

    #[test]
    fn sibling_date_direction_follows_role() {
        let d = ymd(2023, 5, 10);
        assert_eq!(sibling_date(true, d, 1), ymd(2023, 6, 10));
        assert_eq!(sibling_date(false, d, 1), ymd(2023, 4, 10));
        assert_eq!(sibling_date(true, d, 0), d);
    }

    #[test]
    fn sibling_date_clamps_to_supported_span() {
        assert_eq!(sibling_date(true, ymd(9999, 12, 15), 1), ymd(9999, 12, 31));
        assert_eq!(sibling_date(false, ymd(1, 1, 15), 1), ymd(1, 1, 1));
        assert_eq!(
            sibling_date(true, ymd(2023, 2, 5), u32::MAX),
            ymd(9999, 12, 31)
        );
    }

    #[test]
    fn weekday_rotation() {
        assert_eq!(
            rotate_weekdays(&DEFAULT_DAYS, 4).concat(),
            "ThuFriSatSunMonTueWed"
        );
        for start in 0..7u8 {
            let rotated = rotate_weekdays(&DEFAULT_DAYS, start);
            assert_eq!(rotated[0], DEFAULT_DAYS[start as usize]);
            assert_eq!(rotated.len(), 7);
        }
    }

    #[test]
    fn first_day_column_matches_start_day() {
        // February 1st 2023 is a Wednesday.
        let feb = ymd(2023, 2, 1);
        let expected = [4, 3, 2, 1, 7, 6, 5];
        for (start, column) in expected.iter().enumerate() {
            assert_eq!(first_day_column(feb, start as u8), *column);
        }
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn parse_date_accepts_month_shorthand() {
        assert_eq!(parse_date("2023-02").unwrap(), ymd(2023, 2, 1));
        assert_eq!(parse_date("2023-02-05").unwrap(), ymd(2023, 2, 5));
        assert!(parse_date("02/05/2023").is_err());
    }
}
