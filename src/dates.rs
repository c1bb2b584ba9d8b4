//! Calendar-date handling.
//!
//! Every date in the log is a plain calendar day serialized as
//! `YYYY-MM-DD`. Arithmetic works on whole days, never on elapsed-time
//! durations, so results don't shift with the machine's time zone.

use thiserror::Error;
use time::Date;
use time::Duration;
use time::Month;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a valid calendar date (expected YYYY-MM-DD)")]
pub struct InvalidDate(pub String);

/// Parses a `YYYY-MM-DD` string. Impossible dates such as `2023-02-29` are
/// rejected, as are unpadded components.
pub fn parse(s: &str) -> Result<Date, InvalidDate> {
    let invalid = || InvalidDate(s.to_string());

    let parts: Vec<&str> = s.split('-').collect();
    let [year, month, day] = parts[..] else {
        return Err(invalid());
    };

    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u8 = month.parse().map_err(|_| invalid())?;
    let day: u8 = day.parse().map_err(|_| invalid())?;

    let month = Month::try_from(month).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

pub fn format(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn add_days(date: Date, days: i64) -> Date {
    date.saturating_add(Duration::days(days))
}

/// Whole days from `from` to `to`. Negative when `to` is earlier.
pub fn diff_days(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips() {
        let date = parse("2024-12-25").unwrap();

        assert_eq!(format(date), "2024-12-25");
    }

    #[test]
    fn parse_accepts_leap_day() {
        assert!(parse("2024-02-29").is_ok());
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert_eq!(
            parse("2023-02-29"),
            Err(InvalidDate("2023-02-29".to_string()))
        );
        assert!(parse("2024-13-01").is_err());
        assert!(parse("2024-12-00").is_err());
        assert!(parse("2024-12-32").is_err());
    }

    #[test]
    fn parse_rejects_malformed_strings() {
        assert!(parse("").is_err());
        assert!(parse("not a date").is_err());
        assert!(parse("2024-12").is_err());
        assert!(parse("2024-12-25-01").is_err());
        assert!(parse("2024-2-5").is_err());
        assert!(parse("24-12-25").is_err());
        assert!(parse("2024/12/25").is_err());
    }

    #[test]
    fn add_days_crosses_month_and_year_boundaries() {
        let date = parse("2024-12-25").unwrap();

        assert_eq!(format(add_days(date, 6)), "2024-12-31");
        assert_eq!(format(add_days(date, 7)), "2025-01-01");
        assert_eq!(format(add_days(date, -25)), "2024-11-30");
    }

    #[test]
    fn diff_days_is_signed() {
        let due = parse("2024-12-21").unwrap();
        let today = parse("2024-12-31").unwrap();

        assert_eq!(diff_days(due, today), 10);
        assert_eq!(diff_days(today, due), -10);
        assert_eq!(diff_days(today, today), 0);
    }

    #[test]
    fn diff_days_crosses_year_boundary() {
        let from = parse("2024-12-29").unwrap();
        let to = parse("2025-01-02").unwrap();

        assert_eq!(diff_days(from, to), 4);
    }
}
