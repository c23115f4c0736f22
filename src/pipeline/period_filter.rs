//! Month-granular period filtering.

use chrono::{Datelike, NaiveDate};

/// Truncates a date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Checks whether `(year, month)` falls inside `[start, end]` at month granularity.
///
/// Both bounds are truncated to the first of their month before comparing, so
/// the day-of-month of `start` and `end` never matters. The range is inclusive
/// on both ends. An invalid month, or `start` after `end`, never matches.
///
/// # Examples
///
/// ```
/// use vencimento_engine::pipeline::in_range;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2020, 3, 20).unwrap();
///
/// assert!(in_range(2020, 3, start, end));
/// assert!(!in_range(2020, 4, start, end));
/// ```
pub fn in_range(year: i32, month: u32, start: NaiveDate, end: NaiveDate) -> bool {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => month_start(start) <= date && date <= month_start(end),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_start_truncates() {
        assert_eq!(month_start(date(2020, 2, 29)), date(2020, 2, 1));
        assert_eq!(month_start(date(2020, 2, 1)), date(2020, 2, 1));
    }

    #[test]
    fn test_mid_month_range_covers_whole_month() {
        let start = date(2020, 3, 15);
        let end = date(2020, 3, 20);
        assert!(in_range(2020, 3, start, end));
        assert!(!in_range(2020, 2, start, end));
        assert!(!in_range(2020, 4, start, end));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let start = date(2020, 1, 31);
        let end = date(2020, 12, 1);
        assert!(in_range(2020, 1, start, end));
        assert!(in_range(2020, 12, start, end));
    }

    #[test]
    fn test_range_across_years() {
        let start = date(2019, 11, 1);
        let end = date(2020, 2, 28);
        assert!(in_range(2019, 11, start, end));
        assert!(in_range(2019, 12, start, end));
        assert!(in_range(2020, 1, start, end));
        assert!(!in_range(2019, 10, start, end));
        assert!(!in_range(2020, 3, start, end));
    }

    #[test]
    fn test_start_after_end_matches_nothing() {
        let start = date(2020, 3, 1);
        let end = date(2020, 2, 1);
        for month in 1..=12 {
            assert!(!in_range(2020, month, start, end));
        }
    }

    #[test]
    fn test_invalid_month_never_matches() {
        let start = date(2000, 1, 1);
        let end = date(2030, 12, 31);
        assert!(!in_range(2020, 0, start, end));
        assert!(!in_range(2020, 13, start, end));
    }
}
