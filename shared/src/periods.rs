//! Date-range resolution and period boundary calculation.
//!
//! The hierarchy (Day -> Week -> Month -> Year) is linked purely by date
//! containment: a child period finds its parent by scanning the parent
//! collection for the row whose range covers the invocation date.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::{DateRange, PeriodRow};
use crate::{Error, Result};

/// Find the first row whose date range contains `target`, inclusive on both
/// ends. Rows without a range are skipped.
///
/// First match in iteration order wins; callers are expected to keep sibling
/// ranges disjoint, overlaps are resolved by order alone. Failing the lookup
/// is a hard error because linking depends on it.
pub fn find_containing(rows: &[PeriodRow], target: NaiveDate) -> Result<&PeriodRow> {
    rows.iter()
        .find(|row| row.date_range.is_some_and(|range| range.contains(target)))
        .ok_or_else(|| Error::NotFound(format!("no period row contains {target}")))
}

/// Find the Day row for `target` by exact date equality, either on the
/// automatically assigned creation date or on the start of a manual range.
pub fn find_day(rows: &[PeriodRow], target: NaiveDate) -> Result<&PeriodRow> {
    rows.iter()
        .find(|row| {
            row.automatic_date == Some(target)
                || row.date_range.map(|range| range.start) == Some(target)
        })
        .ok_or_else(|| Error::NotFound(format!("no day row for {target}")))
}

/// First and last calendar day of `target`'s month.
pub fn month_bounds(target: NaiveDate) -> DateRange {
    let first = target.with_day(1).expect("day 1 exists in every month");
    let last = first + Months::new(1) - Days::new(1);
    DateRange::new(first, last)
}

/// The week window starting at `target`: `[target, target + 5 days]`.
///
/// Hard-coded policy, not a calendar week computation. The scheduled trigger
/// is assumed to fire on Monday so the window runs through Saturday; invoked
/// on any other weekday the window is simply wrong.
pub fn week_bounds(target: NaiveDate) -> DateRange {
    DateRange::new(target, target + Days::new(5))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(id: &str, start: NaiveDate, end: NaiveDate) -> PeriodRow {
        PeriodRow {
            id: id.to_string(),
            title: id.to_string(),
            date_range: Some(DateRange::new(start, end)),
            automatic_date: None,
        }
    }

    #[test]
    fn test_find_containing_matches_inclusive_bounds() {
        let rows = vec![
            row("feb", d(2024, 2, 1), d(2024, 2, 29)),
            row("mar", d(2024, 3, 1), d(2024, 3, 31)),
        ];

        assert_eq!(find_containing(&rows, d(2024, 3, 1)).unwrap().id, "mar");
        assert_eq!(find_containing(&rows, d(2024, 3, 31)).unwrap().id, "mar");
        assert_eq!(find_containing(&rows, d(2024, 2, 29)).unwrap().id, "feb");
    }

    #[test]
    fn test_find_containing_first_match_wins_on_overlap() {
        let rows = vec![
            row("first", d(2024, 3, 1), d(2024, 3, 31)),
            row("second", d(2024, 3, 10), d(2024, 3, 20)),
        ];

        assert_eq!(find_containing(&rows, d(2024, 3, 15)).unwrap().id, "first");
    }

    #[test]
    fn test_find_containing_skips_rows_without_range() {
        let mut no_range = row("empty", d(2024, 1, 1), d(2024, 1, 1));
        no_range.date_range = None;
        let rows = vec![no_range, row("jan", d(2024, 1, 1), d(2024, 1, 31))];

        assert_eq!(find_containing(&rows, d(2024, 1, 1)).unwrap().id, "jan");
    }

    #[test]
    fn test_find_containing_fails_when_no_match() {
        let rows = vec![row("mar", d(2024, 3, 1), d(2024, 3, 31))];

        let err = find_containing(&rows, d(2024, 4, 1)).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_find_day_by_automatic_date() {
        let rows = vec![PeriodRow {
            id: "today".to_string(),
            title: "15.03.2024".to_string(),
            date_range: None,
            automatic_date: Some(d(2024, 3, 15)),
        }];

        assert_eq!(find_day(&rows, d(2024, 3, 15)).unwrap().id, "today");
        assert!(find_day(&rows, d(2024, 3, 16)).is_err());
    }

    #[test]
    fn test_find_day_by_manual_range_start() {
        let rows = vec![row("manual", d(2024, 3, 15), d(2024, 3, 15))];

        assert_eq!(find_day(&rows, d(2024, 3, 15)).unwrap().id, "manual");
    }

    #[test]
    fn test_month_bounds_regular_months() {
        assert_eq!(
            month_bounds(d(2024, 4, 17)),
            DateRange::new(d(2024, 4, 1), d(2024, 4, 30))
        );
        assert_eq!(
            month_bounds(d(2024, 1, 31)),
            DateRange::new(d(2024, 1, 1), d(2024, 1, 31))
        );
    }

    #[test]
    fn test_month_bounds_february() {
        // leap year
        assert_eq!(
            month_bounds(d(2024, 2, 10)),
            DateRange::new(d(2024, 2, 1), d(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(d(2023, 2, 10)),
            DateRange::new(d(2023, 2, 1), d(2023, 2, 28))
        );
    }

    #[test]
    fn test_month_bounds_december_wraps_year() {
        assert_eq!(
            month_bounds(d(2024, 12, 25)),
            DateRange::new(d(2024, 12, 1), d(2024, 12, 31))
        );
    }

    #[test]
    fn test_week_bounds_is_five_days_after_start() {
        assert_eq!(
            week_bounds(d(2024, 3, 4)),
            DateRange::new(d(2024, 3, 4), d(2024, 3, 9))
        );
        // spans a month boundary
        assert_eq!(
            week_bounds(d(2024, 2, 28)),
            DateRange::new(d(2024, 2, 28), d(2024, 3, 4))
        );
    }
}
