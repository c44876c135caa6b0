use crate::utils::date::is_weekend;
use chrono::NaiveDate;

/// Weekdays (Mon–Fri) from `start` through the earlier of `end` and `today`.
pub fn expected_working_days(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> u32 {
    let last = end.min(today);
    if start > last {
        return 0;
    }

    start
        .iter_days()
        .take_while(|d| *d <= last)
        .filter(|d| !is_weekend(*d))
        .count() as u32
}
