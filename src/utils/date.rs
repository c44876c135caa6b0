use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn start_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

/// Last second of the day (23:59:59), inclusive bound.
pub fn end_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_hms_opt(23, 59, 59).unwrap_or_else(|| start_of_day(d))
}

pub fn start_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn end_of_month(d: NaiveDate) -> NaiveDate {
    start_of_month(d)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(d)
}

pub fn start_of_week(d: NaiveDate, week_start: Weekday) -> NaiveDate {
    d.week(week_start).first_day()
}

pub fn end_of_week(d: NaiveDate, week_start: Weekday) -> NaiveDate {
    d.week(week_start).last_day()
}

pub fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parse a configured week-start name.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "sunday" | "sun" => Some(Weekday::Sun),
        "saturday" | "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_bounds_handle_leap_years() {
        assert_eq!(end_of_month(d(2024, 2, 10)), d(2024, 2, 29));
        assert_eq!(end_of_month(d(2025, 12, 31)), d(2025, 12, 31));
        assert_eq!(start_of_month(d(2025, 12, 31)), d(2025, 12, 1));
    }

    #[test]
    fn week_bounds_follow_week_start() {
        // 2025-03-05 is a Wednesday
        assert_eq!(start_of_week(d(2025, 3, 5), Weekday::Sun), d(2025, 3, 2));
        assert_eq!(end_of_week(d(2025, 3, 5), Weekday::Sun), d(2025, 3, 8));
        assert_eq!(start_of_week(d(2025, 3, 5), Weekday::Mon), d(2025, 3, 3));
    }
}
