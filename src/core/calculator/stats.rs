//! Monthly statistics over a set of session records.

use super::dedup::dedup_by_day;
use super::expected::expected_working_days;
use crate::models::session::SessionRecord;
use crate::models::work_mode::{AttendanceStatus, WorkMode};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Per-day hours are capped at this value.
pub const MAX_DAILY_HOURS: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub total_working_days: u32,
    pub present_days: u32,
    pub late_days: u32,
    pub on_site_days: u32,
    pub remote_days: u32,
    pub average_work_hours: f64,
    pub total_hours: f64,
    pub expected_working_days: u32,
    pub expected_hours: f64,
}

impl MonthlyStats {
    /// Attended ÷ expected days; undefined when nothing was expected.
    pub fn attendance_rate(&self) -> Option<f64> {
        if self.expected_working_days == 0 {
            None
        } else {
            Some(self.total_working_days as f64 / self.expected_working_days as f64)
        }
    }
}

fn count_days(days: &[SessionRecord], pred: impl Fn(&SessionRecord) -> bool) -> u32 {
    days.iter().filter(|&r| pred(r)).count() as u32
}

/// Aggregate `records` over `[start, end]`. Records are deduplicated by day
/// first; open ones count up to `now`.
pub fn compute(
    records: &[SessionRecord],
    start: NaiveDate,
    end: NaiveDate,
    now: NaiveDateTime,
    expected_daily_hours: f64,
) -> MonthlyStats {
    let days = dedup_by_day(records);

    let total_hours: f64 = days
        .iter()
        .map(|r| r.elapsed_hours(now).min(MAX_DAILY_HOURS))
        .sum();

    let total_working_days = days.len() as u32;
    let average_work_hours = if total_working_days == 0 {
        0.0
    } else {
        total_hours / total_working_days as f64
    };

    let expected = expected_working_days(start, end, now.date());

    MonthlyStats {
        total_working_days,
        present_days: count_days(&days, |r| r.status == AttendanceStatus::Present),
        late_days: count_days(&days, |r| r.status == AttendanceStatus::Late),
        on_site_days: count_days(&days, |r| r.work_mode == WorkMode::OnSite),
        remote_days: count_days(&days, |r| r.work_mode == WorkMode::Remote),
        average_work_hours,
        total_hours,
        expected_working_days: expected,
        expected_hours: expected_daily_hours * expected as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::ts;

    fn rec(id: i64, cin: &str, cout: Option<&str>) -> SessionRecord {
        SessionRecord {
            id,
            user_id: 1,
            check_in: ts(cin),
            check_out: cout.map(ts),
            work_mode: WorkMode::OnSite,
            status: AttendanceStatus::Present,
            latitude: 0.0,
            longitude: 0.0,
            site: None,
        }
    }

    fn march() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        )
    }

    #[test]
    fn nothing_attended_of_twenty_expected() {
        let (s, e) = march();
        // 2025-03-28 is the 20th weekday of the month
        let stats = compute(&[], s, e, ts("2025-03-28 18:00"), 8.0);
        assert_eq!(stats.expected_working_days, 20);
        assert_eq!(stats.attendance_rate(), Some(0.0));
        assert_eq!(stats.average_work_hours, 0.0);
        assert_eq!(stats.expected_hours, 160.0);
    }

    #[test]
    fn average_times_days_matches_total() {
        let (s, e) = march();
        let a = rec(1, "2025-03-03 09:00", Some("2025-03-03 17:30"));
        let mut b = rec(2, "2025-03-04 09:45", Some("2025-03-04 16:00"));
        b.status = AttendanceStatus::Late;
        b.work_mode = WorkMode::Remote;
        // second record on the same day is ignored
        let dup = rec(3, "2025-03-03 18:00", Some("2025-03-03 20:00"));

        let stats = compute(&[b, dup, a], s, e, ts("2025-03-05 12:00"), 8.0);
        assert_eq!(stats.total_working_days, 2);
        assert_eq!(stats.present_days, 1);
        assert_eq!(stats.late_days, 1);
        assert_eq!(stats.on_site_days, 1);
        assert_eq!(stats.remote_days, 1);
        assert!((stats.total_hours - 14.75).abs() < 1e-9);
        assert!((stats.average_work_hours * 2.0 - stats.total_hours).abs() < 1e-9);
        assert_eq!(stats.expected_working_days, 3);
    }

    #[test]
    fn open_record_counts_until_now_and_is_capped() {
        let (s, e) = march();
        let open = rec(1, "2025-03-03 09:00", None);
        let stats = compute(&[open.clone()], s, e, ts("2025-03-03 11:30"), 8.0);
        assert!((stats.total_hours - 2.5).abs() < 1e-9);

        let stats = compute(&[open], s, e, ts("2025-03-06 09:00"), 8.0);
        assert_eq!(stats.total_hours, MAX_DAILY_HOURS);
    }

    #[test]
    fn rate_is_undefined_without_expected_days() {
        let (s, e) = march();
        let stats = compute(&[], s, e, ts("2025-03-02 10:00"), 8.0);
        assert_eq!(stats.expected_working_days, 0);
        assert_eq!(stats.attendance_rate(), None);
    }
}
