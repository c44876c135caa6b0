use crate::models::session::SessionRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Keep the earliest check-in of each calendar day (lowest id on ties),
/// returned in day order.
pub fn dedup_by_day(records: &[SessionRecord]) -> Vec<SessionRecord> {
    let mut by_day: BTreeMap<NaiveDate, &SessionRecord> = BTreeMap::new();

    for r in records {
        by_day
            .entry(r.day())
            .and_modify(|kept| {
                if (r.check_in, r.id) < (kept.check_in, kept.id) {
                    *kept = r;
                }
            })
            .or_insert(r);
    }

    by_day.into_values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::ts;
    use crate::models::work_mode::{AttendanceStatus, WorkMode};

    fn rec(id: i64, at: &str) -> SessionRecord {
        SessionRecord {
            id,
            user_id: 1,
            check_in: ts(at),
            check_out: None,
            work_mode: WorkMode::OnSite,
            status: AttendanceStatus::Present,
            latitude: 0.0,
            longitude: 0.0,
            site: None,
        }
    }

    #[test]
    fn earliest_per_day_wins() {
        let rows = vec![
            rec(3, "2025-03-03 13:00"),
            rec(1, "2025-03-03 09:00"),
            rec(2, "2025-03-04 10:00"),
        ];
        let out = dedup_by_day(&rows);
        assert_eq!(out.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let rows = vec![rec(9, "2025-03-03 09:00"), rec(4, "2025-03-03 09:00")];
        assert_eq!(dedup_by_day(&rows)[0].id, 4);
    }

    #[test]
    fn idempotent_and_order_independent() {
        let rows = vec![
            rec(1, "2025-03-03 09:00"),
            rec(2, "2025-03-03 08:00"),
            rec(3, "2025-03-05 10:00"),
            rec(4, "2025-03-04 11:00"),
        ];
        let once = dedup_by_day(&rows);
        assert_eq!(dedup_by_day(&once), once);

        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(dedup_by_day(&reversed), once);
    }
}
