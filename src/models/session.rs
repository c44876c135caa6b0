use super::work_mode::{AttendanceStatus, WorkMode};
use crate::utils::time::format_ts;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One attendance or overtime row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub id: i64,
    pub user_id: i64,             // ⇔ user_id (FK users.id)
    pub check_in: NaiveDateTime,  // ⇔ check_in (TEXT "YYYY-MM-DD HH:MM:SS")
    pub check_out: Option<NaiveDateTime>, // NULL while the session is open
    pub work_mode: WorkMode,
    pub status: AttendanceStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub site: Option<String>, // name of the matched geofence, if any
}

impl SessionRecord {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// Calendar day the session belongs to.
    pub fn day(&self) -> NaiveDate {
        self.check_in.date()
    }

    /// Elapsed minutes until check-out, or until `now` while still open.
    pub fn elapsed_minutes(&self, now: NaiveDateTime) -> i64 {
        let end = self.check_out.unwrap_or(now);
        (end - self.check_in).num_minutes().max(0)
    }

    /// Elapsed hours as a fraction, same end rule as `elapsed_minutes`.
    pub fn elapsed_hours(&self, now: NaiveDateTime) -> f64 {
        let end = self.check_out.unwrap_or(now);
        let secs = (end - self.check_in).num_seconds().max(0);
        secs as f64 / 3600.0
    }

    pub fn check_in_str(&self) -> String {
        format_ts(&self.check_in)
    }
}

/// Insert payload for a new session; `check_out` is always NULL.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub check_in: NaiveDateTime,
    pub work_mode: WorkMode,
    pub status: AttendanceStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub site: Option<String>,
}
