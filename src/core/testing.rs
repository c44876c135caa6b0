//! Fixtures shared by the core unit tests.

use crate::models::session::{NewSession, SessionRecord};
use crate::models::session_kind::SessionKind;
use crate::models::user::Role;
use crate::models::work_mode::{AttendanceStatus, WorkMode};
use crate::store::{RecordStore, SqliteStore};
use crate::utils::time::parse_user_ts;
use chrono::NaiveDateTime;

pub fn ts(s: &str) -> NaiveDateTime {
    parse_user_ts(s).unwrap()
}

pub fn seed_user(store: &SqliteStore) -> i64 {
    seed_named_user(store, "Ayesha Khan", "ayesha@example.com")
}

pub fn seed_named_user(store: &SqliteStore, name: &str, email: &str) -> i64 {
    store
        .insert_user(name, email, Role::Employee, ts("2025-01-01 08:00"))
        .unwrap()
        .id
}

/// Builder for a stored session row.
pub struct SessionSeed {
    user_id: i64,
    check_in: NaiveDateTime,
    check_out: Option<NaiveDateTime>,
    work_mode: WorkMode,
    status: AttendanceStatus,
}

impl SessionSeed {
    pub fn new(user_id: i64, check_in: &str) -> Self {
        Self {
            user_id,
            check_in: ts(check_in),
            check_out: None,
            work_mode: WorkMode::OnSite,
            status: AttendanceStatus::Present,
        }
    }

    pub fn out(mut self, check_out: &str) -> Self {
        self.check_out = Some(ts(check_out));
        self
    }

    pub fn remote(mut self) -> Self {
        self.work_mode = WorkMode::Remote;
        self
    }

    pub fn late(mut self) -> Self {
        self.status = AttendanceStatus::Late;
        self
    }

    pub fn insert(self, store: &SqliteStore, kind: SessionKind) -> SessionRecord {
        let rec = store
            .insert_session(
                kind,
                &NewSession {
                    user_id: self.user_id,
                    check_in: self.check_in,
                    work_mode: self.work_mode,
                    status: self.status,
                    latitude: 34.1299,
                    longitude: 72.4656,
                    site: None,
                },
            )
            .unwrap();

        match self.check_out {
            Some(out) => {
                store.close_session(kind, rec.id, out).unwrap();
                SessionRecord {
                    check_out: Some(out),
                    ..rec
                }
            }
            None => rec,
        }
    }
}
