//! Record Store abstraction.
//!
//! Every entity the system owns lives behind this trait: reads with
//! filter/sort/limit, inserts, and updates-by-filter that report how many rows
//! matched. A read that must return exactly one row fails with
//! `AppError::NotFound` when nothing matched, which callers treat as an empty
//! result rather than a failure.

pub mod sqlite;

use crate::db::queries::SessionFilter;
use crate::errors::{AppError, AppResult};
use crate::models::alert::Alert;
use crate::models::break_record::BreakRecord;
use crate::models::session::{NewSession, SessionRecord};
use crate::models::session_kind::SessionKind;
use crate::models::user::{Role, User};
use crate::models::work_mode::BreakStatus;
use chrono::NaiveDateTime;

pub use sqlite::SqliteStore;

pub trait RecordStore {
    // users
    fn insert_user(
        &self,
        full_name: &str,
        email: &str,
        role: Role,
        created_at: NaiveDateTime,
    ) -> AppResult<User>;
    fn get_user(&self, id: i64) -> AppResult<User>;
    fn list_users(&self) -> AppResult<Vec<User>>;

    // sessions
    fn select_sessions(
        &self,
        kind: SessionKind,
        filter: &SessionFilter,
    ) -> AppResult<Vec<SessionRecord>>;
    fn insert_session(&self, kind: SessionKind, new: &NewSession) -> AppResult<SessionRecord>;
    /// Conditional on `check_out IS NULL`; returns matched rows.
    fn close_session(&self, kind: SessionKind, id: i64, check_out: NaiveDateTime)
    -> AppResult<usize>;

    /// Exactly one row: the first match of `filter`, or `NotFound`.
    fn single_session(&self, kind: SessionKind, filter: &SessionFilter) -> AppResult<SessionRecord> {
        let limited = filter.clone().limit(1);
        self.select_sessions(kind, &limited)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("{} session", kind.label())))
    }

    // breaks
    fn select_breaks(&self, kind: SessionKind, session_id: i64) -> AppResult<Vec<BreakRecord>>;
    fn insert_break(
        &self,
        kind: SessionKind,
        session_id: i64,
        start: NaiveDateTime,
    ) -> AppResult<BreakRecord>;
    /// Matches on session id AND `end_time IS NULL`; returns matched rows.
    fn close_open_breaks(
        &self,
        kind: SessionKind,
        session_id: i64,
        end: NaiveDateTime,
        status: BreakStatus,
    ) -> AppResult<usize>;

    // alerts
    fn insert_alert(&self, description: &str, created_at: NaiveDateTime) -> AppResult<Alert>;
    fn update_alert_description(&self, id: i64, description: &str) -> AppResult<usize>;
    fn delete_alert(&self, id: i64) -> AppResult<usize>;
    /// Newest first.
    fn select_alerts(&self) -> AppResult<Vec<Alert>>;
    /// Atomically make `id` the only selected alert; 0 when `id` is unknown.
    fn select_alert_exclusive(&self, id: i64) -> AppResult<usize>;

    // audit
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}
