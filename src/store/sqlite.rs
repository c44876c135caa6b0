use super::RecordStore;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{self, SessionFilter};
use crate::errors::AppResult;
use crate::models::alert::Alert;
use crate::models::break_record::BreakRecord;
use crate::models::session::{NewSession, SessionRecord};
use crate::models::session_kind::SessionKind;
use crate::models::user::{Role, User};
use crate::models::work_mode::BreakStatus;
use chrono::NaiveDateTime;
use rusqlite::Connection;

/// `RecordStore` backed by a local SQLite database.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl RecordStore for SqliteStore {
    fn insert_user(
        &self,
        full_name: &str,
        email: &str,
        role: Role,
        created_at: NaiveDateTime,
    ) -> AppResult<User> {
        queries::insert_user(self.conn(), full_name, email, role, created_at)
    }

    fn get_user(&self, id: i64) -> AppResult<User> {
        queries::load_user(self.conn(), id)
    }

    fn list_users(&self) -> AppResult<Vec<User>> {
        queries::load_users(self.conn())
    }

    fn select_sessions(
        &self,
        kind: SessionKind,
        filter: &SessionFilter,
    ) -> AppResult<Vec<SessionRecord>> {
        queries::load_sessions(self.conn(), kind, filter)
    }

    fn insert_session(&self, kind: SessionKind, new: &NewSession) -> AppResult<SessionRecord> {
        queries::insert_session(self.conn(), kind, new)
    }

    fn close_session(
        &self,
        kind: SessionKind,
        id: i64,
        check_out: NaiveDateTime,
    ) -> AppResult<usize> {
        queries::close_session(self.conn(), kind, id, check_out)
    }

    fn select_breaks(&self, kind: SessionKind, session_id: i64) -> AppResult<Vec<BreakRecord>> {
        queries::load_breaks(self.conn(), kind, session_id)
    }

    fn insert_break(
        &self,
        kind: SessionKind,
        session_id: i64,
        start: NaiveDateTime,
    ) -> AppResult<BreakRecord> {
        queries::insert_break(self.conn(), kind, session_id, start)
    }

    fn close_open_breaks(
        &self,
        kind: SessionKind,
        session_id: i64,
        end: NaiveDateTime,
        status: BreakStatus,
    ) -> AppResult<usize> {
        queries::close_open_breaks(self.conn(), kind, session_id, end, status)
    }

    fn insert_alert(&self, description: &str, created_at: NaiveDateTime) -> AppResult<Alert> {
        queries::insert_alert(self.conn(), description, created_at)
    }

    fn update_alert_description(&self, id: i64, description: &str) -> AppResult<usize> {
        queries::update_alert_description(self.conn(), id, description)
    }

    fn delete_alert(&self, id: i64) -> AppResult<usize> {
        queries::delete_alert(self.conn(), id)
    }

    fn select_alerts(&self) -> AppResult<Vec<Alert>> {
        queries::load_alerts(self.conn())
    }

    fn select_alert_exclusive(&self, id: i64) -> AppResult<usize> {
        queries::select_alert_exclusive(self.conn(), id)
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(self.conn(), operation, target, message)
    }
}
