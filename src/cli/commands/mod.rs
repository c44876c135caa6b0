//! Subcommand handlers. Each one gets the parsed command and the shared
//! run context built once in `run()`.

pub mod alert;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod init;
pub mod log;
pub mod report;
pub mod session;
pub mod user;

use crate::config::{Config, Settings};
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::date::parse_date;
use chrono::{NaiveDate, NaiveDateTime};

pub struct RunContext {
    pub cfg: Config,
    pub settings: Settings,
    pub now: NaiveDateTime,
    pub user_id: Option<i64>,
}

impl RunContext {
    pub fn open_store(&self) -> AppResult<SqliteStore> {
        SqliteStore::open(&self.cfg.database)
    }

    /// The acting user, which must exist in the store.
    pub fn current_user(&self, store: &dyn RecordStore) -> AppResult<User> {
        let id = self.user_id.ok_or(AppError::NotAuthenticated)?;
        store.get_user(id).map_err(|e| {
            if e.is_not_found() {
                AppError::NotAuthenticated
            } else {
                e
            }
        })
    }

    pub fn anchor_date(&self, date: &Option<String>) -> AppResult<NaiveDate> {
        match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())),
            None => Ok(self.now.date()),
        }
    }
}
