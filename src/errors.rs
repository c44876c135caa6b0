//! Unified application error type.
//! All modules (db, store, core, cli, notifier) return AppError to keep the
//! error handling consistent and easy to manage.

use crate::core::geo::GeoError;
use rusqlite::ErrorCode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Temporary service failure: {0}")]
    TransientIo(String),

    // ---------------------------
    // Record store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("No matching record: {0}")]
    NotFound(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid view: {0} (use daily, weekly or monthly)")]
    InvalidView(String),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Session state
    // ---------------------------
    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Already checked in since {0}")]
    AlreadyCheckedIn(String),

    #[error("No active {0} record found")]
    NoActiveSession(&'static str),

    #[error("A break is already in progress since {0}")]
    AlreadyOnBreak(String),

    #[error("No break in progress")]
    NoOpenBreak,

    // ---------------------------
    // External dependencies
    // ---------------------------
    #[error("Location unavailable: {0}")]
    Geolocation(#[from] GeoError),

    #[error("Notification failed: {0}")]
    Notifier(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ---------------------------
    // Config / serialization
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Errors worth another attempt: network hiccups and a busy/locked database.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::TransientIo(_) => true,
            AppError::Db(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ),
            AppError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// "No rows matched" — an empty result, not a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::Db(rusqlite::Error::QueryReturnedNoRows)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_database_is_transient() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(AppError::Db(busy).is_transient());
        assert!(AppError::TransientIo("timeout".into()).is_transient());
    }

    #[test]
    fn validation_is_not_transient() {
        assert!(!AppError::Validation("empty".into()).is_transient());
        assert!(!AppError::NotFound("x".into()).is_transient());
    }

    #[test]
    fn no_rows_counts_as_not_found() {
        assert!(AppError::Db(rusqlite::Error::QueryReturnedNoRows).is_not_found());
        assert!(AppError::NotFound("session".into()).is_not_found());
        assert!(!AppError::NoOpenBreak.is_not_found());
    }
}
