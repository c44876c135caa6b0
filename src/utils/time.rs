//! Time utilities: parsing HH:MM and timestamps, storage format, "now".

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

/// Storage format for every timestamp column.
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

pub fn parse_ts(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).ok()
}

/// Accepts "YYYY-MM-DD HH:MM" or "YYYY-MM-DD HH:MM:SS" (CLI `--at`).
pub fn parse_user_ts(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, TS_FORMAT))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// Local wall-clock now, second precision.
pub fn now() -> NaiveDateTime {
    let n = Local::now().naive_local();
    n.with_nanosecond(0).unwrap_or(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_format_round_trips() {
        let ts = parse_user_ts("2025-03-04 09:05").unwrap();
        assert_eq!(format_ts(&ts), "2025-03-04 09:05:00");
        assert_eq!(parse_ts("2025-03-04 09:05:00"), Some(ts));
    }

    #[test]
    fn rejects_bad_times() {
        assert!(parse_time("25:99").is_none());
        assert!(parse_user_ts("yesterday").is_err());
    }
}
