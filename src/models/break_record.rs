use super::work_mode::BreakStatus;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakRecord {
    pub id: i64,
    pub session_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub status: BreakStatus,
}

impl BreakRecord {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Minutes spent on a closed break; open breaks count as zero.
    pub fn closed_minutes(&self) -> i64 {
        match self.end_time {
            Some(end) => (end - self.start_time).num_minutes().max(0),
            None => 0,
        }
    }
}
