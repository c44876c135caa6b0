use chrono::NaiveDateTime;
use serde::Serialize;

/// An office alert shown on the announcement board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: i64,
    pub description: String,
    pub selected: bool,
    pub created_at: NaiveDateTime,
}
