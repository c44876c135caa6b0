use serde::Serialize;

/// The two independently tracked session flows. Both share the same row
/// layout and differ only in the tables they live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Attendance,
    Overtime,
}

impl SessionKind {
    pub fn sessions_table(&self) -> &'static str {
        match self {
            SessionKind::Attendance => "attendance_logs",
            SessionKind::Overtime => "extrahours",
        }
    }

    pub fn breaks_table(&self) -> &'static str {
        match self {
            SessionKind::Attendance => "breaks",
            SessionKind::Overtime => "overtime_breaks",
        }
    }

    /// Human label, also used as the audit-log target.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Attendance => "attendance",
            SessionKind::Overtime => "overtime",
        }
    }

    pub fn from_overtime_flag(overtime: bool) -> Self {
        if overtime {
            SessionKind::Overtime
        } else {
            SessionKind::Attendance
        }
    }
}
