use serde::Serialize;

/// Where a session was worked from, derived from the geofence at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkMode {
    OnSite,
    Remote,
}

impl WorkMode {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkMode::OnSite => "on_site",
            WorkMode::Remote => "remote",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "on_site" => Some(WorkMode::OnSite),
            "remote" => Some(WorkMode::Remote),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkMode::OnSite => "On-site",
            WorkMode::Remote => "Remote",
        }
    }
}

/// Punctuality of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
}

impl AttendanceStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "late" => Some(AttendanceStatus::Late),
            _ => None,
        }
    }
}

/// Break punctuality, assigned when the break is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakStatus {
    OnTime,
    Late,
}

impl BreakStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BreakStatus::OnTime => "on_time",
            BreakStatus::Late => "late",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "on_time" => Some(BreakStatus::OnTime),
            "late" => Some(BreakStatus::Late),
            _ => None,
        }
    }
}
