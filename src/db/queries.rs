use crate::errors::{AppError, AppResult};
use crate::models::alert::Alert;
use crate::models::break_record::BreakRecord;
use crate::models::session::{NewSession, SessionRecord};
use crate::models::session_kind::SessionKind;
use crate::models::user::{Role, User};
use crate::models::work_mode::{AttendanceStatus, BreakStatus, WorkMode};
use crate::utils::time::{format_ts, parse_ts};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

/// Row filter for session reads. Bounds are inclusive on `check_in`.
#[derive(Debug, Clone)]
pub struct SessionFilter {
    pub user_id: i64,
    pub check_in_from: Option<NaiveDateTime>,
    pub check_in_to: Option<NaiveDateTime>,
    pub open_only: bool,
    pub newest_first: bool,
    pub limit: Option<usize>,
}

impl SessionFilter {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            check_in_from: None,
            check_in_to: None,
            open_only: false,
            newest_first: true,
            limit: None,
        }
    }

    pub fn between(mut self, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        self.check_in_from = Some(from);
        self.check_in_to = Some(to);
        self
    }

    pub fn open_only(mut self) -> Self {
        self.open_only = true;
        self
    }

    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn ts_column(row: &Row, name: &str) -> Result<NaiveDateTime> {
    let raw: String = row.get(name)?;
    parse_ts(&raw).ok_or_else(|| conversion_error(0, AppError::InvalidTime(raw.clone())))
}

fn opt_ts_column(row: &Row, name: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(name)?;
    match raw {
        Some(s) => parse_ts(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(0, AppError::InvalidTime(s.clone()))),
        None => Ok(None),
    }
}

pub fn map_session(row: &Row) -> Result<SessionRecord> {
    let mode_str: String = row.get("work_mode")?;
    let work_mode = WorkMode::from_db_str(&mode_str).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid work mode: {}", mode_str)))
    })?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid status: {}", status_str)))
    })?;

    Ok(SessionRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        check_in: ts_column(row, "check_in")?,
        check_out: opt_ts_column(row, "check_out")?,
        work_mode,
        status,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        site: row.get("site")?,
    })
}

pub fn map_break(row: &Row) -> Result<BreakRecord> {
    let status_str: String = row.get("status")?;
    let status = BreakStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid break status: {}", status_str)))
    })?;

    Ok(BreakRecord {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        start_time: ts_column(row, "start_time")?,
        end_time: opt_ts_column(row, "end_time")?,
        status,
    })
}

pub fn map_alert(row: &Row) -> Result<Alert> {
    Ok(Alert {
        id: row.get("id")?,
        description: row.get("description")?,
        selected: row.get::<_, i64>("selected")? == 1,
        created_at: ts_column(row, "created_at")?,
    })
}

pub fn map_user(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(0, AppError::Other(format!("Invalid role: {}", role_str))))?;

    Ok(User {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        personal_email: row.get("personal_email")?,
        role,
        created_at: ts_column(row, "created_at")?,
    })
}

// ---------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------

pub fn insert_user(
    conn: &Connection,
    full_name: &str,
    email: &str,
    role: Role,
    created_at: NaiveDateTime,
) -> AppResult<User> {
    conn.execute(
        "INSERT INTO users (full_name, personal_email, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![full_name, email, role.to_db_str(), format_ts(&created_at)],
    )?;
    load_user(conn, conn.last_insert_rowid())
}

pub fn load_user(conn: &Connection, id: i64) -> AppResult<User> {
    conn.query_row("SELECT * FROM users WHERE id = ?1", [id], map_user)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
}

pub fn load_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY full_name ASC, id ASC")?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------

pub fn load_sessions(
    conn: &Connection,
    kind: SessionKind,
    filter: &SessionFilter,
) -> AppResult<Vec<SessionRecord>> {
    let mut sql = format!("SELECT * FROM {} WHERE user_id = ?", kind.sessions_table());
    let mut args: Vec<Box<dyn ToSql>> = vec![Box::new(filter.user_id)];

    if let Some(from) = filter.check_in_from {
        sql.push_str(" AND check_in >= ?");
        args.push(Box::new(format_ts(&from)));
    }
    if let Some(to) = filter.check_in_to {
        sql.push_str(" AND check_in <= ?");
        args.push(Box::new(format_ts(&to)));
    }
    if filter.open_only {
        sql.push_str(" AND check_out IS NULL");
    }

    if filter.newest_first {
        sql.push_str(" ORDER BY check_in DESC, id DESC");
    } else {
        sql.push_str(" ORDER BY check_in ASC, id ASC");
    }

    if let Some(n) = filter.limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        map_session,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_session(
    conn: &Connection,
    kind: SessionKind,
    new: &NewSession,
) -> AppResult<SessionRecord> {
    conn.execute(
        &format!(
            "INSERT INTO {} (user_id, check_in, check_out, work_mode, status, latitude, longitude, site)
             VALUES (?1, ?2, NULL, ?3, ?4, ?5, ?6, ?7)",
            kind.sessions_table()
        ),
        params![
            new.user_id,
            format_ts(&new.check_in),
            new.work_mode.to_db_str(),
            new.status.to_db_str(),
            new.latitude,
            new.longitude,
            new.site,
        ],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT * FROM {} WHERE id = ?1", kind.sessions_table()),
        [id],
        map_session,
    )
    .map_err(AppError::from)
}

/// Set check-out only while it is still NULL. Returns the affected row count.
pub fn close_session(
    conn: &Connection,
    kind: SessionKind,
    id: i64,
    check_out: NaiveDateTime,
) -> AppResult<usize> {
    let n = conn.execute(
        &format!(
            "UPDATE {} SET check_out = ?1 WHERE id = ?2 AND check_out IS NULL",
            kind.sessions_table()
        ),
        params![format_ts(&check_out), id],
    )?;
    Ok(n)
}

// ---------------------------------------------------------------------
// Breaks
// ---------------------------------------------------------------------

pub fn load_breaks(
    conn: &Connection,
    kind: SessionKind,
    session_id: i64,
) -> AppResult<Vec<BreakRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT * FROM {} WHERE session_id = ?1 ORDER BY start_time ASC, id ASC",
        kind.breaks_table()
    ))?;
    let rows = stmt.query_map([session_id], map_break)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_break(
    conn: &Connection,
    kind: SessionKind,
    session_id: i64,
    start: NaiveDateTime,
) -> AppResult<BreakRecord> {
    conn.execute(
        &format!(
            "INSERT INTO {} (session_id, start_time, end_time, status)
             VALUES (?1, ?2, NULL, 'on_time')",
            kind.breaks_table()
        ),
        params![session_id, format_ts(&start)],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT * FROM {} WHERE id = ?1", kind.breaks_table()),
        [id],
        map_break,
    )
    .map_err(AppError::from)
}

/// Close every open break of a session. Returns the affected row count.
pub fn close_open_breaks(
    conn: &Connection,
    kind: SessionKind,
    session_id: i64,
    end: NaiveDateTime,
    status: BreakStatus,
) -> AppResult<usize> {
    let n = conn.execute(
        &format!(
            "UPDATE {} SET end_time = ?1, status = ?2
             WHERE session_id = ?3 AND end_time IS NULL",
            kind.breaks_table()
        ),
        params![format_ts(&end), status.to_db_str(), session_id],
    )?;
    Ok(n)
}

// ---------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------

pub fn insert_alert(
    conn: &Connection,
    description: &str,
    created_at: NaiveDateTime,
) -> AppResult<Alert> {
    conn.execute(
        "INSERT INTO alerts (description, selected, created_at) VALUES (?1, 0, ?2)",
        params![description, format_ts(&created_at)],
    )?;
    let id = conn.last_insert_rowid();
    conn.query_row("SELECT * FROM alerts WHERE id = ?1", [id], map_alert)
        .map_err(AppError::from)
}

pub fn update_alert_description(conn: &Connection, id: i64, description: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE alerts SET description = ?1 WHERE id = ?2",
        params![description, id],
    )?)
}

pub fn delete_alert(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM alerts WHERE id = ?1", [id])?)
}

pub fn load_alerts(conn: &Connection) -> AppResult<Vec<Alert>> {
    let mut stmt = conn.prepare("SELECT * FROM alerts ORDER BY created_at DESC, id DESC")?;
    let rows = stmt.query_map([], map_alert)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Mark exactly one alert as selected in a single statement.
/// Nothing changes (0 rows) when the target does not exist.
pub fn select_alert_exclusive(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE alerts
         SET selected = CASE WHEN id = ?1 THEN 1 ELSE 0 END
         WHERE EXISTS (SELECT 1 FROM alerts WHERE id = ?1)",
        [id],
    )?)
}
