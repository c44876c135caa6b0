use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Session tables share one layout; only the names differ.
fn session_tables_sql(sessions: &str, breaks: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {sessions} (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id),
            check_in   TEXT NOT NULL,
            check_out  TEXT,
            work_mode  TEXT NOT NULL CHECK(work_mode IN ('on_site','remote')),
            status     TEXT NOT NULL DEFAULT 'present' CHECK(status IN ('present','late')),
            latitude   REAL NOT NULL,
            longitude  REAL NOT NULL,
            CHECK(check_out IS NULL OR check_out > check_in)
        );

        CREATE INDEX IF NOT EXISTS idx_{sessions}_user_check_in ON {sessions}(user_id, check_in);

        CREATE TABLE IF NOT EXISTS {breaks} (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  INTEGER NOT NULL REFERENCES {sessions}(id),
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            status      TEXT NOT NULL DEFAULT 'on_time' CHECK(status IN ('on_time','late'))
        );

        CREATE INDEX IF NOT EXISTS idx_{breaks}_session ON {breaks}(session_id, start_time);
        "#
    )
}

fn migrate_create_core_tables(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_create_core_tables";
    if is_applied(conn, version)? {
        return Ok(());
    }

    let mut sql = String::from(
        r#"
        BEGIN;

        CREATE TABLE IF NOT EXISTS users (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name      TEXT NOT NULL,
            personal_email TEXT NOT NULL,
            role           TEXT NOT NULL DEFAULT 'employee' CHECK(role IN ('employee','admin')),
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS alerts (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            description  TEXT NOT NULL,
            selected     INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL
        );
        "#,
    );
    sql.push_str(&session_tables_sql("attendance_logs", "breaks"));
    sql.push_str(&session_tables_sql("extrahours", "overtime_breaks"));
    sql.push_str("COMMIT;");

    conn.execute_batch(&sql)?;
    mark_applied(conn, version, "Created users, sessions, breaks and alerts tables")?;

    success(format!("Migration applied: {}", version));
    Ok(())
}

/// Sessions remember which geofenced site matched at check-in.
fn migrate_add_site_column(conn: &Connection) -> Result<()> {
    let version = "20250415_0002_add_site_to_sessions";
    if is_applied(conn, version)? {
        return Ok(());
    }

    for table in ["attendance_logs", "extrahours"] {
        if !table_has_column(conn, table, "site")? {
            conn.execute(&format!("ALTER TABLE {table} ADD COLUMN site TEXT"), [])?;
        }
    }

    mark_applied(conn, version, "Added site column to session tables")?;
    success(format!("Migration applied: {}", version));
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    migrate_create_core_tables(conn)?;
    migrate_add_site_column(conn)?;
    Ok(())
}
