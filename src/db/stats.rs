use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Users", "users"),
        ("Attendance sessions", "attendance_logs"),
        ("Attendance breaks", "breaks"),
        ("Overtime sessions", "extrahours"),
        ("Overtime breaks", "overtime_breaks"),
        ("Alerts", "alerts"),
    ] {
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = conn
        .query_row(
            "SELECT substr(check_in, 1, 10) FROM attendance_logs ORDER BY check_in ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = conn
        .query_row(
            "SELECT substr(check_in, 1, 10) FROM attendance_logs ORDER BY check_in DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Attendance range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) OPEN SESSIONS (possible leftovers from concurrent check-ins)
    //
    let open: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM attendance_logs WHERE check_out IS NULL)
              + (SELECT COUNT(*) FROM extrahours WHERE check_out IS NULL)",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Open sessions:{} {}", CYAN, RESET, open);

    println!();
    Ok(())
}
