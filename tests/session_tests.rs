use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{OFFICE_LAT, OFFICE_LON, checkin_at_office, ems, ems_as, init_db_with_users, setup_test_db};

#[test]
fn test_checkin_at_office_is_on_site() {
    let db_path = setup_test_db("checkin_on_site");
    init_db_with_users(&db_path);

    ems_as(
        &db_path,
        "1",
        "2025-03-03 09:00",
        &["checkin", "--lat", OFFICE_LAT, "--lon", OFFICE_LON],
    )
    .assert()
    .success()
    .stdout(contains("Checked in (attendance) at 2025-03-03 09:00:00"))
    .stdout(contains("On-site"));

    ems_as(&db_path, "1", "2025-03-03 10:30", &["status"])
        .assert()
        .success()
        .stdout(contains("Checked in since 2025-03-03 09:00:00"))
        .stdout(contains("Elapsed: 1h 30m"));
}

#[test]
fn test_checkin_far_away_is_remote() {
    let db_path = setup_test_db("checkin_remote");
    init_db_with_users(&db_path);

    ems_as(
        &db_path,
        "1",
        "2025-03-03 09:00",
        &["checkin", "--lat", "33.6844", "--lon", "73.0479"],
    )
    .assert()
    .success()
    .stdout(contains("Remote"));
}

#[test]
fn test_double_checkin_is_refused() {
    let db_path = setup_test_db("double_checkin");
    init_db_with_users(&db_path);
    checkin_at_office(&db_path, "2025-03-03 09:00");

    ems_as(
        &db_path,
        "1",
        "2025-03-03 09:10",
        &["checkin", "--lat", OFFICE_LAT, "--lon", OFFICE_LON],
    )
    .assert()
    .failure()
    .stderr(contains("Already checked in since 2025-03-03 09:00:00"));
}

#[test]
fn test_checkin_without_location_fails() {
    let db_path = setup_test_db("checkin_no_location");
    init_db_with_users(&db_path);

    ems_as(&db_path, "1", "2025-03-03 09:00", &["checkin"])
        .assert()
        .failure()
        .stderr(contains("Location unavailable"));

    ems_as(&db_path, "1", "2025-03-03 09:00", &["checkin", "--deny-location"])
        .assert()
        .failure()
        .stderr(contains("denied"));

    ems_as(&db_path, "1", "2025-03-03 09:05", &["status"])
        .assert()
        .success()
        .stdout(contains("Checked out"));
}

#[test]
fn test_unknown_user_is_not_authenticated() {
    let db_path = setup_test_db("unknown_user");
    init_db_with_users(&db_path);

    ems_as(
        &db_path,
        "99",
        "2025-03-03 09:00",
        &["checkin", "--lat", OFFICE_LAT, "--lon", OFFICE_LON],
    )
    .assert()
    .failure()
    .stderr(contains("User not authenticated"));
}

#[test]
fn test_break_toggle_totals_fifteen_minutes() {
    let db_path = setup_test_db("break_toggle");
    init_db_with_users(&db_path);
    checkin_at_office(&db_path, "2025-03-03 09:00");

    ems_as(&db_path, "1", "2025-03-03 10:00", &["break"])
        .assert()
        .success()
        .stdout(contains("Break started at 2025-03-03 10:00:00"));

    ems_as(&db_path, "1", "2025-03-03 10:05", &["status"])
        .assert()
        .success()
        .stdout(contains("On break since 2025-03-03 10:00:00"));

    ems_as(&db_path, "1", "2025-03-03 10:15", &["break"])
        .assert()
        .success()
        .stdout(contains("Break ended"))
        .stdout(contains("Total break time: 0h 15m (1 breaks)"));
}

#[test]
fn test_break_end_without_break_fails() {
    let db_path = setup_test_db("break_end_none");
    init_db_with_users(&db_path);
    checkin_at_office(&db_path, "2025-03-03 09:00");

    ems_as(&db_path, "1", "2025-03-03 10:00", &["break", "end"])
        .assert()
        .failure()
        .stderr(contains("No break in progress"));
}

#[test]
fn test_checkout_while_on_break_closes_break_first() {
    let db_path = setup_test_db("checkout_on_break");
    init_db_with_users(&db_path);
    checkin_at_office(&db_path, "2025-03-03 09:00");

    ems_as(&db_path, "1", "2025-03-03 13:30", &["break", "start"])
        .assert()
        .success();

    ems_as(&db_path, "1", "2025-03-03 14:30", &["checkout"])
        .assert()
        .success()
        .stdout(contains("Checked out (attendance) at 2025-03-03 14:30:00 after 5h 30m"));

    ems_as(&db_path, "1", "2025-03-03 14:35", &["status"])
        .assert()
        .success()
        .stdout(contains("Checked out"))
        .stdout(contains("On break").not());

    ems_as(&db_path, "1", "2025-03-03 15:00", &["report"])
        .assert()
        .success()
        .stdout(contains("13:30 → 14:30"))
        .stdout(contains("late"));
}

#[test]
fn test_checkout_without_session_fails() {
    let db_path = setup_test_db("checkout_none");
    init_db_with_users(&db_path);

    ems_as(&db_path, "1", "2025-03-03 17:00", &["checkout"])
        .assert()
        .failure()
        .stderr(contains("No active attendance record found"));
}

#[test]
fn test_overtime_is_independent_of_attendance() {
    let db_path = setup_test_db("overtime_flow");
    init_db_with_users(&db_path);
    checkin_at_office(&db_path, "2025-03-03 09:00");

    ems_as(
        &db_path,
        "1",
        "2025-03-03 18:00",
        &["checkin", "--overtime", "--lat", OFFICE_LAT, "--lon", OFFICE_LON],
    )
    .assert()
    .success()
    .stdout(contains("Checked in (overtime)"));

    ems_as(&db_path, "1", "2025-03-03 20:00", &["checkout", "--overtime"])
        .assert()
        .success()
        .stdout(contains("after 2h 0m"));

    // attendance session is still open
    ems_as(&db_path, "1", "2025-03-03 20:05", &["status"])
        .assert()
        .success()
        .stdout(contains("Checked in since 2025-03-03 09:00:00"));
}

#[test]
fn test_yesterdays_open_session_is_not_restored() {
    let db_path = setup_test_db("stale_open_session");
    init_db_with_users(&db_path);
    checkin_at_office(&db_path, "2025-03-03 09:00");

    // a new day starts checked out, so a new check-in is allowed
    checkin_at_office(&db_path, "2025-03-04 09:00");

    ems()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Open sessions:\x1b[0m 2"));
}
