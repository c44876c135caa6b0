#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const OFFICE_LAT: &str = "34.1299";
pub const OFFICE_LON: &str = "72.4656";

pub fn ems() -> Command {
    let mut cmd = cargo_bin_cmd!("emstrack");
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_emstrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// `ems --db <db> --test --user <user> --at <at> <args…>`
pub fn ems_as(db_path: &str, user: &str, at: &str, args: &[&str]) -> Command {
    let mut cmd = ems();
    cmd.args(["--db", db_path, "--test", "--user", user, "--at", at]);
    cmd.args(args);
    cmd
}

/// Initialize the DB and register one employee (id 1) and one admin (id 2).
pub fn init_db_with_users(db_path: &str) {
    ems()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ems()
        .args([
            "--db",
            db_path,
            "--test",
            "user",
            "add",
            "--name",
            "Ayesha Khan",
            "--email",
            "ayesha@example.com",
        ])
        .assert()
        .success();

    ems()
        .args([
            "--db",
            db_path,
            "--test",
            "user",
            "add",
            "--name",
            "Omar Farooq",
            "--email",
            "omar@example.com",
            "--admin",
        ])
        .assert()
        .success();
}

/// Check in at the office at `at` as user 1.
pub fn checkin_at_office(db_path: &str, at: &str) {
    ems_as(
        db_path,
        "1",
        at,
        &["checkin", "--lat", OFFICE_LAT, "--lon", OFFICE_LON],
    )
    .assert()
    .success();
}
