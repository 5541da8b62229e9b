#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pl() -> Command {
    cargo_bin_cmd!("punchledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and register two employees used by many tests
pub fn init_db_with_staff(db_path: &str) {
    pl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    pl().args([
        "--db",
        db_path,
        "--test",
        "employee",
        "add",
        "EMP1",
        "Alice Carter",
        "--email",
        "alice@smilecastle.example",
    ])
    .assert()
    .success();

    pl().args(["--db", db_path, "--test", "employee", "add", "EMP2", "Bob Reyes"])
        .assert()
        .success();
}

/// Record a punch at a fixed timestamp via the CLI
pub fn punch_at(db_path: &str, code: &str, kind: &str, at: &str) {
    pl().args(["--db", db_path, "--test", "punch", code, kind, "--at", at])
        .assert()
        .success();
}

/// Open the DB directly through the library (for seeding and assertions)
pub fn open_pool(db_path: &str) -> punchledger::db::pool::DbPool {
    punchledger::db::pool::DbPool::new(db_path).expect("open db")
}
