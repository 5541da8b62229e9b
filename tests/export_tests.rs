use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_staff, pl, punch_at, setup_test_db, temp_out};

fn seed_week(db_path: &str) {
    punch_at(db_path, "EMP1", "in", "2025-06-02 09:00");
    punch_at(db_path, "EMP1", "break-in", "2025-06-02 12:00");
    punch_at(db_path, "EMP1", "break-out", "2025-06-02 12:30");
    punch_at(db_path, "EMP1", "out", "2025-06-02 17:00");
    punch_at(db_path, "EMP2", "in", "2025-06-03 10:00");
    punch_at(db_path, "EMP2", "out", "2025-06-03 14:00");
}

#[test]
fn test_export_report_csv() {
    let db_path = setup_test_db("export_report_csv");
    let out = temp_out("report_csv", "csv");
    init_db_with_staff(&db_path);
    seed_week(&db_path);

    pl().args([
        "--db", &db_path, "--test", "export",
        "--format", "csv", "--file", &out,
        "--from", "2025-06-01", "--to", "2025-06-30",
    ])
    .assert()
    .success()
    .stdout(contains("export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.starts_with("Name,Worked Hours,Break Hours,Total Hours"));
    assert!(content.contains("Alice Carter,8.00,0.50,8.50"));
    assert!(content.contains("Bob Reyes,4.00,0.00,4.00"));
}

#[test]
fn test_export_report_json() {
    let db_path = setup_test_db("export_report_json");
    let out = temp_out("report_json", "json");
    init_db_with_staff(&db_path);
    seed_week(&db_path);

    pl().args([
        "--db", &db_path, "--test", "export",
        "--format", "json", "--file", &out,
        "--from", "2025-06-01", "--to", "2025-06-30",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 2);

    let alice = rows
        .iter()
        .find(|r| r["employee_code"] == "EMP1")
        .expect("alice row");
    assert_eq!(alice["worked_hours"], 8.0);
    assert_eq!(alice["break_hours"], 0.5);
    assert_eq!(alice["total_hours"], 8.5);
}

#[test]
fn test_export_report_pdf() {
    let db_path = setup_test_db("export_report_pdf");
    let out = temp_out("report_pdf", "pdf");
    init_db_with_staff(&db_path);
    seed_week(&db_path);

    pl().args([
        "--db", &db_path, "--test", "export",
        "--format", "pdf", "--file", &out,
    ])
    .assert()
    .success();

    let bytes = fs::read(&out).expect("read export");
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 200);
}

#[test]
fn test_export_punches_csv() {
    let db_path = setup_test_db("export_punches_csv");
    let out = temp_out("punches_csv", "csv");
    init_db_with_staff(&db_path);
    seed_week(&db_path);

    pl().args([
        "--db", &db_path, "--test", "export",
        "--format", "csv", "--file", &out, "--punches",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.starts_with("employee,kind,timestamp,source"));
    assert!(content.contains("EMP1,IN,2025-06-02 09:00:00,cli"));
    assert!(content.contains("EMP2,OUT,2025-06-03 14:00:00,cli"));
}

#[test]
fn test_export_punches_pdf_not_supported() {
    let db_path = setup_test_db("export_punches_pdf");
    let out = temp_out("punches_pdf", "pdf");
    init_db_with_staff(&db_path);

    pl().args([
        "--db", &db_path, "--test", "export",
        "--format", "pdf", "--file", &out, "--punches",
    ])
    .assert()
    .failure()
    .stderr(contains("only available for reports"));
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = setup_test_db("export_no_overwrite");
    let out = temp_out("overwrite", "csv");
    init_db_with_staff(&db_path);
    seed_week(&db_path);

    pl().args(["--db", &db_path, "--test", "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    pl().args(["--db", &db_path, "--test", "export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    // forced overwrite succeeds
    pl().args([
        "--db", &db_path, "--test", "export",
        "--format", "csv", "--file", &out, "--force",
    ])
    .assert()
    .success();
}
