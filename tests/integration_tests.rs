use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_staff, pl, punch_at, setup_test_db};

#[test]
fn test_employee_add_and_list() {
    let db_path = setup_test_db("employee_add_list");
    init_db_with_staff(&db_path);

    pl().args(["--db", &db_path, "--test", "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Alice Carter"))
        .stdout(contains("EMP1"))
        .stdout(contains("Bob Reyes"));
}

#[test]
fn test_duplicate_employee_code_rejected() {
    let db_path = setup_test_db("employee_dup");
    init_db_with_staff(&db_path);

    pl().args(["--db", &db_path, "--test", "employee", "add", "EMP1", "Impostor"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_status_follows_last_punch() {
    let db_path = setup_test_db("status_transitions");
    init_db_with_staff(&db_path);

    pl().args(["--db", &db_path, "--test", "status", "EMP1"])
        .assert()
        .success()
        .stdout(contains("Not Clocked In"));

    punch_at(&db_path, "EMP1", "in", "2025-06-02 09:00");
    pl().args(["--db", &db_path, "--test", "status", "EMP1"])
        .assert()
        .success()
        .stdout(contains("Clocked In"));

    punch_at(&db_path, "EMP1", "break-in", "2025-06-02 12:00");
    pl().args(["--db", &db_path, "--test", "status", "EMP1"])
        .assert()
        .success()
        .stdout(contains("On Break"));

    punch_at(&db_path, "EMP1", "break-out", "2025-06-02 12:30");
    pl().args(["--db", &db_path, "--test", "status", "EMP1"])
        .assert()
        .success()
        .stdout(contains("Returned from Break"));

    punch_at(&db_path, "EMP1", "out", "2025-06-02 17:00");
    pl().args(["--db", &db_path, "--test", "status", "EMP1"])
        .assert()
        .success()
        .stdout(contains("Clocked Out"));
}

#[test]
fn test_status_unknown_employee() {
    let db_path = setup_test_db("status_unknown");
    init_db_with_staff(&db_path);

    pl().args(["--db", &db_path, "--test", "status", "NOPE"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_punch_rejects_invalid_kind() {
    let db_path = setup_test_db("punch_bad_kind");
    init_db_with_staff(&db_path);

    pl().args(["--db", &db_path, "--test", "punch", "EMP1", "lunch"])
        .assert()
        .failure()
        .stderr(contains("Invalid punch kind"));
}

#[test]
fn test_punch_requires_password_when_set() {
    let db_path = setup_test_db("punch_password");
    init_db_with_staff(&db_path);

    pl().args([
        "--db", &db_path, "--test", "employee", "add", "EMP3", "Cara Jones",
        "--password", "hunter2",
    ])
    .assert()
    .success();

    // without password
    pl().args(["--db", &db_path, "--test", "punch", "EMP3", "in"])
        .assert()
        .failure()
        .stderr(contains("Authentication failed"));

    // with the right password
    pl().args([
        "--db", &db_path, "--test", "punch", "EMP3", "in",
        "--at", "2025-06-02 09:00", "--password", "hunter2",
    ])
    .assert()
    .success()
    .stdout(contains("Punch IN recorded"));
}

#[test]
fn test_history_annotates_per_employee_durations() {
    let db_path = setup_test_db("history_durations");
    init_db_with_staff(&db_path);

    punch_at(&db_path, "EMP1", "in", "2025-06-02 09:00");
    punch_at(&db_path, "EMP1", "break-in", "2025-06-02 12:00");
    punch_at(&db_path, "EMP1", "break-out", "2025-06-02 12:30");
    punch_at(&db_path, "EMP1", "out", "2025-06-02 17:00");

    pl().args(["--db", &db_path, "--test", "history", "--employee", "EMP1"])
        .assert()
        .success()
        .stdout(contains("2025"))
        .stdout(contains("June"))
        .stdout(contains("Week 1"))
        .stdout(contains("2025-06-02"))
        .stdout(contains("Worked 8.00h"))
        .stdout(contains("Break 0.50h"));
}

#[test]
fn test_history_week_boundaries() {
    let db_path = setup_test_db("history_weeks");
    init_db_with_staff(&db_path);

    // the 7th falls into Week 1, the 8th into Week 2
    punch_at(&db_path, "EMP1", "in", "2025-06-07 09:00");
    punch_at(&db_path, "EMP1", "in", "2025-06-08 09:00");

    pl().args(["--db", &db_path, "--test", "history", "--employee", "EMP1"])
        .assert()
        .success()
        .stdout(contains("Week 1"))
        .stdout(contains("Week 2"));
}

#[test]
fn test_history_all_employees_lists_names_without_durations() {
    let db_path = setup_test_db("history_all");
    init_db_with_staff(&db_path);

    punch_at(&db_path, "EMP1", "in", "2025-06-02 09:00");
    punch_at(&db_path, "EMP1", "out", "2025-06-02 17:00");
    punch_at(&db_path, "EMP2", "in", "2025-06-02 10:00");

    pl().args(["--db", &db_path, "--test", "history"])
        .assert()
        .success()
        .stdout(contains("Alice Carter"))
        .stdout(contains("Bob Reyes"))
        .stdout(contains("Worked").not());
}

#[test]
fn test_request_submit_requires_comment() {
    let db_path = setup_test_db("request_no_comment");
    init_db_with_staff(&db_path);

    pl().args([
        "--db", &db_path, "--test", "request", "submit", "EMP1",
        "--kind", "in", "--at", "2025-06-02 09:00", "--comment", "",
    ])
    .assert()
    .failure()
    .stderr(contains("Validation"));
}

#[test]
fn test_request_submit_rejects_bad_timestamp() {
    let db_path = setup_test_db("request_bad_ts");
    init_db_with_staff(&db_path);

    pl().args([
        "--db", &db_path, "--test", "request", "submit", "EMP1",
        "--kind", "in", "--at", "not-a-time", "--comment", "forgot",
    ])
    .assert()
    .failure()
    .stderr(contains("Validation"));
}

#[test]
fn test_request_lifecycle_approve() {
    let db_path = setup_test_db("request_approve");
    init_db_with_staff(&db_path);

    pl().args([
        "--db", &db_path, "--test", "request", "submit", "EMP1",
        "--kind", "in", "--at", "2025-06-02 09:00", "--comment", "forgot to clock in",
    ])
    .assert()
    .success()
    .stdout(contains("submitted for admin approval"));

    pl().args(["--db", &db_path, "--test", "request", "list"])
        .assert()
        .success()
        .stdout(contains("Alice Carter"))
        .stdout(contains("forgot to clock in"))
        .stdout(contains("Pending"));

    pl().args(["--db", &db_path, "--test", "request", "approve", "1"])
        .assert()
        .success()
        .stdout(contains("materialized IN punch"));

    // the queue is empty, the punch is authoritative history now
    pl().args(["--db", &db_path, "--test", "request", "list"])
        .assert()
        .success()
        .stdout(contains("No pending requests"));

    pl().args(["--db", &db_path, "--test", "history", "--employee", "EMP1"])
        .assert()
        .success()
        .stdout(contains("2025-06-02"))
        .stdout(contains("IN"));

    // re-approving a consumed request fails loudly
    pl().args(["--db", &db_path, "--test", "request", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_request_lifecycle_deny() {
    let db_path = setup_test_db("request_deny");
    init_db_with_staff(&db_path);

    pl().args([
        "--db", &db_path, "--test", "request", "submit", "EMP2",
        "--kind", "out", "--at", "2025-06-02 17:00", "--comment", "left in a hurry",
    ])
    .assert()
    .success();

    pl().args(["--db", &db_path, "--test", "request", "deny", "1"])
        .assert()
        .success()
        .stdout(contains("Denied request #1"));

    // nothing was materialized
    pl().args(["--db", &db_path, "--test", "history"])
        .assert()
        .success()
        .stdout(contains("No punches recorded"));
}

#[test]
fn test_passwd_reset_lifecycle() {
    let db_path = setup_test_db("passwd_lifecycle");
    init_db_with_staff(&db_path);

    pl().args([
        "--db", &db_path, "--test", "passwd", "request", "EMP1",
        "--reason", "forgot my password",
    ])
    .assert()
    .success()
    .stdout(contains("submitted"));

    pl().args(["--db", &db_path, "--test", "passwd", "list"])
        .assert()
        .success()
        .stdout(contains("EMP1"))
        .stdout(contains("alice@smilecastle.example"))
        .stdout(contains("Pending"));

    pl().args([
        "--db", &db_path, "--test", "passwd", "approve", "1",
        "--temp", "temp-456", "--by", "admin@store",
    ])
    .assert()
    .success()
    .stdout(contains("temporary password issued"));

    // the temp secret is now the login credential
    pl().args([
        "--db", &db_path, "--test", "punch", "EMP1", "in",
        "--at", "2025-06-03 09:00", "--password", "temp-456",
    ])
    .assert()
    .success();

    // second approval of the same request is a state conflict
    pl().args([
        "--db", &db_path, "--test", "passwd", "approve", "1",
        "--temp", "temp-789",
    ])
    .assert()
    .failure()
    .stderr(contains("Already resolved"));
}

#[test]
fn test_passwd_request_needs_contact_email() {
    let db_path = setup_test_db("passwd_no_email");
    init_db_with_staff(&db_path);

    // EMP2 has no stored email and none is passed
    pl().args(["--db", &db_path, "--test", "passwd", "request", "EMP2"])
        .assert()
        .failure()
        .stderr(contains("no contact email"));
}

#[test]
fn test_report_custom_range_totals() {
    let db_path = setup_test_db("report_totals");
    init_db_with_staff(&db_path);

    punch_at(&db_path, "EMP1", "in", "2025-06-02 09:00");
    punch_at(&db_path, "EMP1", "break-in", "2025-06-02 12:00");
    punch_at(&db_path, "EMP1", "break-out", "2025-06-02 12:30");
    punch_at(&db_path, "EMP1", "out", "2025-06-02 17:00");

    pl().args([
        "--db", &db_path, "--test", "report",
        "--from", "2025-06-01", "--to", "2025-06-30",
    ])
    .assert()
    .success()
    .stdout(contains("Alice Carter"))
    .stdout(contains("8.00"))
    .stdout(contains("0.50"))
    .stdout(contains("8.50"));
}

#[test]
fn test_report_range_requires_both_ends() {
    let db_path = setup_test_db("report_half_range");
    init_db_with_staff(&db_path);

    pl().args(["--db", &db_path, "--test", "report", "--from", "2025-06-01"])
        .assert()
        .failure()
        .stderr(contains("together"));
}

#[test]
fn test_report_employee_filter() {
    let db_path = setup_test_db("report_filter");
    init_db_with_staff(&db_path);

    punch_at(&db_path, "EMP1", "in", "2025-06-02 09:00");
    punch_at(&db_path, "EMP1", "out", "2025-06-02 13:00");
    punch_at(&db_path, "EMP2", "in", "2025-06-02 09:00");
    punch_at(&db_path, "EMP2", "out", "2025-06-02 11:00");

    pl().args([
        "--db", &db_path, "--test", "report",
        "--from", "2025-06-01", "--to", "2025-06-30",
        "--employee", "EMP2",
    ])
    .assert()
    .success()
    .stdout(contains("Bob Reyes"))
    .stdout(contains("2.00"))
    .stdout(contains("Alice Carter").not());
}

#[test]
fn test_audit_log_records_operations() {
    let db_path = setup_test_db("audit_log");
    init_db_with_staff(&db_path);

    punch_at(&db_path, "EMP1", "in", "2025-06-02 09:00");

    pl().args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("punch"))
        .stdout(contains("EMP1"))
        .stdout(contains("employee.add"));
}
