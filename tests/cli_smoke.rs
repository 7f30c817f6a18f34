//! End-to-end smoke tests for the chairside binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chairside(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chairside").expect("binary builds");
    cmd.env("CHAIRSIDE_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn config_shows_data_directory() {
    let dir = TempDir::new().unwrap();

    chairside(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("chairside configuration"));
}

#[test]
fn cash_visit_reaches_the_register() {
    let dir = TempDir::new().unwrap();

    chairside(&dir)
        .args([
            "transaction",
            "add",
            "김민준",
            "--date",
            "2024-06-10",
            "--method",
            "현금",
            "--amount",
            "100000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("김민준"));

    chairside(&dir)
        .args(["ledger", "list", "--date", "2024-06-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("김민준 현금결제"))
        .stdout(predicate::str::contains("₩100,000"));
}

#[test]
fn card_visit_skips_the_register() {
    let dir = TempDir::new().unwrap();

    chairside(&dir)
        .args([
            "transaction",
            "add",
            "이서연",
            "--date",
            "2024-06-10",
            "--method",
            "카드",
            "--amount",
            "50000",
        ])
        .assert()
        .success();

    chairside(&dir)
        .args(["ledger", "list", "--date", "2024-06-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries."));
}

#[test]
fn month_view_spans_the_whole_month() {
    let dir = TempDir::new().unwrap();

    for (patient, date) in [("김민준", "2024-06-01"), ("이서연", "2024-06-30")] {
        chairside(&dir)
            .args([
                "transaction",
                "add",
                patient,
                "--date",
                date,
                "--method",
                "현금",
                "--amount",
                "10000",
            ])
            .assert()
            .success();
    }

    chairside(&dir)
        .args(["ledger", "list", "--date", "2024-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("김민준 현금결제"))
        .stdout(predicate::str::contains("이서연 현금결제"));
}

#[test]
fn closing_an_empty_day_reports_nothing_to_close() {
    let dir = TempDir::new().unwrap();

    chairside(&dir)
        .args(["ledger", "close", "2024-06-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to close"));
}

#[test]
fn invalid_date_is_rejected() {
    let dir = TempDir::new().unwrap();

    chairside(&dir)
        .args([
            "transaction",
            "add",
            "김민준",
            "--date",
            "06/10/2024",
            "--method",
            "현금",
            "--amount",
            "1000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn expense_lifecycle_via_cli() {
    let dir = TempDir::new().unwrap();

    chairside(&dir)
        .args([
            "expense",
            "add",
            "임플란트 재료",
            "80000",
            "--date",
            "2024-05-02",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("임플란트 재료"));

    chairside(&dir)
        .args(["ledger", "list", "--date", "2024-05-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("지출"));

    chairside(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₩80,000"));
}
