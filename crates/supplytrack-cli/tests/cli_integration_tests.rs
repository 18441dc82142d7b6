//! CLI integration tests
//!
//! Drive the `supplytrack` binary against a temporary database file.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("supply_progress.db")
}

fn run(db: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_supplytrack");
    Command::new(cli_bin)
        .arg("--db")
        .arg(db)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn add_order(db: &Path, name: &str) {
    let output = run(
        db,
        &[
            "order",
            "add",
            name,
            "--customer",
            "CustA",
            "--delivery-date",
            "2024-01-10",
            "--salesperson",
            "Sales1",
            "--amount",
            "1000",
        ],
    );
    assert!(output.status.success(), "order add failed: {:?}", output);
}

#[test]
fn test_cli_order_and_part_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    add_order(&db, "O1");

    let output = run(
        &db,
        &[
            "part",
            "add",
            "P1",
            "--order",
            "1",
            "--supplier",
            "Sup1",
            "--planned",
            "2024-01-01",
            "--actual",
            "2024-01-31",
            "--status",
            "delivered",
        ],
    );
    assert!(output.status.success(), "part add failed: {:?}", output);
    assert!(stdout(&output).contains("deviation 1.00"));

    let output = run(&db, &["part", "update", "1", "--actual", "2024-01-16"]);
    assert!(output.status.success(), "part update failed: {:?}", output);
    assert!(stdout(&output).contains("deviation 0.50"));

    let output = run(&db, &["part", "list", "--order-name", "O1", "--json"]);
    assert!(output.status.success());
    let parts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parts[0]["planned_date"], "2024-01-01");
    assert_eq!(parts[0]["actual_date"], "2024-01-16");
    assert_eq!(parts[0]["deviation"], 0.5);
}

#[test]
fn test_cli_report_json_groups_by_order() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    add_order(&db, "O1");
    add_order(&db, "Empty");
    let output = run(
        &db,
        &[
            "part",
            "add",
            "P1",
            "--order-name",
            "O1",
            "--supplier",
            "Sup1",
            "--planned",
            "2024-01-01",
            "--actual",
            "2024-03-01",
        ],
    );
    assert!(output.status.success(), "part add failed: {:?}", output);

    let output = run(&db, &["report", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let groups = report.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["order_name"], "O1");
    assert_eq!(groups[0]["parts"][0]["deviation"], 2.0);
}

#[test]
fn test_cli_rejects_blank_order_name() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(
        &db,
        &[
            "order",
            "add",
            "  ",
            "--customer",
            "CustA",
            "--delivery-date",
            "2024-01-10",
            "--salesperson",
            "Sales1",
        ],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("order name cannot be empty"));
}

#[test]
fn test_cli_part_for_missing_order_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(
        &db,
        &[
            "part",
            "add",
            "P1",
            "--order",
            "99",
            "--supplier",
            "Sup1",
            "--planned",
            "2024-01-01",
        ],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_cli_delete_order_cascades() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    add_order(&db, "O1");
    let output = run(
        &db,
        &[
            "part",
            "add",
            "P1",
            "--order",
            "1",
            "--supplier",
            "Sup1",
            "--planned",
            "2024-01-01",
        ],
    );
    assert!(output.status.success(), "part add failed: {:?}", output);

    let output = run(&db, &["order", "delete", "1"]);
    assert!(output.status.success());

    let conn = rusqlite::Connection::open(&db).unwrap();
    let (orders, parts): (i64, i64) = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM orders), (SELECT COUNT(*) FROM order_parts)",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!((orders, parts), (0, 0));
}
