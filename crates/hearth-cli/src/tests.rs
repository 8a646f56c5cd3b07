//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use hearth_core::config::Config;
use hearth_core::db::Database;
use hearth_core::models::RecordKind;
use hearth_core::test_utils::MockChatServer;

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn seed(db: &Database) {
    commands::cmd_add(db, Some("2024-01-05"), RecordKind::Income, "Salary", 1000, None).unwrap();
    commands::cmd_add(
        db,
        Some("2024-01-20"),
        RecordKind::Expense,
        "Groceries",
        300,
        Some("food"),
    )
    .unwrap();
    commands::cmd_add(db, Some("2024-02-01"), RecordKind::Expense, "Misc", 200, Some("")).unwrap();
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.database.path = dir.path().join("ledger.db");

    commands::cmd_init(&config).unwrap();
    assert!(config.database.path.exists());

    // Running init again keeps existing data
    let db = commands::open_db(&config).unwrap();
    seed(&db);
    commands::cmd_init(&config).unwrap();
    assert_eq!(commands::open_db(&config).unwrap().count_records().unwrap(), 3);
}

// ========== Record Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = setup_test_db();

    let id = commands::cmd_add(
        &db,
        Some(" 2024-03-10 "),
        RecordKind::Expense,
        "Bus",
        250,
        Some(" transport "),
    )
    .unwrap();

    let record = db.get_record(id).unwrap().unwrap();
    assert_eq!(record.date, "2024-03-10");
    assert_eq!(record.kind, RecordKind::Expense);
    assert_eq!(record.category.as_deref(), Some("transport"));
}

#[test]
fn test_cmd_add_defaults_to_today() {
    let db = setup_test_db();

    let id = commands::cmd_add(&db, None, RecordKind::Income, "Gift", 50, None).unwrap();

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let record = db.get_record(id).unwrap().unwrap();
    assert_eq!(record.date, today);
    assert!(record.category.is_none());
}

#[test]
fn test_cmd_add_blank_category_is_uncategorized() {
    let db = setup_test_db();

    let id = commands::cmd_add(&db, Some("2024-03-10"), RecordKind::Expense, "Tip", 40, Some("  "))
        .unwrap();

    assert!(db.get_record(id).unwrap().unwrap().category.is_none());
    assert_eq!(db.get_category_breakdown(None).unwrap()[0].category, "Other");
}

#[test]
fn test_cmd_add_rejects_invalid() {
    let db = setup_test_db();

    assert!(
        commands::cmd_add(&db, Some("03/10/2024"), RecordKind::Expense, "x", 1, None).is_err()
    );
    assert!(
        commands::cmd_add(&db, Some("2024-03-10"), RecordKind::Expense, "x", -1, None).is_err()
    );
    assert_eq!(db.count_records().unwrap(), 0);
}

#[test]
fn test_cmd_delete_twice() {
    let db = setup_test_db();
    let id = commands::cmd_add(&db, Some("2024-01-01"), RecordKind::Income, "x", 1, None).unwrap();

    assert!(commands::cmd_delete(&db, id).is_ok());
    assert!(commands::cmd_delete(&db, id).is_ok());
    assert!(db.get_record(id).unwrap().is_none());
}

#[test]
fn test_cmd_day() {
    let db = setup_test_db();
    seed(&db);

    assert!(commands::cmd_day(&db, "2024-01-20", false).is_ok());
    assert!(commands::cmd_day(&db, "2024-01-20", true).is_ok());
    assert!(commands::cmd_day(&db, "2030-01-01", false).is_ok());
    assert!(commands::cmd_day(&db, "Jan 20", false).is_err());
}

#[test]
fn test_cmd_recent() {
    let db = setup_test_db();
    assert!(commands::cmd_recent(&db, 10, false).is_ok());

    seed(&db);
    assert!(commands::cmd_recent(&db, 2, false).is_ok());
    assert!(commands::cmd_recent(&db, 0, true).is_ok());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_reports() {
    let db = setup_test_db();
    seed(&db);

    assert!(commands::cmd_summary(&db, false).is_ok());
    assert!(commands::cmd_summary(&db, true).is_ok());
    assert!(commands::cmd_report_monthly(&db, false).is_ok());
    assert!(commands::cmd_report_yearly(&db, true).is_ok());
    assert!(commands::cmd_report_category(&db, None, false).is_ok());
    assert!(commands::cmd_report_category(&db, Some("2024-01"), false).is_ok());

    let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    assert!(commands::cmd_report_current_month(&db, today, false).is_ok());
}

#[test]
fn test_cmd_reports_empty_db() {
    let db = setup_test_db();

    assert!(commands::cmd_report_monthly(&db, false).is_ok());
    assert!(commands::cmd_report_yearly(&db, false).is_ok());
    assert!(commands::cmd_report_category(&db, None, false).is_ok());
}

#[test]
fn test_cmd_report_category_bad_month() {
    let db = setup_test_db();
    assert!(commands::cmd_report_category(&db, Some("2024-1"), false).is_err());
    assert!(commands::cmd_report_category(&db, Some("January"), false).is_err());
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export_to_file() {
    let db = setup_test_db();
    seed(&db);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    commands::cmd_export(&db, Some(&path)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "id,date,kind,title,amount,category");
    assert_eq!(lines.len(), 4);
    assert!(lines[2].ends_with(",food"));
}

// ========== Ask Command Tests ==========

#[tokio::test]
async fn test_cmd_ask_without_chat() {
    let db = setup_test_db();
    let config = Config::default();

    let err = commands::cmd_ask(&db, &config, "How am I doing?", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not configured"));
}

#[tokio::test]
async fn test_cmd_ask_with_mock_server() {
    let server = MockChatServer::start().await;
    let db = setup_test_db();
    seed(&db);

    let mut config = Config::default();
    config.chat.host = Some(server.url());
    config.chat.recent_limit = 1;

    commands::cmd_ask(&db, &config, "How am I doing?", false)
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);

    // Snapshot honours the configured recent limit
    let snapshot: serde_json::Value = serde_json::from_str(
        requests[0].body["messages"][1]["content"].as_str().unwrap(),
    )
    .unwrap();
    assert_eq!(snapshot["recent"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cmd_ask_upstream_error() {
    let server = MockChatServer::failing().await;
    let db = setup_test_db();

    let mut config = Config::default();
    config.chat.host = Some(server.url());

    assert!(commands::cmd_ask(&db, &config, "hello", false).await.is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long title indeed", 10), "a very ...");
    assert_eq!(truncate("장보기와 외식 비용", 5), "장보...");
}

#[test]
fn test_direct_insert_with_unknown_kind_still_reports() {
    let db = setup_test_db();
    seed(&db);

    let conn = db.conn().unwrap();
    conn.execute(
        "INSERT INTO records (date, kind, title, amount) VALUES ('2024-01-09', 'refund', 'odd', 5)",
        rusqlite::params![],
    )
    .unwrap();
    drop(conn);

    assert!(commands::cmd_recent(&db, 10, false).is_ok());
    assert!(commands::cmd_summary(&db, false).is_ok());
}
