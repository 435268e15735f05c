//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tally_core::{
    Database, ExportFormat, MoneyFormat, NewTransaction, TimeFilter, TransactionEdit,
    TransactionKind,
};

use crate::commands::{self, truncate, ViewOptions};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Wednesday 2024-03-13
fn view(filter: TimeFilter) -> ViewOptions {
    ViewOptions::new(filter, date(2024, 3, 13), MoneyFormat::default())
}

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    let rows = [
        (date(2024, 2, 20), TransactionKind::Income, "Salary", dec!(1500)),
        (date(2024, 3, 1), TransactionKind::Expense, "Home", dec!(700)),
        (date(2024, 3, 12), TransactionKind::Expense, "Food", dec!(35.20)),
        (date(2024, 3, 13), TransactionKind::SavingsDeposit, "Vacation", dec!(100)),
    ];
    for (day, kind, category, amount) in rows {
        db.insert_transaction(&NewTransaction::new(day, kind, category, amount))
            .unwrap();
    }
    db
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Long-Term Investment", 10), "Long-Te...");
    assert_eq!(truncate("Épargne très longue", 8), "Éparg...");
}

#[test]
fn test_bar_scaling() {
    assert_eq!(commands::bar(dec!(50), dec!(100), 10), "█████");
    assert_eq!(commands::bar(dec!(100), dec!(100), 10).chars().count(), 10);
    assert_eq!(commands::bar(dec!(0.01), dec!(100), 10), "█");
    assert_eq!(commands::bar(dec!(0), dec!(100), 10), "");
    assert_eq!(commands::bar(dec!(5), dec!(0), 10), "");
}

#[test]
fn test_parse_assignment() {
    assert_eq!(
        commands::parse_assignment("amount=12.5").unwrap(),
        TransactionEdit::Amount(dec!(12.50))
    );
    assert_eq!(
        commands::parse_assignment("category=piggy bank").unwrap(),
        TransactionEdit::Category("Piggy Bank".to_string())
    );
    assert_eq!(
        commands::parse_assignment("note=").unwrap(),
        TransactionEdit::Note(None)
    );
    assert!(commands::parse_assignment("amount").is_err());
    assert!(commands::parse_assignment("id=4").is_err());
    assert!(commands::parse_assignment("category=Lottery").is_err());
    assert!(commands::parse_assignment("date=13/03/2024").is_err());
}

// ========== Add Command Tests ==========

#[test]
fn test_cmd_add_saves_with_default_category() {
    let db = Database::in_memory().unwrap();
    let v = view(TimeFilter::ThisMonth);

    commands::cmd_add(&db, &v, TransactionKind::Income, dec!(20), None, None, Some("  "))
        .unwrap();

    let all = db.list_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category, "Salary");
    assert_eq!(all[0].date, v.today);
    assert_eq!(all[0].note, None);
}

#[test]
fn test_cmd_add_canonicalizes_category() {
    let db = Database::in_memory().unwrap();
    commands::cmd_add(
        &db,
        &view(TimeFilter::AllTime),
        TransactionKind::SavingsWithdrawal,
        dec!(40),
        Some("planned expense"),
        Some(date(2023, 12, 1)),
        Some("flights"),
    )
    .unwrap();

    let tx = &db.list_transactions().unwrap()[0];
    assert_eq!(tx.category, "Planned Expense");
    assert_eq!(tx.note.as_deref(), Some("flights"));
}

#[test]
fn test_cmd_add_rejects_without_writing() {
    let db = Database::in_memory().unwrap();
    let v = view(TimeFilter::AllTime);

    commands::cmd_add(&db, &v, TransactionKind::Expense, dec!(0), None, None, None).unwrap();
    commands::cmd_add(&db, &v, TransactionKind::Expense, dec!(-3), None, None, None).unwrap();
    commands::cmd_add(&db, &v, TransactionKind::Expense, dec!(3), Some("Salary"), None, None)
        .unwrap();

    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_cmd_add_rejects_amounts_outside_column() {
    let db = Database::in_memory().unwrap();
    let v = view(TimeFilter::AllTime);

    // Both round to 0.00
    for sub_cent in [dec!(0.004), dec!(0.005)] {
        commands::cmd_add(&db, &v, TransactionKind::Expense, sub_cent, None, None, None).unwrap();
    }
    commands::cmd_add(&db, &v, TransactionKind::Expense, dec!(100000000), None, None, None)
        .unwrap();
    assert_eq!(db.count_transactions().unwrap(), 0);

    commands::cmd_add(&db, &v, TransactionKind::Expense, dec!(0.006), None, None, None).unwrap();
    let all = db.list_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, dec!(0.01));
}

#[test]
fn test_cmd_add_outside_filter_still_saves() {
    let db = Database::in_memory().unwrap();
    let v = view(TimeFilter::ThisWeek);

    commands::cmd_add(
        &db,
        &v,
        TransactionKind::Expense,
        dec!(9),
        Some("Food"),
        Some(date(2024, 1, 2)),
        None,
    )
    .unwrap();

    assert_eq!(db.count_transactions().unwrap(), 1);
    assert!(v.visible(&db).unwrap().is_empty());
}

// ========== Table Command Tests ==========

#[test]
fn test_cmd_list() {
    let db = setup_test_db();
    assert!(commands::cmd_list(&db, &view(TimeFilter::ThisWeek)).is_ok());

    let empty = Database::in_memory().unwrap();
    assert!(commands::cmd_list(&empty, &view(TimeFilter::AllTime)).is_ok());
}

#[test]
fn test_cmd_categories() {
    assert!(commands::cmd_categories(None).is_ok());
    assert!(commands::cmd_categories(Some(TransactionKind::SavingsDeposit)).is_ok());
}

#[test]
fn test_cmd_edit_targets_filtered_row() {
    let db = setup_test_db();
    let v = view(TimeFilter::ThisWeek);
    // Week view, newest first: [Vacation deposit, Food]
    let rows = v.visible(&db).unwrap();
    assert_eq!(rows[1].category, "Food");

    commands::cmd_edit(
        &db,
        &v,
        1,
        &["amount=40".to_string(), "note=market".to_string()],
    )
    .unwrap();

    let food = db.get_transaction(rows[1].id).unwrap().unwrap();
    assert_eq!(food.amount, dec!(40));
    assert_eq!(food.note.as_deref(), Some("market"));
}

#[test]
fn test_cmd_edit_bad_row_changes_nothing() {
    let db = setup_test_db();
    let before = db.list_transactions().unwrap();

    let result = commands::cmd_edit(&db, &view(TimeFilter::ThisWeek), 2, &["amount=1".to_string()]);
    assert!(result.is_err());
    assert_eq!(db.list_transactions().unwrap(), before);
}

#[test]
fn test_cmd_delete_rows() {
    let db = setup_test_db();
    let v = view(TimeFilter::ThisMonth);
    let rows = v.visible(&db).unwrap();
    assert_eq!(rows.len(), 3);

    commands::cmd_delete(&db, &v, &[0, 2]).unwrap();

    let remaining = db.list_transactions().unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().any(|t| t.id == rows[1].id));
    assert!(remaining.iter().all(|t| t.id != rows[0].id && t.id != rows[2].id));
}

#[test]
fn test_cmd_apply_batch_file() {
    let db = setup_test_db();
    let v = view(TimeFilter::AllTime);
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("batch.json");
    std::fs::write(
        &file,
        r#"{"edited_rows": {"3": {"category": "Gift"}}, "deleted_rows": [0]}"#,
    )
    .unwrap();

    commands::cmd_apply(&db, &v, &file).unwrap();

    let all = db.list_transactions().unwrap();
    assert_eq!(all.len(), 3);
    // Oldest row (Salary) was position 3
    assert_eq!(all.last().unwrap().category, "Gift");
    assert!(all.iter().all(|t| t.kind != TransactionKind::SavingsDeposit));
}

#[test]
fn test_cmd_apply_rejects_bad_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("batch.json");
    std::fs::write(&file, r#"{"edited_rows": {"0": {"amount": "abc"}}}"#).unwrap();

    assert!(commands::cmd_apply(&db, &view(TimeFilter::AllTime), &file).is_err());
    let missing = dir.path().join("none.json");
    assert!(commands::cmd_apply(&db, &view(TimeFilter::AllTime), &missing).is_err());
    assert_eq!(db.count_transactions().unwrap(), 4);
}

// ========== Report Command Tests ==========

#[test]
fn test_render_dashboard() {
    let db = setup_test_db();
    let v = view(TimeFilter::ThisMonth);
    let dashboard = commands::build_dashboard(Path::new(db.path()), &v);

    let text = commands::render_dashboard(&dashboard, &v.money);
    assert!(text.contains("This month (2024-03-01 to 2024-03-31)"));
    // 1500 - 735.20 - 100
    assert!(text.contains("Available cash:   $665"));
    assert!(text.contains("Net savings:      $100"));
    assert!(text.contains("Your biggest expense is Home ($700)."));
    assert!(text.contains("2024-03-12"));
}

#[test]
fn test_render_empty_dashboard() {
    let dashboard = tally_core::Dashboard::empty(TimeFilter::AllTime, date(2024, 1, 1));
    let text = commands::render_dashboard(&dashboard, &MoneyFormat::default());
    assert!(text.contains("Welcome! Start by recording your first transaction."));
    assert!(text.contains("No data in this time filter."));
}

#[test]
fn test_dashboard_degrades_when_store_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("missing").join("tally.db");
    let v = view(TimeFilter::AllTime);

    let dashboard = commands::build_dashboard(&bad, &v);
    assert!(dashboard.is_empty());
    assert!(commands::cmd_dashboard(&bad, &v, false).is_ok());
    assert!(commands::cmd_insights(&bad, &v).is_ok());
}

#[test]
fn test_cmd_dashboard_json() {
    let db = setup_test_db();
    let v = view(TimeFilter::AllTime);
    assert!(commands::cmd_dashboard(Path::new(db.path()), &v, true).is_ok());

    let dashboard = commands::build_dashboard(Path::new(db.path()), &v);
    let json = commands::render_dashboard_json(&dashboard).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["transactions"].as_array().unwrap().len(), 4);
    assert!(value["hero"]["available_cash"].is_string());
}

#[test]
fn test_dashboard_json_stays_parseable_when_store_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("missing").join("tally.db");
    let v = view(TimeFilter::AllTime);

    let json = commands::render_dashboard_json(&commands::build_dashboard(&bad, &v)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["transactions"].as_array().unwrap().is_empty());
    assert_eq!(value["insights"].as_array().unwrap().len(), 1);
    assert!(commands::cmd_dashboard(&bad, &v, true).is_ok());
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export_to_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("week.csv");

    commands::cmd_export(&db, &view(TimeFilter::ThisWeek), ExportFormat::Csv, Some(&out)).unwrap();

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,date,kind,category,amount,note");
    assert!(lines[2].contains("Food,35.20"));
}

#[test]
fn test_cmd_export_json_to_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("all.json");

    commands::cmd_export(&db, &view(TimeFilter::AllTime), ExportFormat::Json, Some(&out)).unwrap();

    let parsed: Vec<tally_core::Transaction> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed.len(), 4);
}

// ========== Reset Command Tests ==========

#[test]
fn test_confirm_reset_answers() {
    let mut out = Vec::new();
    assert!(commands::confirm_reset(&mut Cursor::new("y\n"), &mut out).unwrap());
    assert!(commands::confirm_reset(&mut Cursor::new(" Y \n"), &mut out).unwrap());
    assert!(!commands::confirm_reset(&mut Cursor::new("yes\n"), &mut out).unwrap());
    assert!(!commands::confirm_reset(&mut Cursor::new("\n"), &mut out).unwrap());
    assert!(!commands::confirm_reset(&mut Cursor::new(""), &mut out).unwrap());
    assert!(String::from_utf8(out).unwrap().contains("[y/N]"));
}

#[test]
fn test_reset_database() {
    let db = setup_test_db();
    assert_eq!(commands::reset_database(&db).unwrap(), 4);
    assert_eq!(db.count_transactions().unwrap(), 0);

    let id = db
        .insert_transaction(&NewTransaction::new(
            date(2024, 3, 13),
            TransactionKind::Expense,
            "Food",
            dec!(1),
        ))
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn test_cmd_reset_yes_and_missing_db() {
    let db = setup_test_db();
    commands::cmd_reset(Path::new(db.path()), true).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 0);

    let dir = tempfile::tempdir().unwrap();
    assert!(commands::cmd_reset(&dir.path().join("nope.db"), true).is_err());
}

// ========== Init Tests ==========

#[test]
fn test_cmd_init_creates_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 0);
}
