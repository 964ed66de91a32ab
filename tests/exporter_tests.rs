// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::{TimeZone, Utc};
use common::{MemoryBackend, category, march_pair, memory_storage, tx};
use rust_decimal::Decimal;
use serde_json::Value;
use spendlog::export::{CSV_HEADERS, parse_backup, to_backup_json, to_csv};
use spendlog::models::{PaymentMethod, TransactionType};
use spendlog::{cli, commands::exporter};
use tempfile::tempdir;

#[test]
fn csv_quotes_and_names_categories() {
    let mut t = tx("t1", "2024-03-01", TransactionType::Expense, 100, "food");
    t.description = r#"He said "hi""#.into();
    let mut u = tx("t2", "2024-03-02", TransactionType::Income, 0, "gone");
    u.amount = Decimal::new(4250, 2);
    u.payment_method = Some(PaymentMethod::CreditCard);
    u.notes = Some("a, b".into());
    let cats = vec![category("food", "Food", true)];

    let out = to_csv(&[t, u], &cats).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], CSV_HEADERS.join(","));
    assert_eq!(lines[1], r#"2024-03-01,"He said ""hi""",Expense,Food,100,,"#);
    assert_eq!(
        lines[2],
        r#"2024-03-02,Income t2,Income,Uncategorized,42.5,CREDIT_CARD,"a, b""#
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn csv_of_nothing_is_just_the_header() {
    let out = to_csv(&[], &[]).unwrap();
    assert_eq!(out.trim_end(), CSV_HEADERS.join(","));
}

#[test]
fn backup_json_carries_both_lists_and_timestamp() {
    let at = Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap();
    let cats = vec![category("food", "Food", true)];
    let raw = to_backup_json(&march_pair(), &cats, at).unwrap();
    let doc: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["transactions"].as_array().unwrap().len(), 2);
    assert_eq!(doc["categories"][0]["isSystem"], true);
    assert_eq!(doc["exportedAt"], "2024-04-01T08:30:00Z");
    assert!(raw.contains('\n'));

    let back = parse_backup(&raw).unwrap();
    assert_eq!(back.transactions, march_pair());
    assert_eq!(back.exported_at, Some(at));
}

#[test]
fn cli_export_writes_files() {
    let dir = tempdir().unwrap();
    let backend = MemoryBackend::with(vec![category("food", "Food", true)], march_pair());
    let storage = memory_storage(&backend, &dir);

    for (kind, name) in [("csv", "out.csv"), ("json", "out.json")] {
        let out = dir.path().join(name);
        let matches = cli::build_cli().get_matches_from([
            "spendlog",
            "export",
            kind,
            "--out",
            out.to_str().unwrap(),
        ]);
        if let Some(("export", export_m)) = matches.subcommand() {
            exporter::handle(&storage, export_m).unwrap();
        } else {
            panic!("no export subcommand");
        }
        let body = std::fs::read_to_string(&out).unwrap();
        assert!(body.contains("2024-03-15"));
    }
    let csv = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    // newest first, as the store keeps them
    assert!(csv.lines().nth(1).unwrap().starts_with("2024-03-15"));
}

#[test]
fn backup_keeps_disabled_categories() {
    let dir = tempdir().unwrap();
    let mut mine = category("mine", "Mine", false);
    mine.is_active = false;
    let backend = MemoryBackend::with(
        vec![category("food", "Food", true), mine.clone()],
        vec![tx("t1", "2024-03-01", TransactionType::Expense, 20, "mine")],
    );
    let storage = memory_storage(&backend, &dir);
    let out = dir.path().join("backup.json");
    let matches = cli::build_cli().get_matches_from([
        "spendlog",
        "export",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);
    let (_, export_m) = matches.subcommand().unwrap();
    exporter::handle(&storage, export_m).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let backup = parse_backup(&raw).unwrap();
    assert!(backup.categories.contains(&mine));

    let restored = spendlog::storage::LocalStorage::new(dir.path().join("restored.json"));
    restored.import_json(&raw).unwrap();
    let data = restored.read();
    assert!(data.categories.iter().any(|c| c.id == "mine" && !c.is_active));
    assert_eq!(data.transactions[0].category_id, "mine");
}

#[test]
fn csv_uses_english_names_for_system_categories() {
    let t = tx("t1", "2024-03-01", TransactionType::Expense, 7, "cat-alimentacion");
    let out = to_csv(&[t], &spendlog::defaults::system_categories()).unwrap();
    let row = out.lines().nth(1).unwrap();
    assert_eq!(row, "2024-03-01,Expense t1,Expense,Food,7,,");
}
