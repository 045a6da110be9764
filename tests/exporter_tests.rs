// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finassist::commands::exporter::write_transactions;
use finassist::models::{Transaction, TransactionSource, TransactionType};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn sample() -> Vec<Transaction> {
    let at = NaiveDate::from_ymd_opt(2025, 3, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    vec![
        Transaction {
            id: 1,
            user_id: 7,
            date: at,
            description: "Groceries".into(),
            amount: Decimal::new(4210, 2),
            category: Some("Food".into()),
            transaction_type: TransactionType::Expense,
            source: TransactionSource::Manual,
            created_at: at.and_utc(),
            updated_at: at.and_utc(),
        },
        Transaction {
            id: 2,
            user_id: 7,
            date: at,
            description: "Salary".into(),
            amount: Decimal::from(3000),
            category: None,
            transaction_type: TransactionType::Income,
            source: TransactionSource::BankStatement,
            created_at: at.and_utc(),
            updated_at: at.and_utc(),
        },
    ]
}

#[test]
fn csv_export_has_header_and_one_row_per_transaction() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    write_transactions(&sample(), "csv", out.to_str().unwrap()).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        ["date", "description", "amount", "category", "transaction_type", "source"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "2025-03-04");
    assert_eq!(&rows[0][3], "Food");
    assert_eq!(&rows[1][3], "");
    assert_eq!(&rows[1][5], "bank_statement");
}

#[test]
fn json_export_reads_back() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    write_transactions(&sample(), "json", out.to_str().unwrap()).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let back: Vec<Transaction> = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn unknown_format_is_rejected_without_writing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    let err = write_transactions(&sample(), "xml", out.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}
