// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::UNCATEGORIZED;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Transaction};

pub const CSV_HEADERS: [&str; 7] = [
    "Date",
    "Description",
    "Type",
    "Category",
    "Amount",
    "Payment method",
    "Notes",
];

/// One row per transaction with standard CSV quoting.
pub fn to_csv(transactions: &[Transaction], categories: &[Category]) -> TrackerResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADERS).map_err(csv_err)?;
    for t in transactions {
        let category = categories
            .iter()
            .find(|c| c.id == t.category_id)
            .map_or(UNCATEGORIZED, |c| c.name.as_str());
        wtr.write_record([
            t.date.to_string().as_str(),
            t.description.as_str(),
            t.kind.label(),
            category,
            t.amount.normalize().to_string().as_str(),
            t.payment_method.map_or("", |m| m.code()),
            t.notes.as_deref().unwrap_or(""),
        ])
        .map_err(csv_err)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv_err(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn csv_err(e: csv::Error) -> TrackerError {
    TrackerError::validation(format!("CSV encoding failed: {}", e))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupOut<'a> {
    transactions: &'a [Transaction],
    categories: &'a [Category],
    exported_at: DateTime<Utc>,
}

/// Full backup: both lists plus the export timestamp, pretty-printed.
pub fn to_backup_json(
    transactions: &[Transaction],
    categories: &[Category],
    exported_at: DateTime<Utc>,
) -> TrackerResult<String> {
    let out = BackupOut {
        transactions,
        categories,
        exported_at,
    };
    serde_json::to_string_pretty(&out)
        .map_err(|e| TrackerError::validation(format!("JSON encoding failed: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

/// Accepts a backup or a raw envelope. Both `transactions` and `categories`
/// must be present and be lists.
pub fn parse_backup(raw: &str) -> TrackerResult<Backup> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| TrackerError::ImportFormat(format!("not valid JSON: {}", e)))?;
    for key in ["transactions", "categories"] {
        if !value.get(key).is_some_and(Value::is_array) {
            return Err(TrackerError::ImportFormat(format!(
                "'{}' must be present and be a list",
                key
            )));
        }
    }
    serde_json::from_value(value).map_err(|e| TrackerError::ImportFormat(e.to_string()))
}
