// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::error::TrackerError;

const UA: &str = concat!(
    "spendlog/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/spendlog)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

/// Parses a strictly positive amount.
pub fn parse_amount(s: &str) -> Result<Decimal, TrackerError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| TrackerError::validation(format!("Invalid amount '{}'", s.trim())))?;
    if amount <= Decimal::ZERO {
        return Err(TrackerError::validation(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }
    Ok(amount)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Prints `v` as pretty JSON (`--json`) or JSON lines (`--jsonl`; arrays are
/// streamed one element per line). Returns whether anything was printed.
pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
    } else if jsonl_flag {
        match serde_json::to_value(v)? {
            serde_json::Value::Array(items) => {
                for item in items {
                    println!("{}", serde_json::to_string(&item)?);
                }
            }
            other => println!("{}", serde_json::to_string(&other)?),
        }
    } else {
        return Ok(false);
    }
    Ok(true)
}
