// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{required_arg, warn_degraded};
use crate::defaults::UNCATEGORIZED;
use crate::models::{
    NewTransaction, PaymentMethod, Transaction, TransactionFilter, TransactionPatch,
    TransactionType,
};
use crate::report::in_month;
use crate::storage::Storage;
use crate::store::{CategoryStore, TransactionStore};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table, today};
use anyhow::{Result, bail};

pub fn handle(storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(storage, sub)?,
        Some(("list", sub)) => list(storage, sub)?,
        Some(("edit", sub)) => edit(storage, sub)?,
        Some(("rm", sub)) => remove(storage, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let description = required_arg(sub, "description")?.trim();
    if description.is_empty() {
        bail!("Description is required");
    }
    let category_id = required_arg(sub, "category")?.trim();
    if category_id.is_empty() {
        bail!("Category is required");
    }
    let new = NewTransaction {
        date,
        description: description.to_string(),
        kind: required_arg(sub, "type")?.parse::<TransactionType>()?,
        category_id: category_id.to_string(),
        amount: parse_amount(required_arg(sub, "amount")?)?,
        payment_method: sub
            .get_one::<String>("payment")
            .map(|p| p.parse::<PaymentMethod>())
            .transpose()?,
        notes: sub
            .get_one::<String>("notes")
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };

    let categories = CategoryStore::load(storage);
    if categories.get_by_id(&new.category_id).is_none() {
        tracing::warn!(category = %new.category_id, "recording transaction with unknown category");
    }
    let mut store = TransactionStore::load(storage);
    let tx = store.create(new)?;
    println!(
        "Recorded {} {} on {} '{}' ({})",
        tx.kind.label().to_lowercase(),
        fmt_money(&tx.amount),
        tx.date,
        tx.description,
        tx.id
    );
    Ok(())
}

/// Applies the `tx list` criteria to the loaded transactions, newest first.
pub fn query_rows(store: &TransactionStore<'_>, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let criteria = TransactionFilter {
        kind: sub
            .get_one::<String>("type")
            .map(|t| t.parse::<TransactionType>())
            .transpose()?,
        category_id: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        payment_method: sub
            .get_one::<String>("payment")
            .map(|p| p.parse::<PaymentMethod>())
            .transpose()?,
        start_date: sub
            .get_one::<String>("from")
            .map(|d| parse_date(d))
            .transpose()?,
        end_date: sub
            .get_one::<String>("to")
            .map(|d| parse_date(d))
            .transpose()?,
        search: sub.get_one::<String>("search").cloned(),
    };
    let mut rows = store.filter(&criteria)?;
    if let Some(month) = sub.get_one::<String>("month") {
        rows = in_month(&rows, &parse_month(month)?);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let store = TransactionStore::load(storage);
    warn_degraded(store.load_error());
    let data = query_rows(&store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let categories = CategoryStore::load(storage);
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    t.kind.label().to_string(),
                    categories
                        .get_by_id(&t.category_id)
                        .map_or_else(|| UNCATEGORIZED.to_string(), |c| format!("{} {}", c.icon, c.name)),
                    fmt_money(&t.amount),
                    t.payment_method.map(|p| p.label()).unwrap_or_default().to_string(),
                    t.notes.clone().unwrap_or_default(),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Type", "Category", "Amount", "Payment", "Notes", "Id"],
                rows,
            )
        );
        let totals = store.totals(&data);
        println!(
            "Income {}  Expense {}  Balance {}",
            fmt_money(&totals.income),
            fmt_money(&totals.expense),
            fmt_money(&totals.balance)
        );
    }
    Ok(())
}

fn edit(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?.trim();
    let description = sub.get_one::<String>("description").map(|s| s.trim().to_string());
    if description.as_deref().is_some_and(str::is_empty) {
        bail!("Description is required");
    }
    let payment_method = if sub.get_flag("clear-payment") {
        Some(None)
    } else {
        sub.get_one::<String>("payment")
            .map(|p| p.parse::<PaymentMethod>())
            .transpose()?
            .map(Some)
    };
    let notes = if sub.get_flag("clear-notes") {
        Some(None)
    } else {
        sub.get_one::<String>("notes")
            .map(|n| Some(n.trim().to_string()).filter(|n| !n.is_empty()))
    };
    let patch = TransactionPatch {
        date: sub
            .get_one::<String>("date")
            .map(|d| parse_date(d))
            .transpose()?,
        description,
        kind: sub
            .get_one::<String>("type")
            .map(|t| t.parse::<TransactionType>())
            .transpose()?,
        category_id: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        amount: sub
            .get_one::<String>("amount")
            .map(|a| parse_amount(a))
            .transpose()?,
        payment_method,
        notes,
    };
    if patch.is_empty() {
        bail!("Nothing to change");
    }
    let mut store = TransactionStore::load(storage);
    let tx = store.update(id, &patch)?;
    println!("Updated transaction {} ({})", tx.id, tx.description);
    Ok(())
}

fn remove(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?.trim();
    let mut store = TransactionStore::load(storage);
    store.delete(id)?;
    println!("Removed transaction {}", id);
    Ok(())
}
