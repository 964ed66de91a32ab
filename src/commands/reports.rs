// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::warn_degraded;
use crate::models::{Totals, Transaction, TransactionType};
use crate::report::{self, CategorySummary, DateRange, MonthlySummary, RangePreset};
use crate::storage::Storage;
use crate::store::{CategoryStore, TransactionStore};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, today};
use anyhow::{Result, bail};
use serde::Serialize;

pub fn handle(storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(storage, sub)?,
        Some(("overview", sub)) => overview(storage, sub)?,
        Some(("trend", sub)) => trend(storage, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub range: DateRange,
    pub totals: Totals,
    pub expenses: Vec<CategorySummary>,
    pub income: Vec<CategorySummary>,
}

/// Resolves the `--range` preset (plus `--from`/`--to` for custom) against today.
pub fn resolve_range(sub: &clap::ArgMatches) -> Result<DateRange> {
    let preset = sub
        .get_one::<String>("range")
        .map(|r| r.parse::<RangePreset>())
        .transpose()?
        .unwrap_or(RangePreset::ThisMonth);
    let from = sub.get_one::<String>("from").map(|d| parse_date(d)).transpose()?;
    let to = sub.get_one::<String>("to").map(|d| parse_date(d)).transpose()?;
    if preset != RangePreset::Custom && (from.is_some() || to.is_some()) {
        bail!("--from/--to only apply to --range custom");
    }
    let range = match preset {
        RangePreset::Custom => DateRange::custom(from, to)?,
        other => DateRange::preset(other, today())?,
    };
    Ok(range)
}

pub fn build_summary(
    transactions: &TransactionStore<'_>,
    categories: &CategoryStore<'_>,
    range: DateRange,
) -> Result<Summary> {
    let rows = transactions.filter(&range.to_filter())?;
    Ok(Summary {
        totals: transactions.totals(&rows),
        expenses: report::by_category(&rows, TransactionType::Expense, categories.all()),
        income: report::by_category(&rows, TransactionType::Income, categories.all()),
        range,
    })
}

fn summary(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let range = resolve_range(sub)?;
    let transactions = TransactionStore::load(storage);
    let categories = CategoryStore::load(storage);
    warn_degraded(transactions.load_error());
    warn_degraded(categories.load_error());
    let s = build_summary(&transactions, &categories, range)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!("Period: {}", s.range);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&s.totals.income),
                fmt_money(&s.totals.expense),
                fmt_money(&s.totals.balance),
            ]],
        )
    );
    for (title, buckets) in [("Expenses", &s.expenses), ("Income", &s.income)] {
        if buckets.is_empty() {
            continue;
        }
        let rows = buckets
            .iter()
            .map(|b| {
                vec![
                    format!("{} {}", b.category_icon, b.category_name),
                    fmt_money(&b.total),
                    format!("{:.2}%", b.percentage),
                    b.count.to_string(),
                ]
            })
            .collect();
        println!("{}", title);
        println!("{}", pretty_table(&["Category", "Total", "Share", "Count"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Overview {
    pub month: Totals,
    pub recent: Vec<Transaction>,
}

pub fn build_overview(transactions: &TransactionStore<'_>, recent: usize) -> Overview {
    Overview {
        month: transactions.totals(&transactions.current_month()),
        recent: transactions.recent(recent),
    }
}

fn overview(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let n = *sub.get_one::<usize>("recent").unwrap_or(&5);
    let store = TransactionStore::load(storage);
    warn_degraded(store.load_error());
    let o = build_overview(&store, n);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &o)? {
        return Ok(());
    }
    println!(
        "This month: income {}  expense {}  balance {}",
        fmt_money(&o.month.income),
        fmt_money(&o.month.expense),
        fmt_money(&o.month.balance)
    );
    let rows = o
        .recent
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                t.kind.label().to_string(),
                fmt_money(&t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Type", "Amount"], rows)
    );
    Ok(())
}

fn trend(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&6);
    if months == 0 {
        bail!("--months must be at least 1");
    }
    let store = TransactionStore::load(storage);
    warn_degraded(store.load_error());
    let series: Vec<MonthlySummary> = report::month_series(store.all(), months, today())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        let rows = series
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    fmt_money(&m.total_income),
                    fmt_money(&m.total_expense),
                    fmt_money(&m.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}
