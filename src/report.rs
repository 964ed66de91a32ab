// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over transaction lists: filtering, totals, per-category
//! buckets, monthly series and calendar date-range presets.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::defaults::{DEFAULT_ICON, UNCATEGORIZED};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Totals, Transaction, TransactionFilter, TransactionType};

/// A century of months.
const MAX_SERIES_MONTHS: i32 = 1200;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn filter(list: &[Transaction], criteria: &TransactionFilter) -> TrackerResult<Vec<Transaction>> {
    criteria.validate()?;
    Ok(list.iter().filter(|t| criteria.matches(t)).cloned().collect())
}

pub fn totals(list: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in list {
        match t.kind {
            TransactionType::Income => income += t.amount,
            TransactionType::Expense => expense += t.amount,
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Transactions whose ISO date starts with `prefix` (usually `YYYY-MM`).
pub fn in_month(list: &[Transaction], prefix: &str) -> Vec<Transaction> {
    list.iter()
        .filter(|t| t.date.to_string().starts_with(prefix))
        .cloned()
        .collect()
}

/// `value / total * 100` rounded to two decimals; zero when `total` is zero.
pub fn percentage(value: Decimal, total: Decimal) -> Decimal {
    let Some(ratio) = value.checked_div(total) else {
        return Decimal::ZERO;
    };
    let pct = ratio * Decimal::ONE_HUNDRED;
    // half-up towards positive infinity
    let strategy = if pct.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    pct.round_dp_with_strategy(2, strategy)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: String,
    pub total: Decimal,
    pub percentage: Decimal,
    pub count: usize,
}

/// Sums `kind` transactions per category, largest bucket first. Unknown
/// category ids get the uncategorized placeholder.
pub fn by_category(
    list: &[Transaction],
    kind: TransactionType,
    categories: &[Category],
) -> Vec<CategorySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<CategorySummary> = Vec::new();

    for t in list.iter().filter(|t| t.kind == kind) {
        match index.get(t.category_id.as_str()) {
            Some(&i) => {
                buckets[i].total += t.amount;
                buckets[i].count += 1;
            }
            None => {
                let category = categories.iter().find(|c| c.id == t.category_id);
                index.insert(t.category_id.as_str(), buckets.len());
                buckets.push(CategorySummary {
                    category_id: t.category_id.clone(),
                    category_name: category
                        .map_or_else(|| UNCATEGORIZED.to_string(), |c| c.name.clone()),
                    category_icon: category
                        .map_or_else(|| DEFAULT_ICON.to_string(), |c| c.icon.clone()),
                    total: t.amount,
                    percentage: Decimal::ZERO,
                    count: 1,
                });
            }
        }
    }

    let grand: Decimal = buckets.iter().map(|b| b.total).sum();
    for b in &mut buckets {
        b.percentage = percentage(b.total, grand);
    }
    buckets.sort_by(|a, b| b.total.cmp(&a.total));
    buckets
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub year: i32,
    pub month_number: u32,
    pub label: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Totals for the `months` calendar months ending with `today`'s, oldest first.
pub fn month_series(
    list: &[Transaction],
    months: usize,
    today: NaiveDate,
) -> TrackerResult<Vec<MonthlySummary>> {
    let months = i32::try_from(months)
        .ok()
        .filter(|m| *m <= MAX_SERIES_MONTHS)
        .ok_or_else(|| {
            TrackerError::validation(format!(
                "Too many months requested: {} (at most {})",
                months, MAX_SERIES_MONTHS
            ))
        })?;
    let series = (0..months)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(today.year(), today.month(), -back);
            let key = format!("{:04}-{:02}", year, month);
            let t = totals(&in_month(list, &key));
            MonthlySummary {
                label: MONTH_NAMES[month as usize - 1][..3].to_string(),
                month: key,
                year,
                month_number: month,
                total_income: t.income,
                total_expense: t.expense,
                balance: t.balance,
            }
        })
        .collect();
    Ok(series)
}

/// Moves a (year, 1-based month) pair by `delta` calendar months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let idx = year * 12 + month as i32 - 1 + delta;
    (idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    ThisMonth,
    LastMonth,
    ThisYear,
    Custom,
}

impl FromStr for RangePreset {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "this-month" => Ok(RangePreset::ThisMonth),
            "last-month" => Ok(RangePreset::LastMonth),
            "this-year" => Ok(RangePreset::ThisYear),
            "custom" => Ok(RangePreset::Custom),
            other => Err(TrackerError::validation(format!(
                "Unknown range '{}', expected this-month|last-month|this-year|custom",
                other
            ))),
        }
    }
}

/// Inclusive date window. Open ends impose no bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub label: String,
}

impl DateRange {
    /// Calendar-month/year windows relative to `today`. `Custom` yields an open range.
    pub fn preset(preset: RangePreset, today: NaiveDate) -> TrackerResult<DateRange> {
        let (year, month) = (today.year(), today.month());
        match preset {
            RangePreset::ThisMonth => month_range(year, month),
            RangePreset::LastMonth => {
                let (y, m) = shift_month(year, month, -1);
                month_range(y, m)
            }
            RangePreset::ThisYear => Ok(DateRange {
                start: NaiveDate::from_ymd_opt(year, 1, 1),
                end: NaiveDate::from_ymd_opt(year, 12, 31),
                label: format!("Year {}", year),
            }),
            RangePreset::Custom => DateRange::custom(None, None),
        }
    }

    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> TrackerResult<DateRange> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(TrackerError::validation(format!(
                    "End date {} is before start date {}",
                    e, s
                )));
            }
        }
        let label = match (start, end) {
            (Some(s), Some(e)) => format!("{} – {}", s, e),
            (Some(s), None) => format!("From {}", s),
            (None, Some(e)) => format!("Until {}", e),
            (None, None) => "Custom range".to_string(),
        };
        Ok(DateRange { start, end, label })
    }

    pub fn to_filter(&self) -> TransactionFilter {
        TransactionFilter {
            start_date: self.start,
            end_date: self.end,
            ..Default::default()
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn month_range(year: i32, month: u32) -> TrackerResult<DateRange> {
    let (ny, nm) = shift_month(year, month, 1);
    let start = NaiveDate::from_ymd_opt(year, month, 1);
    let end = NaiveDate::from_ymd_opt(ny, nm, 1).and_then(|d| d.pred_opt());
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange {
            start: Some(start),
            end: Some(end),
            label: format!("{} {}", MONTH_NAMES[month as usize - 1], year),
        }),
        _ => Err(TrackerError::validation(format!(
            "Month {}-{:02} is out of range",
            year, month
        ))),
    }
}
