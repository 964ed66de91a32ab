// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn code(self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TransactionType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionType::Income),
            "expense" | "out" => Ok(TransactionType::Expense),
            other => Err(TrackerError::validation(format!(
                "Invalid transaction type '{}', expected income|expense",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    Transfer,
    Digital,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::DebitCard,
        PaymentMethod::CreditCard,
        PaymentMethod::Transfer,
        PaymentMethod::Digital,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::Transfer => "TRANSFER",
            PaymentMethod::Digital => "DIGITAL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::DebitCard => "Debit card",
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Digital => "Digital wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PaymentMethod {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        let alias = match norm.as_str() {
            "DEBIT" => "DEBIT_CARD",
            "CREDIT" => "CREDIT_CARD",
            "WALLET" => "DIGITAL",
            other => other,
        };
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.code() == alias)
            .ok_or_else(|| {
                TrackerError::validation(format!(
                    "Invalid payment method '{}', expected cash|debit-card|credit-card|transfer|digital",
                    s.trim()
                ))
            })
    }
}

/// A recorded income or expense. Serialized in the local envelope's camelCase shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn from_new(id: String, new: &NewTransaction, now: DateTime<Utc>) -> Self {
        Transaction {
            id,
            date: new.date,
            description: new.description.clone(),
            kind: new.kind,
            category_id: new.category_id.clone(),
            amount: new.amount,
            payment_method: new.payment_method,
            notes: non_empty(new.notes.clone()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies every field present in `patch` and re-stamps `updated_at`.
    pub fn apply(&mut self, patch: &TransactionPatch, now: DateTime<Utc>) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category_id) = &patch.category_id {
            self.category_id = category_id.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(method) = patch.payment_method {
            self.payment_method = method;
        }
        if let Some(notes) = &patch.notes {
            self.notes = non_empty(notes.clone());
        }
        self.updated_at = now.max(self.created_at);
    }
}

/// Caller-supplied fields for a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionType,
    pub category_id: String,
    pub amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), TrackerError> {
        validate_amount(self.amount)
    }
}

/// Partial update. `None` leaves a field untouched; for the optional fields
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub kind: Option<TransactionType>,
    pub category_id: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_method: Option<Option<PaymentMethod>>,
    pub notes: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == TransactionPatch::default()
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        match self.amount {
            Some(amount) => validate_amount(amount),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub is_system: bool,
    pub is_active: bool,
}

impl Category {
    pub fn apply(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        *self == CategoryPatch::default()
    }
}

/// The single document persisted by the local backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub version: String,
}

/// Filter criteria; every supplied field is ANDed, absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        TransactionFilter {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(TrackerError::validation(format!(
                    "End date {} is before start date {}",
                    end, start
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != t.kind) {
            return false;
        }
        if self
            .category_id
            .as_deref()
            .is_some_and(|c| !c.is_empty() && c != t.category_id)
        {
            return false;
        }
        if self.payment_method.is_some() && self.payment_method != t.payment_method {
            return false;
        }
        if self.start_date.is_some_and(|d| t.date < d) {
            return false;
        }
        if self.end_date.is_some_and(|d| t.date > d) {
            return false;
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !t
                .description
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

fn validate_amount(amount: Decimal) -> Result<(), TrackerError> {
    if amount <= Decimal::ZERO {
        return Err(TrackerError::validation(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }
    Ok(())
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}
