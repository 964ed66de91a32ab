// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Remote table store speaking the PostgREST dialect (`/rest/v1/<table>`).
//!
//! Rows use snake_case columns; optional columns are always sent, as explicit
//! `null` when empty, and `null` columns read back as absent fields.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Backend, StorageError};
use crate::config::RemoteConfig;
use crate::models::{
    Category, CategoryPatch, NewCategory, NewTransaction, PaymentMethod, Transaction,
    TransactionPatch, TransactionType,
};
use crate::utils::http_client;

pub const NAME: &str = "remote";

const CATEGORIES: &str = "categories";
const TRANSACTIONS: &str = "transactions";

#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: String,
    date: NaiveDate,
    description: String,
    #[serde(rename = "type")]
    kind: TransactionType,
    category_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(default)]
    payment_method: Option<PaymentMethod>,
    #[serde(default)]
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            id: row.id,
            date: row.date,
            description: row.description,
            kind: row.kind,
            category_id: row.category_id,
            amount: row.amount,
            payment_method: row.payment_method,
            notes: row.notes.filter(|n| !n.is_empty()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewTransactionRow<'a> {
    date: NaiveDate,
    description: &'a str,
    #[serde(rename = "type")]
    kind: TransactionType,
    category_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    payment_method: Option<PaymentMethod>,
    notes: Option<&'a str>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct TransactionRowPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<&'a str>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<Option<PaymentMethod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<Option<&'a str>>,
    updated_at: DateTime<Utc>,
}

impl<'a> TransactionRowPatch<'a> {
    fn new(patch: &'a TransactionPatch, now: DateTime<Utc>) -> Self {
        TransactionRowPatch {
            date: patch.date,
            description: patch.description.as_deref(),
            kind: patch.kind,
            category_id: patch.category_id.as_deref(),
            amount: patch.amount,
            payment_method: patch.payment_method,
            notes: patch
                .notes
                .as_ref()
                .map(|n| n.as_deref().filter(|s| !s.is_empty())),
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: String,
    name: String,
    icon: String,
    is_system: bool,
    is_active: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            icon: row.icon,
            is_system: row.is_system,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewCategoryRow<'a> {
    name: &'a str,
    icon: &'a str,
    is_system: bool,
    is_active: bool,
}

#[derive(Debug, Serialize)]
struct CategoryRowPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

pub struct RemoteStore {
    base_url: String,
    api_key: String,
    client: Client,
}

impl RemoteStore {
    pub fn new(cfg: &RemoteConfig) -> Result<Self> {
        Ok(RemoteStore {
            base_url: cfg.url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            client: http_client()?,
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn send(&self, rb: RequestBuilder) -> Result<Response, StorageError> {
        let resp = rb.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "remote store rejected request");
            return Err(StorageError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StorageError> {
        tracing::debug!(table, "select");
        let resp = self.send(self.request(Method::GET, table).query(query))?;
        Ok(resp.json()?)
    }

    fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &'static str,
        body: &B,
    ) -> Result<T, StorageError> {
        tracing::debug!(table, "insert");
        let resp = self.send(
            self.request(Method::POST, table)
                .header("Prefer", "return=representation")
                .json(body),
        )?;
        let mut rows: Vec<T> = resp.json()?;
        if rows.is_empty() {
            return Err(StorageError::Remote {
                status: 200,
                body: format!("insert into {} returned no row", table),
            });
        }
        Ok(rows.swap_remove(0))
    }

    fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: &str,
        body: &B,
    ) -> Result<T, StorageError> {
        tracing::debug!(table, id, "update");
        let filter = format!("eq.{}", id);
        let resp = self.send(
            self.request(Method::PATCH, table)
                .query(&[("id", filter.as_str())])
                .header("Prefer", "return=representation")
                .json(body),
        )?;
        let mut rows: Vec<T> = resp.json()?;
        if rows.is_empty() {
            return Err(StorageError::MissingRow {
                table,
                id: id.to_string(),
            });
        }
        Ok(rows.swap_remove(0))
    }

    fn delete(&self, table: &'static str, id: &str) -> Result<(), StorageError> {
        tracing::debug!(table, id, "delete");
        let filter = format!("eq.{}", id);
        self.send(
            self.request(Method::DELETE, table)
                .query(&[("id", filter.as_str())]),
        )?;
        Ok(())
    }
}

impl Backend for RemoteStore {
    fn name(&self) -> &'static str {
        NAME
    }

    fn load_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows: Vec<CategoryRow> = self.select(
            CATEGORIES,
            &[("select", "*"), ("order", "is_system.desc,name.asc")],
        )?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn insert_category(&self, new: &NewCategory) -> Result<Category, StorageError> {
        let row: CategoryRow = self.insert(
            CATEGORIES,
            &NewCategoryRow {
                name: &new.name,
                icon: &new.icon,
                is_system: false,
                is_active: true,
            },
        )?;
        Ok(row.into())
    }

    fn update_category(
        &self,
        id: &str,
        patch: &CategoryPatch,
    ) -> Result<Category, StorageError> {
        let body = CategoryRowPatch {
            name: patch.name.as_deref(),
            icon: patch.icon.as_deref(),
            is_active: patch.is_active,
        };
        let row: CategoryRow = self.update(CATEGORIES, id, &body)?;
        Ok(row.into())
    }

    fn delete_category(&self, id: &str) -> Result<(), StorageError> {
        self.delete(CATEGORIES, id)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>, StorageError> {
        let rows: Vec<TransactionRow> =
            self.select(TRANSACTIONS, &[("select", "*"), ("order", "date.desc")])?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn insert_transaction(
        &self,
        new: &NewTransaction,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        let body = NewTransactionRow {
            date: new.date,
            description: &new.description,
            kind: new.kind,
            category_id: &new.category_id,
            amount: new.amount,
            payment_method: new.payment_method,
            notes: new.notes.as_deref().filter(|n| !n.is_empty()),
            created_at: now,
            updated_at: now,
        };
        let row: TransactionRow = self.insert(TRANSACTIONS, &body)?;
        Ok(row.into())
    }

    fn update_transaction(
        &self,
        id: &str,
        patch: &TransactionPatch,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        let row: TransactionRow =
            self.update(TRANSACTIONS, id, &TransactionRowPatch::new(patch, now))?;
        Ok(row.into())
    }

    fn delete_transaction(&self, id: &str) -> Result<(), StorageError> {
        self.delete(TRANSACTIONS, id)
    }
}
