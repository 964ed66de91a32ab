// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{NewTransaction, Totals, Transaction, TransactionFilter, TransactionPatch};
use crate::report;
use crate::storage::{Backend, Storage};
use crate::utils::today;

/// In-memory transaction list for one session, kept newest-first.
pub struct TransactionStore<'s> {
    storage: &'s Storage,
    transactions: Vec<Transaction>,
    load_error: Option<String>,
}

impl<'s> TransactionStore<'s> {
    /// Loads every transaction, newest first. Degrades to the local envelope on
    /// a read failure and records a non-fatal [`Self::load_error`].
    pub fn load(storage: &'s Storage) -> Self {
        let mut store = TransactionStore {
            storage,
            transactions: Vec::new(),
            load_error: None,
        };
        store.reload();
        store
    }

    pub fn reload(&mut self) {
        let (rows, error) = match self.storage.backend().load_transactions() {
            Ok(rows) => (rows, None),
            Err(e) => {
                tracing::warn!(backend = self.storage.backend().name(), error = %e, "loading transactions failed, falling back to local envelope");
                (
                    self.storage.local().read().transactions,
                    Some(format!("Could not load transactions: {}", e)),
                )
            }
        };
        self.transactions = rows;
        sort_newest_first(&mut self.transactions);
        self.load_error = error;
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn create(&mut self, new: NewTransaction) -> TrackerResult<Transaction> {
        new.validate()?;
        let tx = self
            .storage
            .backend()
            .insert_transaction(&new, Utc::now())?;
        tracing::info!(id = %tx.id, date = %tx.date, amount = %tx.amount, "created transaction");
        self.transactions.push(tx.clone());
        sort_newest_first(&mut self.transactions);
        Ok(tx)
    }

    /// Changes only the fields present in `patch`; the stored row returned by
    /// the backend replaces the in-memory copy.
    pub fn update(&mut self, id: &str, patch: &TransactionPatch) -> TrackerResult<Transaction> {
        patch.validate()?;
        if self.get_by_id(id).is_none() {
            return Err(TrackerError::NotFound {
                kind: "transaction",
                id: id.to_string(),
            });
        }
        let updated = self
            .storage
            .backend()
            .update_transaction(id, patch, Utc::now())?;
        tracing::info!(id, "updated transaction");
        if let Some(slot) = self.transactions.iter_mut().find(|t| t.id == id) {
            *slot = updated.clone();
        }
        sort_newest_first(&mut self.transactions);
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> TrackerResult<()> {
        self.storage.backend().delete_transaction(id)?;
        tracing::info!(id, "deleted transaction");
        self.transactions.retain(|t| t.id != id);
        Ok(())
    }

    pub fn filter(&self, criteria: &TransactionFilter) -> TrackerResult<Vec<Transaction>> {
        report::filter(&self.transactions, criteria)
    }

    /// Sums over exactly `list`, not the whole store.
    pub fn totals(&self, list: &[Transaction]) -> Totals {
        report::totals(list)
    }

    pub fn current_month(&self) -> Vec<Transaction> {
        self.current_month_at(today())
    }

    pub fn current_month_at(&self, today: NaiveDate) -> Vec<Transaction> {
        report::in_month(&self.transactions, &today.format("%Y-%m").to_string())
    }

    pub fn recent(&self, n: usize) -> Vec<Transaction> {
        self.transactions.iter().take(n).cloned().collect()
    }

    pub fn references_category(&self, category_id: &str) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.category_id == category_id)
            .count()
    }
}

fn sort_newest_first(list: &mut [Transaction]) {
    list.sort_by(|a, b| b.date.cmp(&a.date));
}
