// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use spendlog::models::{
    Category, CategoryPatch, NewCategory, NewTransaction, Transaction, TransactionPatch,
    TransactionType,
};
use spendlog::storage::{Backend, LocalStorage, Storage, StorageError};

#[derive(Default)]
pub struct MemoryState {
    pub categories: RefCell<Vec<Category>>,
    pub transactions: RefCell<Vec<Transaction>>,
    pub fail_writes: Cell<bool>,
    pub fail_transaction_loads: Cell<bool>,
    pub writes: Cell<usize>,
    next_id: Cell<u32>,
}

/// In-memory backend; clones share state so tests can inspect what was persisted.
#[derive(Clone, Default)]
pub struct MemoryBackend(pub Rc<MemoryState>);

impl MemoryBackend {
    pub fn with(categories: Vec<Category>, transactions: Vec<Transaction>) -> Self {
        let b = MemoryBackend::default();
        *b.0.categories.borrow_mut() = categories;
        *b.0.transactions.borrow_mut() = transactions;
        b
    }

    fn write_guard(&self) -> Result<(), StorageError> {
        if self.0.fail_writes.get() {
            return Err(StorageError::Remote {
                status: 500,
                body: "write rejected".into(),
            });
        }
        self.0.writes.set(self.0.writes.get() + 1);
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.0.next_id.get() + 1;
        self.0.next_id.set(n);
        format!("{}-{}", prefix, n)
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.0.categories.borrow().clone())
    }

    fn insert_category(&self, new: &NewCategory) -> Result<Category, StorageError> {
        self.write_guard()?;
        let c = Category {
            id: self.next_id("cat"),
            name: new.name.clone(),
            icon: new.icon.clone(),
            is_system: false,
            is_active: true,
        };
        self.0.categories.borrow_mut().push(c.clone());
        Ok(c)
    }

    fn update_category(&self, id: &str, patch: &CategoryPatch) -> Result<Category, StorageError> {
        self.write_guard()?;
        let mut cats = self.0.categories.borrow_mut();
        let c = cats
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StorageError::MissingRow {
                table: "categories",
                id: id.to_string(),
            })?;
        c.apply(patch);
        Ok(c.clone())
    }

    fn delete_category(&self, id: &str) -> Result<(), StorageError> {
        self.write_guard()?;
        self.0.categories.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>, StorageError> {
        if self.0.fail_transaction_loads.get() {
            return Err(StorageError::Remote {
                status: 503,
                body: "down".into(),
            });
        }
        Ok(self.0.transactions.borrow().clone())
    }

    fn insert_transaction(
        &self,
        new: &NewTransaction,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        self.write_guard()?;
        let t = Transaction::from_new(self.next_id("tx"), new, now);
        self.0.transactions.borrow_mut().push(t.clone());
        Ok(t)
    }

    fn update_transaction(
        &self,
        id: &str,
        patch: &TransactionPatch,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        self.write_guard()?;
        let mut txs = self.0.transactions.borrow_mut();
        let t = txs
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::MissingRow {
                table: "transactions",
                id: id.to_string(),
            })?;
        t.apply(patch, now);
        Ok(t.clone())
    }

    fn delete_transaction(&self, id: &str) -> Result<(), StorageError> {
        self.write_guard()?;
        self.0.transactions.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }
}

/// Backend whose every call fails, standing in for an unreachable remote store.
pub struct FailingBackend;

fn unavailable() -> StorageError {
    StorageError::Remote {
        status: 503,
        body: "service unavailable".into(),
    }
}

impl Backend for FailingBackend {
    fn name(&self) -> &'static str {
        "failing"
    }
    fn load_categories(&self) -> Result<Vec<Category>, StorageError> {
        Err(unavailable())
    }
    fn insert_category(&self, _: &NewCategory) -> Result<Category, StorageError> {
        Err(unavailable())
    }
    fn update_category(&self, _: &str, _: &CategoryPatch) -> Result<Category, StorageError> {
        Err(unavailable())
    }
    fn delete_category(&self, _: &str) -> Result<(), StorageError> {
        Err(unavailable())
    }
    fn load_transactions(&self) -> Result<Vec<Transaction>, StorageError> {
        Err(unavailable())
    }
    fn insert_transaction(
        &self,
        _: &NewTransaction,
        _: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        Err(unavailable())
    }
    fn update_transaction(
        &self,
        _: &str,
        _: &TransactionPatch,
        _: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        Err(unavailable())
    }
    fn delete_transaction(&self, _: &str) -> Result<(), StorageError> {
        Err(unavailable())
    }
}

pub fn memory_storage(backend: &MemoryBackend, dir: &tempfile::TempDir) -> Storage {
    Storage::new(
        Box::new(backend.clone()),
        LocalStorage::new(dir.path().join("spendlog.json")),
    )
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub fn tx(id: &str, day: &str, kind: TransactionType, amount: i64, category: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date(day),
        description: format!("{} {}", kind.label(), id),
        kind,
        category_id: category.to_string(),
        amount: Decimal::from(amount),
        payment_method: None,
        notes: None,
        created_at: stamp(),
        updated_at: stamp(),
    }
}

pub fn category(id: &str, name: &str, is_system: bool) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: "🏷".to_string(),
        is_system,
        is_active: true,
    }
}

pub fn new_tx(day: &str, kind: TransactionType, amount: i64, category: &str) -> NewTransaction {
    NewTransaction {
        date: date(day),
        description: "Groceries".into(),
        kind,
        category_id: category.to_string(),
        amount: Decimal::from(amount),
        payment_method: None,
        notes: None,
    }
}

/// The two-transaction scenario: an expense on the 1st and an income on the 15th of March 2024.
pub fn march_pair() -> Vec<Transaction> {
    vec![
        tx("t1", "2024-03-01", TransactionType::Expense, 100, "food"),
        tx("t2", "2024-03-15", TransactionType::Income, 500, "salary"),
    ]
}
