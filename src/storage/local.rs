// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{Backend, StorageError};
use crate::defaults::{APP_VERSION, merge_categories, system_categories};
use crate::error::TrackerError;
use crate::export::parse_backup;
use crate::models::{
    AppData, Category, CategoryPatch, NewCategory, NewTransaction, Transaction, TransactionPatch,
};
use crate::utils::generate_id;

pub const NAME: &str = "local";

/// Single-document JSON envelope on disk. Every write replaces the whole file;
/// there is no locking against other processes.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the envelope, reconciling categories with the system set.
    /// A missing or unreadable file yields the default envelope.
    pub fn read(&self) -> AppData {
        match self.read_raw() {
            Ok(Some(data)) => reconcile(data),
            Ok(None) => default_data(),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "cannot read local envelope, using defaults");
                default_data()
            }
        }
    }

    fn read_raw(&self) -> Result<Option<AppData>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_err(source)),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn write(&self, data: &AppData) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let body = serde_json::to_string(data)?;
        fs::write(&self.path, body).map_err(|e| self.io_err(e))?;
        tracing::debug!(
            path = %self.path.display(),
            transactions = data.transactions.len(),
            categories = data.categories.len(),
            "wrote local envelope"
        );
        Ok(())
    }

    /// Writes the default envelope when no file exists yet. Returns whether it seeded.
    pub fn init(&self) -> Result<bool, StorageError> {
        if self.exists() {
            return Ok(false);
        }
        self.write(&default_data())?;
        Ok(true)
    }

    /// Replaces the stored envelope with a backup. Nothing is written unless the
    /// backup parses and carries both lists.
    pub fn import_json(&self, raw: &str) -> Result<AppData, TrackerError> {
        let backup = parse_backup(raw)?;
        let data = AppData {
            transactions: backup.transactions,
            categories: backup.categories,
            version: APP_VERSION.to_string(),
        };
        self.write(&data)?;
        tracing::info!(
            transactions = data.transactions.len(),
            categories = data.categories.len(),
            "imported backup"
        );
        Ok(data)
    }

    /// Read-modify-write. Unlike [`Self::read`], an unparseable envelope is an
    /// error here so the file is never overwritten with defaults.
    fn modify<T>(
        &self,
        f: impl FnOnce(&mut AppData) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut data = match self.read_raw()? {
            Some(data) => reconcile(data),
            None => default_data(),
        };
        let out = f(&mut data)?;
        self.write(&data)?;
        Ok(out)
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

pub fn default_data() -> AppData {
    AppData {
        transactions: Vec::new(),
        categories: system_categories(),
        version: APP_VERSION.to_string(),
    }
}

/// Version mismatch, or any system category missing, rebuilds the list as
/// system set + stored user categories.
pub fn reconcile(mut data: AppData) -> AppData {
    let system = system_categories();
    let missing = system
        .iter()
        .any(|s| !data.categories.iter().any(|c| c.id == s.id));
    if data.version != APP_VERSION || missing {
        tracing::info!(stored_version = %data.version, "merging system categories into stored envelope");
        data.categories = merge_categories(&system, data.categories);
        data.version = APP_VERSION.to_string();
    }
    data
}

impl Backend for LocalStorage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn load_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.read().categories)
    }

    fn insert_category(&self, new: &NewCategory) -> Result<Category, StorageError> {
        let category = Category {
            id: generate_id(),
            name: new.name.clone(),
            icon: new.icon.clone(),
            is_system: false,
            is_active: true,
        };
        self.modify(|data| {
            data.categories.push(category.clone());
            Ok(category)
        })
    }

    fn update_category(
        &self,
        id: &str,
        patch: &CategoryPatch,
    ) -> Result<Category, StorageError> {
        self.modify(|data| {
            let category = data
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| StorageError::MissingRow {
                    table: "categories",
                    id: id.to_string(),
                })?;
            category.apply(patch);
            Ok(category.clone())
        })
    }

    fn delete_category(&self, id: &str) -> Result<(), StorageError> {
        self.modify(|data| {
            data.categories.retain(|c| c.id != id);
            Ok(())
        })
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>, StorageError> {
        Ok(self.read().transactions)
    }

    fn insert_transaction(
        &self,
        new: &NewTransaction,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        let tx = Transaction::from_new(generate_id(), new, now);
        self.modify(|data| {
            data.transactions.push(tx.clone());
            Ok(tx)
        })
    }

    fn update_transaction(
        &self,
        id: &str,
        patch: &TransactionPatch,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError> {
        self.modify(|data| {
            let tx = data
                .transactions
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| StorageError::MissingRow {
                    table: "transactions",
                    id: id.to_string(),
                })?;
            tx.apply(patch, now);
            Ok(tx.clone())
        })
    }

    fn delete_transaction(&self, id: &str) -> Result<(), StorageError> {
        self.modify(|data| {
            data.transactions.retain(|t| t.id != id);
            Ok(())
        })
    }
}
