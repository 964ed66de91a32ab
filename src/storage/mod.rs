// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence backends.
//!
//! Exactly one [`Backend`] is active per session, picked once from the
//! configuration. The local envelope is always available as well, since the
//! stores fall back to it when the active backend cannot be read.

pub mod local;
pub mod remote;

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::Config;
use crate::models::{
    Category, CategoryPatch, NewCategory, NewTransaction, Transaction, TransactionPatch,
};

pub use local::LocalStorage;
pub use remote::RemoteStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote store answered {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("no {table} row with id '{id}'")]
    MissingRow { table: &'static str, id: String },
}

/// Row-level CRUD over the two tables. Every call is a single round-trip;
/// failures are returned as-is, nothing is retried or queued.
pub trait Backend {
    fn name(&self) -> &'static str;

    fn load_categories(&self) -> Result<Vec<Category>, StorageError>;
    fn insert_category(&self, new: &NewCategory) -> Result<Category, StorageError>;
    fn update_category(&self, id: &str, patch: &CategoryPatch)
    -> Result<Category, StorageError>;
    fn delete_category(&self, id: &str) -> Result<(), StorageError>;

    fn load_transactions(&self) -> Result<Vec<Transaction>, StorageError>;
    fn insert_transaction(
        &self,
        new: &NewTransaction,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError>;
    fn update_transaction(
        &self,
        id: &str,
        patch: &TransactionPatch,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StorageError>;
    fn delete_transaction(&self, id: &str) -> Result<(), StorageError>;
}

/// The active backend plus the local envelope used as a read fallback.
pub struct Storage {
    backend: Box<dyn Backend>,
    local: LocalStorage,
}

impl Storage {
    pub fn new(backend: Box<dyn Backend>, local: LocalStorage) -> Self {
        Storage { backend, local }
    }

    pub fn local_only(local: LocalStorage) -> Self {
        Storage {
            backend: Box::new(local.clone()),
            local,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let local = LocalStorage::new(cfg.local_data_path()?);
        match &cfg.remote {
            Some(remote) => {
                tracing::info!(url = %remote.url, "using remote store");
                Ok(Storage::new(Box::new(RemoteStore::new(remote)?), local))
            }
            None => {
                tracing::info!(path = %local.path().display(), "remote store not configured, using local envelope");
                Ok(Storage::local_only(local))
            }
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn local(&self) -> &LocalStorage {
        &self.local
    }

    pub fn is_local(&self) -> bool {
        self.backend.name() == local::NAME
    }
}
