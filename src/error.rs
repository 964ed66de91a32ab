// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub use crate::storage::StorageError;

/// Failures surfaced by the stores, the report engine and the export formatter.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("system category '{id}' cannot be {action}")]
    SystemCategory { id: String, action: &'static str },

    #[error("{0}")]
    Validation(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("storage error: {0}")]
    Persistence(#[from] StorageError),

    #[error("invalid backup file: {0}")]
    ImportFormat(String),
}

impl TrackerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TrackerError::Validation(msg.into())
    }

    /// True for business-rule violations the caller should show to the user as-is.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TrackerError::SystemCategory { .. } | TrackerError::Validation(_)
        )
    }
}

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;
