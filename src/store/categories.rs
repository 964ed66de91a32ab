// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryPatch, NewCategory};
use crate::storage::{Backend, Storage};

/// In-memory category list for one session. System categories are read-only.
pub struct CategoryStore<'s> {
    storage: &'s Storage,
    categories: Vec<Category>,
    load_error: Option<String>,
}

impl<'s> CategoryStore<'s> {
    /// Loads every stored category, disabled ones included; [`Self::get_active`]
    /// is the visible set. Never fails: if the active backend cannot be read,
    /// the local envelope's list is used and [`Self::load_error`] is set.
    pub fn load(storage: &'s Storage) -> Self {
        let mut store = CategoryStore {
            storage,
            categories: Vec::new(),
            load_error: None,
        };
        store.reload();
        store
    }

    pub fn reload(&mut self) {
        let (rows, error) = match self.storage.backend().load_categories() {
            Ok(rows) => (rows, None),
            Err(e) => {
                tracing::warn!(backend = self.storage.backend().name(), error = %e, "loading categories failed, falling back to local envelope");
                (
                    self.storage.local().read().categories,
                    Some(format!("Could not load categories: {}", e)),
                )
            }
        };
        self.categories = rows;
        sort_categories(&mut self.categories);
        self.load_error = error;
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn get_active(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.is_active).collect()
    }

    /// Persists a user category. Name emptiness is the caller's check.
    pub fn create(&mut self, new: NewCategory) -> TrackerResult<Category> {
        let category = self.storage.backend().insert_category(&new)?;
        tracing::info!(id = %category.id, name = %category.name, "created category");
        self.categories.push(category.clone());
        sort_categories(&mut self.categories);
        Ok(category)
    }

    pub fn update(&mut self, id: &str, patch: &CategoryPatch) -> TrackerResult<Category> {
        self.ensure_mutable(id, "edited")?;
        let updated = self.storage.backend().update_category(id, patch)?;
        tracing::info!(id, "updated category");
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
            *slot = updated.clone();
        }
        sort_categories(&mut self.categories);
        Ok(updated)
    }

    /// Removes a user category. Does not look at transactions; callers must
    /// refuse categories still in use (see [`super::delete_unused_category`]).
    pub fn delete(&mut self, id: &str) -> TrackerResult<()> {
        self.ensure_mutable(id, "deleted")?;
        self.storage.backend().delete_category(id)?;
        tracing::info!(id, "deleted category");
        self.categories.retain(|c| c.id != id);
        Ok(())
    }

    fn ensure_mutable(&self, id: &str, action: &'static str) -> TrackerResult<()> {
        let category = self.get_by_id(id).ok_or_else(|| TrackerError::NotFound {
            kind: "category",
            id: id.to_string(),
        })?;
        if category.is_system {
            return Err(TrackerError::SystemCategory {
                id: id.to_string(),
                action,
            });
        }
        Ok(())
    }
}

/// System categories first, then by name.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        b.is_system
            .cmp(&a.is_system)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}
