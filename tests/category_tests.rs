// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FailingBackend, MemoryBackend, category, memory_storage, tx};
use spendlog::defaults::{merge_categories, system_categories};
use spendlog::error::TrackerError;
use spendlog::models::{CategoryPatch, NewCategory, TransactionType};
use spendlog::storage::{LocalStorage, Storage};
use spendlog::store::{CategoryStore, TransactionStore, delete_unused_category};
use tempfile::tempdir;

fn seeded() -> MemoryBackend {
    MemoryBackend::with(
        vec![
            category("cat-custom", "zebra", false),
            category("cat-food", "Food", true),
            category("cat-old", "Archived", false),
            category("cat-transport", "Transport", true),
            category("cat-books", "Books", false),
        ],
        vec![tx("t1", "2024-03-01", TransactionType::Expense, 10, "cat-books")],
    )
}

#[test]
fn load_orders_system_first_then_by_name() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    backend.0.categories.borrow_mut()[2].is_active = false;
    let storage = memory_storage(&backend, &dir);
    let store = CategoryStore::load(&storage);
    let active: Vec<&str> = store.get_active().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(active, ["cat-food", "cat-transport", "cat-books", "cat-custom"]);
    // disabled categories stay loaded so they can be re-enabled or exported
    assert_eq!(store.all().len(), 5);
    assert!(!store.get_by_id("cat-old").unwrap().is_active);
    assert!(store.load_error().is_none());
}

#[test]
fn disabled_category_can_be_enabled_again() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    backend.0.categories.borrow_mut()[2].is_active = false;
    let storage = memory_storage(&backend, &dir);
    let mut store = CategoryStore::load(&storage);
    assert_eq!(store.get_active().len(), 4);

    let patch = CategoryPatch {
        is_active: Some(true),
        ..Default::default()
    };
    let enabled = store.update("cat-old", &patch).unwrap();
    assert!(enabled.is_active);
    assert_eq!(store.get_active().len(), 5);

    let reloaded = CategoryStore::load(&storage);
    assert!(reloaded.get_by_id("cat-old").unwrap().is_active);
}

#[test]
fn disabled_category_can_be_deleted() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    backend.0.categories.borrow_mut()[2].is_active = false;
    let storage = memory_storage(&backend, &dir);
    let mut store = CategoryStore::load(&storage);
    store.delete("cat-old").unwrap();
    assert!(store.get_by_id("cat-old").is_none());
}

#[test]
fn system_category_cannot_be_edited_or_deleted() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    let storage = memory_storage(&backend, &dir);
    let mut store = CategoryStore::load(&storage);

    let patch = CategoryPatch {
        name: Some("Groceries".into()),
        ..Default::default()
    };
    let err = store.update("cat-food", &patch).unwrap_err();
    assert!(matches!(err, TrackerError::SystemCategory { .. }));
    let err = store.delete("cat-food").unwrap_err();
    assert!(err.is_validation());

    assert_eq!(backend.0.writes.get(), 0);
    assert_eq!(store.get_by_id("cat-food").unwrap().name, "Food");
}

#[test]
fn user_category_without_transactions_can_be_deleted() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    let storage = memory_storage(&backend, &dir);
    let mut categories = CategoryStore::load(&storage);
    let transactions = TransactionStore::load(&storage);

    delete_unused_category(&mut categories, &transactions, "cat-custom").unwrap();
    assert!(categories.get_by_id("cat-custom").is_none());
    assert!(backend.0.categories.borrow().iter().all(|c| c.id != "cat-custom"));
}

#[test]
fn category_in_use_is_not_deleted() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    let storage = memory_storage(&backend, &dir);
    let mut categories = CategoryStore::load(&storage);
    let transactions = TransactionStore::load(&storage);

    let err = delete_unused_category(&mut categories, &transactions, "cat-books").unwrap_err();
    assert!(err.to_string().contains("1 transaction"));
    assert!(categories.get_by_id("cat-books").is_some());
    assert_eq!(backend.0.writes.get(), 0);
}

#[test]
fn delete_refused_when_transactions_could_not_be_loaded() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    backend.0.fail_transaction_loads.set(true);
    let storage = memory_storage(&backend, &dir);
    let mut categories = CategoryStore::load(&storage);
    let transactions = TransactionStore::load(&storage);
    assert!(transactions.load_error().is_some());
    // the local fallback is empty, so it cannot vouch for the category being unused
    assert_eq!(transactions.references_category("cat-books"), 0);

    let err = delete_unused_category(&mut categories, &transactions, "cat-books").unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert!(categories.get_by_id("cat-books").is_some());
    assert_eq!(backend.0.categories.borrow().len(), 5);
    assert_eq!(backend.0.writes.get(), 0);
}

#[test]
fn create_marks_user_category_active() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    let storage = memory_storage(&backend, &dir);
    let mut store = CategoryStore::load(&storage);
    let created = store
        .create(NewCategory {
            name: "Pets".into(),
            icon: "🐶".into(),
        })
        .unwrap();
    assert!(!created.is_system);
    assert!(created.is_active);
    assert_eq!(store.get_active().len(), 6);
    // sorted in among the user categories
    let ids: Vec<&str> = store.all().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(&ids[2..], ["Archived", "Books", "Pets", "zebra"]);
}

#[test]
fn update_persists_only_changed_fields() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    let storage = memory_storage(&backend, &dir);
    let mut store = CategoryStore::load(&storage);
    let patch = CategoryPatch {
        icon: Some("📖".into()),
        ..Default::default()
    };
    let updated = store.update("cat-books", &patch).unwrap();
    assert_eq!(updated.name, "Books");
    assert_eq!(updated.icon, "📖");
    assert_eq!(store.get_by_id("cat-books").unwrap().icon, "📖");
}

#[test]
fn failed_write_leaves_memory_untouched() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    let storage = memory_storage(&backend, &dir);
    let mut store = CategoryStore::load(&storage);
    backend.0.fail_writes.set(true);

    let err = store.delete("cat-custom").unwrap_err();
    assert!(matches!(err, TrackerError::Persistence(_)));
    assert!(store.get_by_id("cat-custom").is_some());

    let err = store
        .create(NewCategory {
            name: "Pets".into(),
            icon: "🐶".into(),
        })
        .unwrap_err();
    assert!(matches!(err, TrackerError::Persistence(_)));
    assert_eq!(store.all().len(), 5);
}

#[test]
fn unknown_category_is_not_found() {
    let dir = tempdir().unwrap();
    let backend = seeded();
    let storage = memory_storage(&backend, &dir);
    let mut store = CategoryStore::load(&storage);
    let err = store.delete("nope").unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { .. }));
}

#[test]
fn unreachable_backend_degrades_to_local_envelope() {
    let dir = tempdir().unwrap();
    let local = LocalStorage::new(dir.path().join("spendlog.json"));
    local.init().unwrap();
    let storage = Storage::new(Box::new(FailingBackend), local);

    let store = CategoryStore::load(&storage);
    assert!(store.load_error().is_some());
    assert_eq!(store.all().len(), system_categories().len());
    assert!(store.all().iter().all(|c| c.is_system));
}

#[test]
fn merge_keeps_system_set_and_user_categories() {
    let system = vec![
        category("cat-food", "Food", true),
        category("cat-transport", "Transport", true),
    ];
    let stored = vec![
        category("cat-food", "Food (old)", true),
        category("cat-custom", "Custom", false),
    ];
    let merged = merge_categories(&system, stored);
    let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["cat-food", "cat-transport", "cat-custom"]);
    assert_eq!(merged[0].name, "Food");
}
