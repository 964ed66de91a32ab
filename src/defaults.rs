// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;

pub const APP_VERSION: &str = "1.0.0";
pub const DEFAULT_ICON: &str = "📦";
pub const UNCATEGORIZED: &str = "Uncategorized";

// Ids are stable identifiers shared with existing stored data; names are display text.
const SYSTEM: [(&str, &str, &str); 13] = [
    ("cat-alimentacion", "Food", "🍔"),
    ("cat-ocio", "Entertainment", "🎮"),
    ("cat-salud", "Health", "🏥"),
    ("cat-transporte", "Transport", "🚗"),
    ("cat-hogar", "Home", "🏠"),
    ("cat-ropa", "Clothing", "👕"),
    ("cat-educacion", "Education", "📚"),
    ("cat-servicios", "Utilities", "💳"),
    ("cat-sueldo", "Salary", "💰"),
    ("cat-freelance", "Freelance", "💵"),
    ("cat-regalos", "Gifts", "🎁"),
    ("cat-inversiones", "Investments", "📈"),
    ("cat-otros", "Other", "📦"),
];

/// The predefined categories, in their fixed order.
pub fn system_categories() -> Vec<Category> {
    SYSTEM
        .iter()
        .map(|(id, name, icon)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
            icon: (*icon).to_string(),
            is_system: true,
            is_active: true,
        })
        .collect()
}

/// `system` in its fixed order followed by every user-created category from `stored`.
pub fn merge_categories(system: &[Category], stored: Vec<Category>) -> Vec<Category> {
    let mut merged = system.to_vec();
    merged.extend(
        stored
            .into_iter()
            .filter(|c| !c.is_system && !system.iter().any(|s| s.id == c.id)),
    );
    merged
}
