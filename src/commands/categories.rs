// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{required_arg, warn_degraded};
use crate::models::{CategoryPatch, NewCategory};
use crate::storage::Storage;
use crate::store::{CategoryStore, TransactionStore, delete_unused_category};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, bail};

pub fn handle(storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(storage, sub)?,
        Some(("list", sub)) => list(storage, sub)?,
        Some(("edit", sub)) => edit(storage, sub)?,
        Some(("rm", sub)) => remove(storage, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let name = required_arg(sub, "name")?.trim();
    if name.is_empty() {
        bail!("Category name is required");
    }
    let icon = sub
        .get_one::<String>("icon")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(crate::defaults::DEFAULT_ICON);
    let mut store = CategoryStore::load(storage);
    let created = store.create(NewCategory {
        name: name.to_string(),
        icon: icon.to_string(),
    })?;
    println!("Added category '{}' ({})", created.name, created.id);
    Ok(())
}

fn list(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let store = CategoryStore::load(storage);
    warn_degraded(store.load_error());
    let active = store.get_active();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &active)? {
        let rows = active
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.icon.clone(),
                    c.name.clone(),
                    if c.is_system { "system" } else { "custom" }.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Icon", "Name", "Kind"], rows));
    }
    Ok(())
}

fn edit(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?.trim();
    let name = sub.get_one::<String>("name").map(|s| s.trim().to_string());
    if name.as_deref().is_some_and(str::is_empty) {
        bail!("Category name is required");
    }
    let patch = CategoryPatch {
        name,
        icon: sub.get_one::<String>("icon").map(|s| s.trim().to_string()),
        is_active: sub.get_one::<bool>("active").copied(),
    };
    if patch.is_empty() {
        bail!("Nothing to change: pass --name, --icon or --active");
    }
    let mut store = CategoryStore::load(storage);
    let updated = store.update(id, &patch)?;
    println!("Updated category '{}'", updated.name);
    Ok(())
}

fn remove(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?.trim();
    let mut categories = CategoryStore::load(storage);
    let transactions = TransactionStore::load(storage);
    delete_unused_category(&mut categories, &transactions, id)?;
    println!("Removed category '{}'", id);
    Ok(())
}
