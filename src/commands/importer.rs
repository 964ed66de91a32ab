// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required_arg;
use crate::storage::Storage;
use anyhow::{Context, Result, bail};

pub fn handle(storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => import_json(storage, sub),
        _ => Ok(()),
    }
}

fn import_json(storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    if !storage.is_local() {
        bail!("Import is only available with local storage; unset SPENDLOG_REMOTE_URL to use it");
    }
    let path = required_arg(sub, "path")?.trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open backup {}", path))?;
    let data = storage.local().import_json(&raw)?;
    println!(
        "Imported {} transactions and {} categories from {}",
        data.transactions.len(),
        data.categories.len(),
        path
    );
    Ok(())
}
