// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{required_arg, warn_degraded};
use crate::export::{to_backup_json, to_csv};
use crate::storage::Storage;
use crate::store::{CategoryStore, TransactionStore};
use anyhow::{Context, Result};
use chrono::Utc;

pub fn handle(storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => export(storage, sub, Format::Csv),
        Some(("json", sub)) => export(storage, sub, Format::Json),
        _ => Ok(()),
    }
}

#[derive(Clone, Copy)]
enum Format {
    Csv,
    Json,
}

fn export(storage: &Storage, sub: &clap::ArgMatches, format: Format) -> Result<()> {
    let out = required_arg(sub, "out")?.trim();
    let transactions = TransactionStore::load(storage);
    let categories = CategoryStore::load(storage);
    warn_degraded(transactions.load_error());
    warn_degraded(categories.load_error());

    let body = match format {
        Format::Csv => to_csv(transactions.all(), categories.all())?,
        Format::Json => to_backup_json(transactions.all(), categories.all(), Utc::now())?,
    };
    std::fs::write(out, body).with_context(|| format!("Write export to {}", out))?;
    println!(
        "Exported {} transactions to {}",
        transactions.all().len(),
        out
    );
    Ok(())
}
