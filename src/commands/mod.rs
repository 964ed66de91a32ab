// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod exporter;
pub mod importer;
pub mod init;
pub mod reports;
pub mod transactions;

use anyhow::{Context, Result};

pub(crate) fn required_arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("--{} is required", name))
}

pub(crate) fn warn_degraded(load_error: Option<&str>) {
    if let Some(msg) = load_error {
        eprintln!("warning: {} (showing locally stored data)", msg);
    }
}
