// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use spendlog::config::Config;
use spendlog::storage::Storage;
use spendlog::{cli, commands};

fn init_logging() {
    let filter = EnvFilter::try_from_env("SPENDLOG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::from_env()?
        .with_data_file(matches.get_one::<std::path::PathBuf>("data-file").cloned());
    let storage = Storage::from_config(&config)?;

    match matches.subcommand() {
        Some(("init", _)) => commands::init::handle(&storage)?,
        Some(("category", sub)) => commands::categories::handle(&storage, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&storage, sub)?,
        Some(("report", sub)) => commands::reports::handle(&storage, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&storage, sub)?,
        Some(("import", sub)) => commands::importer::handle(&storage, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
