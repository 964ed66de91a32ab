// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendlog", "spendlog"));

pub const ENV_REMOTE_URL: &str = "SPENDLOG_REMOTE_URL";
pub const ENV_REMOTE_KEY: &str = "SPENDLOG_REMOTE_KEY";
pub const ENV_DATA_FILE: &str = "SPENDLOG_DATA_FILE";

/// Connection settings for the remote table store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub remote: Option<RemoteConfig>,
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Reads the environment (after an optional `.env`).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_vars(
            env::var(ENV_REMOTE_URL).ok(),
            env::var(ENV_REMOTE_KEY).ok(),
            env::var(ENV_DATA_FILE).ok(),
        ))
    }

    /// The remote store is only configured when both URL and key are non-blank.
    pub fn from_vars(
        remote_url: Option<String>,
        remote_key: Option<String>,
        data_file: Option<String>,
    ) -> Self {
        let url = remote_url.map(|s| s.trim().trim_end_matches('/').to_string());
        let key = remote_key.map(|s| s.trim().to_string());
        let remote = match (url, key) {
            (Some(url), Some(api_key)) if !url.is_empty() && !api_key.is_empty() => {
                Some(RemoteConfig { url, api_key })
            }
            _ => None,
        };
        let data_file = data_file
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Config { remote, data_file }
    }

    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.data_file = path;
        }
        self
    }

    pub fn local_data_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(p) => Ok(p.clone()),
            None => default_data_path(),
        }
    }
}

pub fn default_data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendlog.json"))
}
