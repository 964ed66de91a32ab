// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::storage::Storage;

pub fn handle(storage: &Storage) -> Result<()> {
    let local = storage.local();
    let seeded = local
        .init()
        .with_context(|| format!("Seed local envelope at {}", local.path().display()))?;
    if seeded {
        println!("Local envelope created at {}", local.path().display());
    } else {
        println!("Local envelope already present at {}", local.path().display());
    }
    println!("Active backend: {}", storage.backend().name());
    Ok(())
}
