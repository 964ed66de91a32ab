// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod transactions;

pub use categories::CategoryStore;
pub use transactions::TransactionStore;

use crate::error::{TrackerError, TrackerResult};

/// Deletes a category only if no transaction references it. Refused outright
/// when the transaction list came from the local fallback.
pub fn delete_unused_category(
    categories: &mut CategoryStore<'_>,
    transactions: &TransactionStore<'_>,
    id: &str,
) -> TrackerResult<()> {
    if let Some(reason) = transactions.load_error() {
        return Err(TrackerError::validation(format!(
            "Cannot check whether category '{}' is in use: {}",
            id, reason
        )));
    }
    let used = transactions.references_category(id);
    if used > 0 {
        return Err(TrackerError::validation(format!(
            "Category '{}' still has {} transaction(s)",
            id, used
        )));
    }
    categories.delete(id)
}
