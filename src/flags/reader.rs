//! Assemble per-marker activation records from the store.

use std::collections::BTreeMap;

use super::{Activation, ActivationRecord, MarkerId};
use crate::error::StoreError;
use crate::store::CacheStore;

/// Read every `StateFlags####` value across all categories and group them
/// into one [`ActivationRecord`] per distinct marker id.
///
/// A category whose values cannot be read (typically a permission problem
/// on that one key) contributes no markers instead of failing the whole
/// enumeration. Records are returned in ascending marker order.
///
/// # Errors
///
/// Propagates [`StoreError`] from the category enumeration itself — a
/// missing or unreadable volume caches root is fatal.
pub fn read_state_flags(store: &dyn CacheStore) -> Result<Vec<ActivationRecord>, StoreError> {
    let mut by_marker: BTreeMap<MarkerId, BTreeMap<String, Activation>> = BTreeMap::new();

    for category in store.categories()? {
        let values = match store.values(&category) {
            Ok(values) => values,
            // Per-category failures read as "no markers here".
            Err(_) => continue,
        };
        for (name, raw) in values {
            if let Some(marker) = MarkerId::from_value_name(&name) {
                by_marker
                    .entry(marker)
                    .or_default()
                    .insert(category.clone(), Activation::from_raw(raw));
            }
        }
    }

    Ok(by_marker
        .into_iter()
        .map(|(marker, categories)| ActivationRecord { marker, categories })
        .collect())
}

/// Read the activation record for a single marker, if any category defines it.
///
/// # Errors
///
/// Same failure modes as [`read_state_flags`].
pub fn read_marker(
    store: &dyn CacheStore,
    marker: MarkerId,
) -> Result<Option<ActivationRecord>, StoreError> {
    Ok(read_state_flags(store)?
        .into_iter()
        .find(|r| r.marker == marker))
}
