//! Write a marker profile across all eligible categories.
//!
//! Writing is split into a pure planning step and an apply step so that
//! dry-run mode can describe the exact writes without performing any, and
//! so validation errors surface before the store is touched.

use std::collections::BTreeSet;

use super::{EXCLUDED_CATEGORIES, MarkerId, RAW_DISABLED, RAW_ENABLED, normalize_token};
use crate::error::{CleanError, InputError, StoreError};
use crate::store::CacheStore;

/// One pending registry write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    /// Registry sub-key name of the category.
    pub category: String,
    /// Marker value name, e.g. `StateFlags1337`.
    pub value_name: String,
    /// Raw DWORD to write: 2 (enabled) or 0 (disabled).
    pub value: u32,
}

impl PlannedWrite {
    /// Whether this write enables the category for the marker.
    #[must_use]
    pub const fn enables(&self) -> bool {
        self.value == RAW_ENABLED
    }
}

/// List the categories a caller may select, i.e. everything the store knows
/// minus the fixed deny-list.
///
/// # Errors
///
/// Propagates [`StoreError`] from the category enumeration.
pub fn selectable_categories(store: &dyn CacheStore) -> Result<Vec<String>, StoreError> {
    Ok(store
        .categories()?
        .into_iter()
        .filter(|c| !EXCLUDED_CATEGORIES.contains(&c.as_str()))
        .collect())
}

/// Build the full overwrite plan for `marker`: every eligible category gets
/// a write, enabled when its whitespace-stripped token is in `selected`,
/// disabled otherwise. Deny-listed categories never appear in the plan.
///
/// # Errors
///
/// [`InputError::UnknownCategory`] when a selection token matches no
/// eligible category; store errors from the enumeration. Nothing is written
/// by this function.
pub fn plan(
    store: &dyn CacheStore,
    marker: MarkerId,
    selected: &[String],
) -> Result<Vec<PlannedWrite>, CleanError> {
    let eligible = selectable_categories(store)?;
    let tokens: BTreeSet<String> = eligible.iter().map(|c| normalize_token(c)).collect();

    let mut chosen = BTreeSet::new();
    for raw in selected {
        let token = normalize_token(raw);
        if !tokens.contains(&token) {
            return Err(InputError::UnknownCategory {
                token: raw.clone(),
                available: tokens.iter().cloned().collect::<Vec<_>>().join(", "),
            }
            .into());
        }
        chosen.insert(token);
    }

    let value_name = marker.value_name();
    Ok(eligible
        .into_iter()
        .map(|category| {
            let value = if chosen.contains(&normalize_token(&category)) {
                RAW_ENABLED
            } else {
                RAW_DISABLED
            };
            PlannedWrite {
                category,
                value_name: value_name.clone(),
                value,
            }
        })
        .collect())
}

/// Perform the planned writes, failing fast: the first rejected write aborts
/// the remainder.
///
/// # Errors
///
/// [`StoreError::Access`] when a write is rejected due to permissions.
pub fn apply(store: &dyn CacheStore, writes: &[PlannedWrite]) -> Result<(), StoreError> {
    for write in writes {
        store.set_value(&write.category, &write.value_name, write.value)?;
    }
    Ok(())
}

/// Plan and immediately apply a marker profile; returns the writes made.
///
/// # Errors
///
/// Any error from [`plan`] or [`apply`].
pub fn set_state_flags(
    store: &dyn CacheStore,
    marker: MarkerId,
    selected: &[String],
) -> Result<Vec<PlannedWrite>, CleanError> {
    let writes = plan(store, marker, selected)?;
    apply(store, &writes).map_err(CleanError::from)?;
    Ok(writes)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::flags::Activation;
    use crate::flags::reader::read_marker;
    use crate::store::test_helpers::MemoryStore;

    fn os_store() -> MemoryStore {
        MemoryStore::with_categories(&[
            "Content Indexer Cleaner",
            "Device Driver Packages",
            "Previous Installations",
            "Recycle Bin",
            "Temporary Setup Files",
        ])
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn selectable_excludes_deny_listed_categories() {
        let store = os_store();
        let cats = selectable_categories(&store).unwrap();
        assert_eq!(
            cats,
            vec!["Previous Installations", "Recycle Bin", "Temporary Setup Files"]
        );
    }

    #[test]
    fn plan_covers_every_eligible_category() {
        let store = os_store();
        let marker = MarkerId::new(1337).unwrap();
        let writes = plan(&store, marker, &strings(&["TemporarySetupFiles"])).unwrap();

        assert_eq!(writes.len(), 3);
        assert!(writes.iter().all(|w| w.value_name == "StateFlags1337"));
        let enabled: Vec<&str> = writes
            .iter()
            .filter(|w| w.enables())
            .map(|w| w.category.as_str())
            .collect();
        assert_eq!(enabled, vec!["Temporary Setup Files"]);
    }

    #[test]
    fn plan_never_touches_deny_listed_categories() {
        let store = os_store();
        let marker = MarkerId::new(1).unwrap();
        let writes = plan(&store, marker, &[]).unwrap();
        assert!(
            writes
                .iter()
                .all(|w| !EXCLUDED_CATEGORIES.contains(&w.category.as_str()))
        );
    }

    #[test]
    fn plan_rejects_unknown_tokens_before_any_write() {
        let store = os_store();
        let marker = MarkerId::new(1).unwrap();
        let err = plan(&store, marker, &strings(&["NoSuchCategory"])).unwrap_err();
        assert!(matches!(
            err,
            CleanError::Input(InputError::UnknownCategory { .. })
        ));
        assert_eq!(store.value_count(), 0);
    }

    #[test]
    fn plan_rejects_deny_listed_selection() {
        // Deny-listed categories are not selectable even by exact token.
        let store = os_store();
        let marker = MarkerId::new(1).unwrap();
        let err = plan(&store, marker, &strings(&["DeviceDriverPackages"])).unwrap_err();
        assert!(matches!(err, CleanError::Input(_)));
    }

    #[test]
    fn selection_matches_after_whitespace_normalization() {
        let store = os_store();
        let marker = MarkerId::new(42).unwrap();
        // Caller may pass the display name with spaces; it normalizes to the
        // same token.
        let writes = plan(&store, marker, &strings(&["Previous Installations"])).unwrap();
        let enabled: Vec<&str> = writes
            .iter()
            .filter(|w| w.enables())
            .map(|w| w.category.as_str())
            .collect();
        assert_eq!(enabled, vec!["Previous Installations"]);
    }

    #[test]
    fn set_state_flags_round_trips_through_reader() {
        let store = os_store();
        let marker = MarkerId::new(7).unwrap();
        set_state_flags(
            &store,
            marker,
            &strings(&["TemporarySetupFiles", "PreviousInstallations"]),
        )
        .unwrap();

        let record = read_marker(&store, marker).unwrap().unwrap();
        assert_eq!(
            record.categories["Temporary Setup Files"],
            Activation::Enabled
        );
        assert_eq!(
            record.categories["Previous Installations"],
            Activation::Enabled
        );
        assert_eq!(record.categories["Recycle Bin"], Activation::Disabled);
        assert!(!record.categories.contains_key("Device Driver Packages"));
    }

    #[test]
    fn overwrite_is_full_not_merge() {
        let store = os_store();
        let marker = MarkerId::new(7).unwrap();
        set_state_flags(&store, marker, &strings(&["RecycleBin"])).unwrap();
        set_state_flags(&store, marker, &strings(&["TemporarySetupFiles"])).unwrap();

        let record = read_marker(&store, marker).unwrap().unwrap();
        // The second write disabled the previously selected category.
        assert_eq!(record.categories["Recycle Bin"], Activation::Disabled);
        assert_eq!(
            record.categories["Temporary Setup Files"],
            Activation::Enabled
        );
    }

    #[test]
    fn value_name_uses_zero_padded_marker() {
        let store = os_store();
        let writes = plan(&store, MarkerId::new(7).unwrap(), &[]).unwrap();
        assert!(writes.iter().all(|w| w.value_name == "StateFlags0007"));
    }

    #[test]
    fn apply_fails_fast_on_rejected_write() {
        let mut store = os_store();
        store.denied.push("Previous Installations".to_string());
        let marker = MarkerId::new(1).unwrap();
        let writes = plan(&store, marker, &[]).unwrap();

        let err = apply(&store, &writes).unwrap_err();
        assert!(err.is_access());
        // First category in plan order is the one that failed; nothing after
        // it was written.
        assert_eq!(store.value_count(), 0);
    }
}
