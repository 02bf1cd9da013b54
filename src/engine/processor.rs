//! Category filtering and seen-set tracking for fetched entries.

use std::{collections::HashSet, sync::Arc};

use crate::{
    identity,
    models::FeedEntry,
    persistence::{error::PersistenceError, traits::SeenStore, SeenSet},
};

/// Filters fetched entries down to the new, category-matching ones.
///
/// One `process` call is one load-filter-save cycle: the seen set is read
/// once, grown as matches are found, and persisted exactly once at the end.
pub struct EntryProcessor<S: SeenStore + ?Sized> {
    store: Arc<S>,
}

impl<S: SeenStore + ?Sized> EntryProcessor<S> {
    /// Creates a processor over the given seen store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Processes `entries` in the given order, returning the entries that
    /// are unseen and declare at least one of `categories`.
    ///
    /// Entries without a GUID are skipped. Matching entries are recorded in
    /// the seen set as they are found, so a later dispatch failure is never
    /// retried. Persistence faults degrade to an empty set on load and a
    /// skipped save on write; they never abort the pass.
    pub async fn process<'a, 'input>(
        &self,
        entries: &[FeedEntry<'a, 'input>],
        categories: &HashSet<String>,
        mapping_name: &str,
    ) -> Vec<FeedEntry<'a, 'input>> {
        let mut seen = match self.store.load(mapping_name).await {
            Ok(seen) => seen,
            Err(e) => {
                tracing::warn!(
                    mapping = %mapping_name,
                    error = %e,
                    "Failed to load seen entries, starting with empty set"
                );
                SeenSet::new()
            }
        };

        let mut matches = Vec::new();
        for entry in entries {
            let title = entry.title().unwrap_or("No title");

            let Some(guid) = entry.guid() else {
                tracing::debug!(title = %title, "Skipping entry without GUID");
                continue;
            };

            let entry_id = identity::normalize(guid);
            if seen.contains(&entry_id) {
                tracing::debug!(title = %title, "Skipping entry, already seen");
                continue;
            }

            let entry_categories = entry.categories();
            if categories.iter().any(|c| entry_categories.contains(c.as_str())) {
                tracing::info!(title = %title, "Entry matches configured categories");
                matches.push(*entry);
                seen.insert(entry_id);
            } else {
                tracing::debug!(title = %title, "No matching categories for entry");
            }
        }

        if let Err(e) = self.store.save(&seen, mapping_name).await {
            tracing::error!(mapping = %mapping_name, error = %e, "Failed to save seen entries");
        }

        matches
    }

    /// Deletes the persisted seen state for a mapping. Used only by the
    /// one-time initialization pass.
    pub async fn clear(&self, mapping_name: &str) -> Result<(), PersistenceError> {
        self.store.clear(mapping_name).await
    }
}
