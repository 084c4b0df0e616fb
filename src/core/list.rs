//! # Visible Subset
//!
//! The list view is a pure function over mutable inputs: raw collection,
//! search text, favorites-only flag, and the favorites set. It is
//! recomputed on every call — no caching, no incremental index. The
//! collection tops out around 250 records, so a linear scan per keystroke
//! is cheap.

use crate::api::Country;
use crate::core::favorites::FavoritesStore;

/// Returns every record whose common name contains `search` as a
/// case-insensitive substring, intersected with the favorites set when
/// `favorites_only` is on. The collection's existing order (sorted by
/// common name at fetch time) is preserved, never re-sorted here.
pub fn visible<'a>(
    countries: &'a [Country],
    search: &str,
    favorites_only: bool,
    favorites: &FavoritesStore,
) -> Vec<&'a Country> {
    let needle = search.to_lowercase();
    countries
        .iter()
        .filter(|c| c.name.common.to_lowercase().contains(&needle))
        .filter(|c| !favorites_only || favorites.contains(&c.cca3))
        .collect()
}
