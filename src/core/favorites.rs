//! # Favorites Persistence
//!
//! The favorites set is a handful of cca3 codes stored as a single JSON
//! array under one fixed key, rewritten wholesale after every toggle.
//! A favorite may reference a country absent from the latest fetch; that
//! is not an error, the entry simply matches nothing until the country
//! reappears.
//!
//! Loading fails soft: a missing, unreadable, or malformed value becomes
//! an empty set with a `warn!`, so corrupted local state never blocks
//! startup. Saving is best-effort: a write failure is logged and the
//! in-memory set keeps the toggle.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// The fixed key under which the favorites list is persisted.
pub const FAVORITES_KEY: &str = "favorite_countries";

/// Minimal key/value persistence seam: one string value per key.
pub trait KeyValueStore {
    /// Read the value for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    /// Overwrite the value for `key` completely.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// File-backed store: each key is a JSON file under a directory
/// (`~/.atlas/` in production). Writes are atomic (`.tmp` + rename).
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store rooted at `~/.atlas/`, or `None` when no home directory exists.
    pub fn in_home_dir() -> Option<Self> {
        dirs::home_dir().map(|h| Self::new(h.join(".atlas")))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path).map(Some)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.key_path(key);
        atomic_write(&path, value)
    }
}

/// Atomically write `value` to `path` (via `.tmp` + rename).
fn atomic_write(path: &Path, value: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, value)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// The set of favorited country identifiers (cca3 codes).
///
/// Backed by a `BTreeSet` so the serialized array is stable across saves.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FavoritesStore {
    ids: BTreeSet<String>,
}

impl FavoritesStore {
    /// Load the favorites set from the persisted store.
    ///
    /// Absent key -> empty set. Read or decode failures also yield an
    /// empty set; the anomaly is logged but never propagated.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let raw = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("Failed to read favorites, starting empty: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                let ids: BTreeSet<String> = ids.into_iter().collect();
                debug!("Loaded {} favorites", ids.len());
                Self { ids }
            }
            Err(e) => {
                warn!("Malformed favorites value, starting empty: {}", e);
                Self::default()
            }
        }
    }

    /// Flip membership of `id`: add it if absent, remove it if present.
    /// Returns the new membership state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Persist the current set, fully overwriting the previous value.
    /// Best-effort: failures are logged, the in-memory set is untouched.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let json = match serde_json::to_string(&self.ids.iter().collect::<Vec<_>>()) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode favorites: {}", e);
                return;
            }
        };
        if let Err(e) = store.set(FAVORITES_KEY, &json) {
            warn!("Failed to persist favorites: {}", e);
        } else {
            debug!("Favorites saved ({} entries)", self.ids.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory store for tests; `fail_writes` simulates a broken disk.
    #[derive(Default)]
    struct MemoryStore {
        values: HashMap<String, String>,
        fail_writes: bool,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> io::Result<Option<String>> {
            Ok(self.values.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let store = MemoryStore::default();
        let favorites = FavoritesStore::load(&store);
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_load_decodes_list() {
        let mut store = MemoryStore::default();
        store
            .set(FAVORITES_KEY, r#"["ARG","BRA"]"#)
            .unwrap();
        let favorites = FavoritesStore::load(&store);
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("BRA"));
        assert!(favorites.contains("ARG"));
    }

    #[test]
    fn test_load_malformed_value_is_empty() {
        let mut store = MemoryStore::default();
        // Non-list JSON must not panic or propagate an error
        store
            .set(FAVORITES_KEY, r#"{"oops": true}"#)
            .unwrap();
        let favorites = FavoritesStore::load(&store);
        assert!(favorites.is_empty());

        store.set(FAVORITES_KEY, "not json at all").unwrap();
        let favorites = FavoritesStore::load(&store);
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = FavoritesStore::default();
        assert!(favorites.toggle("BRA"));
        assert!(favorites.contains("BRA"));
        assert_eq!(favorites.len(), 1);

        assert!(!favorites.toggle("BRA"));
        assert!(!favorites.contains("BRA"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut favorites = FavoritesStore::default();
        favorites.toggle("ARG");
        let before = favorites.clone();

        favorites.toggle("BRA");
        favorites.toggle("BRA");
        assert_eq!(favorites, before);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut store = MemoryStore::default();
        let mut favorites = FavoritesStore::default();
        favorites.toggle("BRA");
        favorites.toggle("ARG");
        favorites.save(&mut store);

        let loaded = FavoritesStore::load(&store);
        assert_eq!(loaded, favorites);
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut favorites = FavoritesStore::default();
        favorites.toggle("BRA");
        favorites.save(&mut store);

        // No rollback of the toggle; losing it on next launch is acceptable
        assert!(favorites.contains("BRA"));
        assert!(store.values.is_empty());
    }

    #[test]
    fn test_serialized_form_is_sorted_array() {
        let mut store = MemoryStore::default();
        let mut favorites = FavoritesStore::default();
        favorites.toggle("BRA");
        favorites.toggle("ARG");
        favorites.save(&mut store);

        assert_eq!(
            store.values.get(FAVORITES_KEY).unwrap(),
            r#"["ARG","BRA"]"#
        );
    }
}
