//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User presses Ctrl+R? That's `Action::Refresh`.
//! The fetch task finishes? That's `Action::CountriesLoaded(records)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the side effect the
//! adapter must run. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: dispatch an action, assert on the
//! state and the returned effect.

use log::{info, warn};

use crate::api::Country;
use crate::core::state::App;

/// Everything that can happen in the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start a fetch (startup or user refresh).
    Refresh,
    /// A fetch completed; replaces the raw collection wholesale.
    CountriesLoaded(Vec<Country>),
    /// A fetch failed; the last applied collection is kept.
    FetchFailed(String),
    /// The search text changed.
    SearchChanged(String),
    /// Flip the favorites-only filter.
    ToggleFavoritesOnly,
    /// Flip a country's membership in the favorites set.
    ToggleFavorite(String),
    Quit,
}

/// Side effects the adapter must execute after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn the background fetch task.
    SpawnFetch,
    /// Write the favorites set through to the persisted store.
    SaveFavorites,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Refresh => {
            // At most one fetch in flight: a refresh while loading is
            // coalesced, not queued, so an older result can never land
            // after a newer one.
            if app.is_loading {
                info!("Refresh ignored: fetch already in flight");
                return Effect::None;
            }
            app.is_loading = true;
            app.status_message = String::from("Refreshing...");
            Effect::SpawnFetch
        }
        Action::CountriesLoaded(countries) => {
            app.is_loading = false;
            app.has_loaded = true;
            app.error = None;
            app.last_refreshed = Some(chrono::Utc::now());
            app.status_message = format!("{} countries", countries.len());
            app.countries = countries;
            Effect::None
        }
        Action::FetchFailed(message) => {
            warn!("Fetch failed: {}", message);
            app.is_loading = false;
            app.error = Some(message);
            app.status_message = String::from("Refresh failed");
            Effect::None
        }
        Action::SearchChanged(text) => {
            app.search = text;
            Effect::None
        }
        Action::ToggleFavoritesOnly => {
            app.favorites_only = !app.favorites_only;
            app.status_message = if app.favorites_only {
                String::from("Favorites only")
            } else {
                String::from("All countries")
            };
            Effect::None
        }
        Action::ToggleFavorite(id) => {
            let starred = app.favorites.toggle(&id);
            app.status_message = if starred {
                format!("Starred {id}")
            } else {
                format!("Unstarred {id}")
            };
            // Write-through: the toggle is already reflected in memory;
            // the adapter persists the set, best-effort.
            Effect::SaveFavorites
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::favorites::FavoritesStore;

    fn test_app() -> App {
        App::new(FavoritesStore::default())
    }

    fn country(cca3: &str, name: &str) -> Country {
        serde_json::from_str(&format!(
            r#"{{"name": {{"common": "{name}"}}, "cca3": "{cca3}"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_refresh_spawns_fetch_once() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Refresh), Effect::SpawnFetch);
        assert!(app.is_loading);

        // Second refresh while in flight is coalesced
        assert_eq!(update(&mut app, Action::Refresh), Effect::None);
        assert!(app.is_loading);
    }

    #[test]
    fn test_countries_loaded_replaces_collection() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);

        let effect = update(
            &mut app,
            Action::CountriesLoaded(vec![country("BRA", "Brazil")]),
        );
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert!(app.has_loaded);
        assert!(app.error.is_none());
        assert!(app.last_refreshed.is_some());
        assert_eq!(app.countries.len(), 1);
        assert_eq!(app.status_message, "1 countries");

        // A later fetch replaces wholesale, even with an empty result
        update(&mut app, Action::Refresh);
        update(&mut app, Action::CountriesLoaded(vec![]));
        assert!(app.countries.is_empty());
        assert!(app.has_loaded);
    }

    #[test]
    fn test_fetch_failed_keeps_last_collection() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        update(
            &mut app,
            Action::CountriesLoaded(vec![country("BRA", "Brazil")]),
        );

        update(&mut app, Action::Refresh);
        update(&mut app, Action::FetchFailed("timeout".to_string()));
        assert!(!app.is_loading);
        assert_eq!(app.error.as_deref(), Some("timeout"));
        assert_eq!(app.countries.len(), 1);
    }

    #[test]
    fn test_loaded_clears_previous_error() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        update(&mut app, Action::FetchFailed("timeout".to_string()));
        assert!(app.error.is_some());
        assert!(!app.has_loaded);

        update(&mut app, Action::Refresh);
        update(&mut app, Action::CountriesLoaded(vec![]));
        assert!(app.error.is_none());
        assert!(app.has_loaded);
    }

    #[test]
    fn test_search_changed_updates_visible() {
        let mut app = test_app();
        app.countries = vec![country("ARG", "Argentina"), country("BRA", "Brazil")];

        update(&mut app, Action::SearchChanged("arg".to_string()));
        let visible = app.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].cca3, "ARG");
    }

    #[test]
    fn test_toggle_favorites_only_flips_flag() {
        let mut app = test_app();
        update(&mut app, Action::ToggleFavoritesOnly);
        assert!(app.favorites_only);
        update(&mut app, Action::ToggleFavoritesOnly);
        assert!(!app.favorites_only);
    }

    #[test]
    fn test_toggle_favorite_is_write_through() {
        let mut app = test_app();
        let effect = update(&mut app, Action::ToggleFavorite("BRA".to_string()));
        assert_eq!(effect, Effect::SaveFavorites);
        assert!(app.favorites.contains("BRA"));

        let effect = update(&mut app, Action::ToggleFavorite("BRA".to_string()));
        assert_eq!(effect, Effect::SaveFavorites);
        assert!(!app.favorites.contains("BRA"));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
