//! # Application State
//!
//! Core business state for Atlas. This module contains domain logic only -
//! no TUI-specific types. Presentation state (selection, overlays) lives
//! in the `tui` module.
//!
//! ```text
//! App
//! ├── countries: Vec<Country>       // raw collection, upstream order
//! ├── search: String                // current search text
//! ├── favorites_only: bool          // star filter flag
//! ├── favorites: FavoritesStore     // persisted cca3 set
//! ├── is_loading: bool              // fetch in flight
//! ├── has_loaded: bool              // at least one fetch succeeded
//! ├── error: Option<String>         // last fetch failure
//! ├── status_message: String        // title bar text
//! └── last_refreshed: Option<...>   // timestamp of last successful fetch
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{DateTime, Utc};

use crate::api::Country;
use crate::core::config::ResolvedConfig;
use crate::core::favorites::FavoritesStore;
use crate::core::list;

pub struct App {
    pub countries: Vec<Country>,
    pub search: String,
    pub favorites_only: bool,
    pub favorites: FavoritesStore,
    pub is_loading: bool,
    /// True after the first successful fetch. Distinguishes "never loaded"
    /// from "loaded but empty" so the UI can word its empty states.
    pub has_loaded: bool,
    pub error: Option<String>,
    pub status_message: String,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl App {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self {
            countries: Vec::new(),
            search: String::new(),
            favorites_only: false,
            favorites,
            is_loading: false,
            has_loaded: false,
            error: None,
            status_message: String::from("Welcome to Atlas!"),
            last_refreshed: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig, favorites: FavoritesStore) -> Self {
        let mut app = Self::new(favorites);
        app.favorites_only = config.favorites_only_at_startup;
        app
    }

    /// The derived visible subset: raw collection filtered by the current
    /// search text and favorites flag. Recomputed on every call.
    pub fn visible(&self) -> Vec<&Country> {
        list::visible(
            &self.countries,
            &self.search,
            self.favorites_only,
            &self.favorites,
        )
    }
}
