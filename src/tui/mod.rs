//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event flow
//!
//! All state mutation happens on this loop's thread. The only suspended
//! work is the country fetch: it runs in a tokio task and reports back as
//! an `Action` over an mpsc channel. At most one fetch is in flight (the
//! reducer coalesces refreshes), and its abort handle is dropped on quit
//! so a late result is discarded instead of applied to a torn-down view.
//!
//! ## Redraw strategy
//!
//! Conditional redraw: the loop sleeps in `poll_event_timeout` and only
//! draws after input, a background action, or a resize. While a fetch is
//! in flight the poll timeout shortens so status changes show promptly.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::api::{Country, CountrySource, RestCountriesClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::favorites::{FavoritesStore, FileStore};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{CountryListState, SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub country_list: CountryListState,
    /// Details overlay (None = hidden). Owns a clone of the selected
    /// record so the list underneath can change freely.
    pub detail: Option<Country>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_box: SearchBox::new(),
            country_list: CountryListState::new(),
            detail: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for the search box
            SetCursorStyle::SteadyBlock  // Non-blinking: redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the production country source from resolved config.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn CountrySource> {
    Arc::new(RestCountriesClient::new(
        config.api_base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = build_source(&config);

    let mut store = FileStore::in_home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, persisting favorites to ./.atlas");
        FileStore::new(PathBuf::from(".atlas"))
    });
    let favorites = FavoritesStore::load(&store);

    let mut app = App::from_config(&config, favorites);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from the background fetch task
    let (tx, rx) = mpsc::channel();

    // Abort handle for the in-flight fetch (at most one)
    let mut active_fetch: Option<tokio::task::AbortHandle> = None;

    let mut should_quit = false;
    let mut needs_redraw = true; // Force first frame

    // Fetch the collection immediately on startup
    let effect = update(&mut app, Action::Refresh);
    run_effect(
        effect,
        &mut app,
        &mut store,
        &source,
        &tx,
        &mut active_fetch,
        &mut should_quit,
    );

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Shorter poll while loading so the status line stays current
        let timeout = if app.is_loading {
            Duration::from_millis(150)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of state
            if matches!(event, TuiEvent::ForceQuit) {
                let effect = update(&mut app, Action::Quit);
                run_effect(
                    effect,
                    &mut app,
                    &mut store,
                    &source,
                    &tx,
                    &mut active_fetch,
                    &mut should_quit,
                );
                continue;
            }

            let action = translate_event(event, &mut app, &mut tui, terminal.get_frame().area());
            if let Some(action) = action {
                let effect = update(&mut app, action);
                run_effect(
                    effect,
                    &mut app,
                    &mut store,
                    &source,
                    &tx,
                    &mut active_fetch,
                    &mut should_quit,
                );
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            run_effect(
                effect,
                &mut app,
                &mut store,
                &source,
                &tx,
                &mut active_fetch,
                &mut should_quit,
            );
        }

        if should_quit {
            break;
        }
    }

    // Discard any late fetch result rather than applying it to a torn-down view
    if let Some(handle) = active_fetch.take() {
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Turn a TUI event into a core action, updating presentation state along
/// the way. Returns None when the event was purely presentational.
fn translate_event(
    event: TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    frame_area: ratatui::layout::Rect,
) -> Option<Action> {
    // The overlay swallows everything except its dismiss and star keys
    if tui.detail.is_some() {
        return match event {
            TuiEvent::Escape => {
                tui.detail = None;
                None
            }
            TuiEvent::ToggleFavorite => {
                let id = tui.detail.as_ref().map(|c| c.cca3.clone())?;
                Some(Action::ToggleFavorite(id))
            }
            TuiEvent::Refresh => Some(Action::Refresh),
            _ => None,
        };
    }

    match event {
        TuiEvent::Refresh => Some(Action::Refresh),
        TuiEvent::ToggleFavoritesOnly => Some(Action::ToggleFavoritesOnly),
        TuiEvent::ToggleFavorite => {
            let rows = app.visible();
            let id = rows.get(tui.country_list.selected).map(|c| c.cca3.clone())?;
            Some(Action::ToggleFavorite(id))
        }
        TuiEvent::Submit => {
            let rows = app.visible();
            tui.detail = rows.get(tui.country_list.selected).map(|c| (*c).clone());
            None
        }
        TuiEvent::Escape => {
            // Clear the search first; quit only when there is nothing to clear
            if tui.search_box.clear() {
                Some(Action::SearchChanged(String::new()))
            } else {
                Some(Action::Quit)
            }
        }
        TuiEvent::CursorUp => {
            tui.country_list.select_up(app.visible().len());
            None
        }
        TuiEvent::CursorDown => {
            tui.country_list.select_down(app.visible().len());
            None
        }
        TuiEvent::PageUp => {
            tui.country_list
                .page_up(app.visible().len(), ui::list_page_size(frame_area));
            None
        }
        TuiEvent::PageDown => {
            tui.country_list
                .page_down(app.visible().len(), ui::list_page_size(frame_area));
            None
        }
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
            match tui.search_box.handle_event(&event) {
                Some(SearchEvent::Changed(query)) => Some(Action::SearchChanged(query)),
                None => None,
            }
        }
        TuiEvent::ForceQuit | TuiEvent::Resize => None, // handled by the loop
    }
}

/// Execute the side effect returned by the reducer.
fn run_effect(
    effect: Effect,
    app: &mut App,
    store: &mut FileStore,
    source: &Arc<dyn CountrySource>,
    tx: &mpsc::Sender<Action>,
    active_fetch: &mut Option<tokio::task::AbortHandle>,
    should_quit: &mut bool,
) {
    match effect {
        Effect::SpawnFetch => {
            *active_fetch = Some(spawn_fetch(source.clone(), tx.clone()).abort_handle());
        }
        Effect::SaveFavorites => {
            app.favorites.save(store);
        }
        Effect::Quit => {
            *should_quit = true;
        }
        Effect::None => {}
    }
}

/// Spawn the background fetch task; its result comes back as an Action.
fn spawn_fetch(
    source: Arc<dyn CountrySource>,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning country fetch");
    tokio::spawn(async move {
        let action = match source.fetch_all().await {
            Ok(countries) => Action::CountriesLoaded(countries),
            Err(e) => {
                info!("Fetch error: {}", e);
                Action::FetchFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            // View torn down while the fetch was pending
            warn!("Discarding fetch result: receiver dropped");
        }
    })
}
