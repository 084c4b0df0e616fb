use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CountryListPane, DetailView, TitleBar};

const HELP_TEXT: &str =
    " type to search   ↑/↓ select   Enter details   Tab favorites   Ctrl+T star   Ctrl+R refresh   Esc quit";

/// Split the frame into title bar, search box, list, and help line.
pub fn layout_areas(area: Rect) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Length(3), Min(0), Length(1)]).areas(area)
}

/// Rows the list viewport can show; used as the PageUp/PageDown stride.
pub fn list_page_size(area: Rect) -> usize {
    let [_, _, list_area, _] = layout_areas(area);
    list_area.height.saturating_sub(2) as usize
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [title_area, search_area, list_area, help_area] = layout_areas(frame.area());

    let mut title_bar = TitleBar {
        country_count: app.countries.len(),
        favorites_count: app.favorites.len(),
        favorites_only: app.favorites_only,
        status_message: app.status_message.clone(),
        last_refreshed: app.last_refreshed,
    };
    title_bar.render(frame, title_area);

    tui.search_box.render(frame, search_area);

    let rows = app.visible();
    tui.country_list.clamp(rows.len());
    let empty_message = empty_message(app);
    CountryListPane::new(&rows, &app.favorites, empty_message).render(
        frame,
        list_area,
        &mut tui.country_list,
    );

    let help = Span::styled(
        HELP_TEXT,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
    );
    frame.render_widget(help, help_area);

    // Details overlay on top of everything; the overlay owns a clone of
    // the record, so a refresh underneath never invalidates it.
    if let Some(ref country) = tui.detail {
        DetailView::new(country).render(frame, frame.area());
    }
}

/// Wording for an empty list depends on why it is empty.
fn empty_message(app: &App) -> &'static str {
    if app.is_loading && !app.has_loaded {
        "Fetching countries..."
    } else if !app.has_loaded {
        if app.error.is_some() {
            "Fetch failed — Ctrl+R to retry"
        } else {
            "No data — Ctrl+R to fetch"
        }
    } else if app.favorites_only && app.favorites.is_empty() {
        "No favorites yet — Ctrl+T stars the selection"
    } else if !app.search.is_empty() {
        "No matches"
    } else {
        "No countries"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::favorites::FavoritesStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_initial_state() {
        let app = App::new(FavoritesStore::default());
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Atlas"));
        assert!(text.contains("Search"));
        assert!(text.contains("No data"));
    }

    #[test]
    fn test_draw_ui_loading_state() {
        let mut app = App::new(FavoritesStore::default());
        update(&mut app, Action::Refresh);
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Fetching countries..."));
    }

    #[test]
    fn test_draw_ui_with_collection_and_overlay() {
        let mut app = App::new(FavoritesStore::default());
        let brazil: crate::api::Country = serde_json::from_str(
            r#"{"name": {"common": "Brazil", "official": "Federative Republic of Brazil"}, "cca3": "BRA"}"#,
        )
        .unwrap();
        update(&mut app, Action::Refresh);
        update(&mut app, Action::CountriesLoaded(vec![brazil.clone()]));

        let mut tui = TuiState::new();
        tui.detail = Some(brazil);
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Federative Republic of Brazil"));
    }

    #[test]
    fn test_empty_message_favorites_only() {
        let mut app = App::new(FavoritesStore::default());
        update(&mut app, Action::Refresh);
        update(&mut app, Action::CountriesLoaded(vec![]));
        update(&mut app, Action::ToggleFavoritesOnly);
        assert_eq!(
            empty_message(&app),
            "No favorites yet — Ctrl+T stars the selection"
        );
    }

    #[test]
    fn test_empty_message_no_matches() {
        let mut app = App::new(FavoritesStore::default());
        update(&mut app, Action::Refresh);
        update(&mut app, Action::CountriesLoaded(vec![]));
        update(&mut app, Action::SearchChanged("zz".to_string()));
        assert_eq!(empty_message(&app), "No matches");
    }
}
