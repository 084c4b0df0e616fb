//! # CountryList Component
//!
//! Scrollable list of the visible countries with a star column for
//! favorites. Rows mirror the original explorer: name, primary capital,
//! and the star marker.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryListState` lives in `TuiState` and survives across frames
//! - `CountryListPane` is created each frame with borrowed rows

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::Country;
use crate::core::favorites::FavoritesStore;

/// Persistent selection state for the country list.
pub struct CountryListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl CountryListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Clamp the selection to the current row count. Called every frame
    /// because the visible subset shrinks and grows as the user types.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn select_up(&mut self, len: usize) {
        self.selected = self.selected.saturating_sub(1);
        self.clamp(len);
    }

    pub fn select_down(&mut self, len: usize) {
        self.selected = self.selected.saturating_add(1);
        self.clamp(len);
    }

    pub fn page_up(&mut self, len: usize, page: usize) {
        self.selected = self.selected.saturating_sub(page.max(1));
        self.clamp(len);
    }

    pub fn page_down(&mut self, len: usize, page: usize) {
        self.selected = self.selected.saturating_add(page.max(1));
        self.clamp(len);
    }
}

impl Default for CountryListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper for the country list.
pub struct CountryListPane<'a> {
    rows: &'a [&'a Country],
    favorites: &'a FavoritesStore,
    empty_message: &'a str,
}

impl<'a> CountryListPane<'a> {
    pub fn new(
        rows: &'a [&'a Country],
        favorites: &'a FavoritesStore,
        empty_message: &'a str,
    ) -> Self {
        Self {
            rows,
            favorites,
            empty_message,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut CountryListState) {
        let title = format!(" Countries ({}) ", self.rows.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .padding(Padding::horizontal(1));

        if self.rows.is_empty() {
            let empty = Paragraph::new(self.empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Layout: " ★ <name>  <capital>" with the name padded so capitals align
        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let name_width = (inner_width.saturating_sub(2) * 3 / 5).max(10);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, country)| {
                let starred = self.favorites.contains(&country.cca3);
                let star = if starred { "★ " } else { "  " };
                let name = pad_to_width(&country.name.common, name_width);
                let capital = country.capital().unwrap_or("-");

                let row_style = if i == state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let star_style = if starred {
                    row_style.fg(Color::Yellow)
                } else {
                    row_style
                };

                let line = Line::from(vec![
                    Span::styled(star.to_string(), star_style),
                    Span::styled(name, row_style),
                    Span::styled("  ", row_style),
                    Span::styled(capital.to_string(), row_style.add_modifier(Modifier::DIM)),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut state.list_state);
    }
}

/// Pad or truncate `s` to exactly `width` display columns.
fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_str(s, width);
    let pad = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(pad))
}

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    for c in s.chars() {
        let candidate = format!("{out}{c}");
        if candidate.width() > max_width - 3 {
            break;
        }
        out = candidate;
    }
    format!("{out}...")
}
