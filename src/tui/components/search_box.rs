//! # SearchBox Component
//!
//! Single-line text input for the search filter. There is no modal input
//! handling: every printable character goes to the search box, so the
//! cursor always sits at the end of the query.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The query text changed; carries the new query.
    Changed(String),
}

/// Text input component for the search filter.
///
/// # State
///
/// - `query`: current search text (owned here, mirrored into `App.search`
///   via `Action::SearchChanged`)
pub struct SearchBox {
    pub query: String,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            query: String::new(),
        }
    }

    /// Clear the query, returning true if there was anything to clear.
    pub fn clear(&mut self) -> bool {
        if self.query.is_empty() {
            false
        } else {
            self.query.clear();
            true
        }
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Search");

        let input = Paragraph::new(self.query.as_str())
            .block(block)
            .style(Style::default().fg(Color::Cyan));

        frame.render_widget(input, area);

        // Cursor after the last typed character, clamped to the box
        let cursor_x = (area.x + 1 + self.query.chars().count() as u16)
            .min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.query.push(*c);
                Some(SearchEvent::Changed(self.query.clone()))
            }
            TuiEvent::Paste(text) => {
                // Pasted newlines make no sense in a one-line query
                self.query.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
                Some(SearchEvent::Changed(self.query.clone()))
            }
            TuiEvent::Backspace => {
                self.query.pop().map(|_| SearchEvent::Changed(self.query.clone()))
            }
            _ => None,
        }
    }
}
