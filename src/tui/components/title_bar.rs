//! # TitleBar Component
//!
//! Top status bar: collection size, favorites count, the active filter,
//! and the transient status message. Purely presentational — all fields
//! are props from `App` state.

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar {
    pub country_count: usize,
    pub favorites_count: usize,
    pub favorites_only: bool,
    pub status_message: String,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut title_text = format!(
            "Atlas — {} countries | ★ {}",
            self.country_count, self.favorites_count
        );
        if self.favorites_only {
            title_text.push_str(" | filter: favorites");
        }
        if !self.status_message.is_empty() {
            title_text.push_str(" | ");
            title_text.push_str(&self.status_message);
        }
        if let Some(ts) = self.last_refreshed {
            let local = ts.with_timezone(&Local);
            title_text.push_str(&format!(" | refreshed {}", local.format("%H:%M")));
        }

        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(mut title_bar: TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_shows_counts_and_status() {
        let text = render_to_text(TitleBar {
            country_count: 250,
            favorites_count: 3,
            favorites_only: false,
            status_message: "250 countries".to_string(),
            last_refreshed: None,
        });
        assert!(text.contains("Atlas"));
        assert!(text.contains("250 countries"));
        assert!(text.contains("★ 3"));
        assert!(!text.contains("filter: favorites"));
    }

    #[test]
    fn test_title_bar_shows_filter_flag() {
        let text = render_to_text(TitleBar {
            country_count: 250,
            favorites_count: 1,
            favorites_only: true,
            status_message: String::new(),
            last_refreshed: None,
        });
        assert!(text.contains("filter: favorites"));
    }

    #[test]
    fn test_title_bar_shows_refresh_time() {
        let text = render_to_text(TitleBar {
            country_count: 0,
            favorites_count: 0,
            favorites_only: false,
            status_message: String::new(),
            last_refreshed: Some(Utc::now()),
        });
        assert!(text.contains("refreshed"));
    }
}
