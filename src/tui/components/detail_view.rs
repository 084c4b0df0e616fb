//! # DetailView Component
//!
//! Full-screen overlay showing one country's fields. Opened with Enter on
//! the selected row, dismissed with Esc. The overlay receives the selected
//! record unchanged; all formatting happens here.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::api::{Country, group_digits};

/// Transient render wrapper for the details overlay.
pub struct DetailView<'a> {
    country: &'a Country,
}

impl<'a> DetailView<'a> {
    pub fn new(country: &'a Country) -> Self {
        Self { country }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.country.name.common))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Esc Back ").centered())
            .padding(Padding::new(2, 2, 1, 1));

        let c = self.country;
        let area_km2 = if c.area == 0.0 {
            String::from("Unknown")
        } else {
            format!("{} km²", group_digits(c.area.round() as u64))
        };

        let rows = [
            ("Official name", non_empty_or(&c.name.official, "Unknown")),
            ("Capital", c.capital().unwrap_or("Unknown").to_string()),
            ("Region", non_empty_or(&c.region, "Unknown")),
            (
                "Subregion",
                c.subregion.clone().unwrap_or_else(|| String::from("Not listed")),
            ),
            ("Population", group_digits(c.population)),
            ("Area", area_km2),
            (
                "Languages",
                c.language_summary().unwrap_or_else(|| String::from("Not listed")),
            ),
            (
                "Currencies",
                c.currency_summary().unwrap_or_else(|| String::from("Not listed")),
            ),
            (
                "Flag",
                c.flag_url().unwrap_or("Not listed").to_string(),
            ),
        ];

        let label_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
        let value_style = Style::default().fg(Color::White);

        let mut lines = Vec::with_capacity(rows.len() * 2);
        for (label, value) in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<14}"), label_style),
                Span::styled(value, value_style),
            ]));
            lines.push(Line::default());
        }

        let details = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(details, overlay);
    }
}

fn non_empty_or(s: &str, fallback: &str) -> String {
    if s.is_empty() {
        fallback.to_string()
    } else {
        s.to_string()
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn brazil() -> Country {
        serde_json::from_str(
            r#"{
                "name": {"common": "Brazil", "official": "Federative Republic of Brazil"},
                "cca3": "BRA",
                "capital": ["Brasília"],
                "population": 212559417,
                "area": 8515767.0,
                "region": "Americas",
                "subregion": "South America",
                "languages": {"por": "Portuguese"},
                "currencies": {"BRL": {"name": "Brazilian real", "symbol": "R$"}},
                "flags": {"svg": "https://flagcdn.com/br.svg"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_shows_fields() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let country = brazil();

        terminal
            .draw(|f| {
                DetailView::new(&country).render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Brazil"));
        assert!(text.contains("Federative Republic of Brazil"));
        assert!(text.contains("212.559.417"));
        assert!(text.contains("Portuguese"));
        assert!(text.contains("Brazilian real (R$)"));
    }

    #[test]
    fn test_render_sparse_record_uses_fallbacks() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let country: Country =
            serde_json::from_str(r#"{"name": {"common": "Atlantis"}, "cca3": "ATL"}"#).unwrap();

        terminal
            .draw(|f| {
                DetailView::new(&country).render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Atlantis"));
        assert!(text.contains("Unknown"));
        assert!(text.contains("Not listed"));
    }
}
