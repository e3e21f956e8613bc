use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::app_state::App;
use crate::suggest::Phase;

const MAX_VISIBLE_SUGGESTIONS: usize = 10;
const DROPDOWN_BORDER_HEIGHT: u16 = 2;

macro_rules! hints {
    ($($key:literal => $desc:literal),+ $(,)?) => {
        vec![$(($key, $desc)),+]
    };
}

fn context_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if !app.focused {
        hints!["Tab" => "Focus", "Ctrl+C" => "Quit"]
    } else if app.session.state().is_open() {
        hints!["\u{2191}/\u{2193}" => "Navigate", "Enter" => "Select", "Esc" => "Dismiss", "Ctrl+C" => "Quit"]
    } else {
        hints!["Enter" => "Accept", "Tab" => "Blur", "Ctrl+U" => "Clear", "Ctrl+C" => "Quit"]
    }
}

impl App {
    pub fn render(&self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.render_field(frame, layout[0]);
        self.render_dropdown(frame, layout[1]);
        self.render_status(frame, layout[2]);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.session.field_name()));

        let mut spans = vec![Span::raw(self.field_value.as_str())];
        if self.focused {
            spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_dropdown(&self, frame: &mut Frame, area: Rect) {
        let state = self.session.state();

        let line = match state.phase() {
            Phase::Loading => Some(Line::styled(
                " Loading\u{2026}",
                Style::default().fg(Color::Yellow),
            )),
            Phase::Error => state
                .error()
                .map(|message| Line::styled(format!(" {}", message), Style::default().fg(Color::Red))),
            Phase::NoResults if self.focused => Some(Line::styled(
                " No matches",
                Style::default().fg(Color::DarkGray),
            )),
            _ => None,
        };

        if let Some(line) = line {
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        if !state.is_open() {
            return;
        }

        let visible = state.suggestions().len().min(MAX_VISIBLE_SUGGESTIONS);
        // Keep the highlighted row in view when the list is longer than the window
        let offset = state
            .selected_index()
            .map_or(0, |i| (i + 1).saturating_sub(visible));

        let items: Vec<ListItem> = state
            .suggestions()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, suggestion)| {
                if state.selected_index() == Some(i) {
                    ListItem::new(Line::from(Span::styled(
                        format!("\u{25ba} {}", suggestion.street_name),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )))
                } else {
                    ListItem::new(Line::from(Span::styled(
                        format!("  {}", suggestion.street_name),
                        Style::default().fg(Color::White),
                    )))
                }
            })
            .collect();

        let height = (visible as u16 + DROPDOWN_BORDER_HEIGHT).min(area.height);
        let dropdown_area = Rect { height, ..area };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} matches ", state.suggestions().len()));

        frame.render_widget(List::new(items).block(block), dropdown_area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some(warning) = &self.warning {
            let line = Line::styled(format!(" {}", warning), Style::default().fg(Color::Yellow));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let key_style = Style::default().fg(Color::Cyan);
        let desc_style = Style::default().fg(Color::DarkGray);
        let hints = context_hints(self);

        let mut spans = Vec::with_capacity(hints.len() * 4 + 1);
        spans.push(Span::raw(" "));
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" \u{2022} ", desc_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*desc, desc_style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
