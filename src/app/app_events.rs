use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

use super::app_state::App;
use crate::suggest::Key;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            _ => Key::Other,
        }
    }
}

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.pump();

        // Wake up in time for the next debounce or blur deadline
        let timeout = self
            .session
            .next_deadline_at(Instant::now())
            .map_or(EVENT_POLL_TIMEOUT, |due| due.min(EVENT_POLL_TIMEOUT));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                }
                Event::FocusGained => self.focus(),
                Event::FocusLost => self.blur(),
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }

        self.pump();
        Ok(())
    }

    /// Let the session fire timers and apply lookups, then fold its echoes
    pub fn pump(&mut self) {
        if self.session.tick() {
            self.mark_dirty();
        }
        self.drain_changes();
    }

    fn handle_paste_event(&mut self, text: &str) {
        if !self.focused {
            return;
        }
        // Single-line field
        let line = text.lines().next().unwrap_or_default();
        self.field_value.push_str(line);
        self.session.on_input_change(&self.field_value);
        self.drain_changes();
        self.mark_dirty();
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.quit(),
                KeyCode::Char('u') if self.focused => {
                    self.session.clear();
                    self.drain_changes();
                }
                _ => {}
            }
            return;
        }

        if key.code == KeyCode::Tab {
            if self.focused {
                self.blur();
            } else {
                self.focus();
            }
            return;
        }

        if !self.focused {
            return;
        }

        match key.code {
            KeyCode::Char(c) => {
                self.field_value.push(c);
                self.session.on_input_change(&self.field_value);
            }
            KeyCode::Backspace => {
                self.field_value.pop();
                self.session.on_input_change(&self.field_value);
            }
            KeyCode::Enter if !self.session.state().is_open() => {
                self.accepted = Some(self.field_value.clone());
                self.quit();
            }
            code => {
                self.session.on_key(Key::from(code));
            }
        }

        self.drain_changes();
    }

    fn focus(&mut self) {
        self.focused = true;
        self.session.on_focus();
        self.mark_dirty();
    }

    fn blur(&mut self) {
        self.focused = false;
        self.session.on_blur();
        self.mark_dirty();
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
