use std::sync::mpsc::{Receiver, channel};

use crate::suggest::Session;

/// Terminal host for one type-ahead field.
///
/// The host owns the field text; the session echoes every change back through
/// its value-changed callback, which lands on `changes` and is folded into
/// `field_value` after each event.
pub struct App {
    pub session: Session,
    pub field_value: String,
    pub focused: bool,
    pub should_quit: bool,
    /// Value accepted with Enter, printed after the terminal is restored
    pub accepted: Option<String>,
    pub warning: Option<String>,
    changes: Receiver<(String, String)>,
    dirty: bool,
}

impl App {
    pub fn new(mut session: Session) -> Self {
        let (change_tx, change_rx) = channel();
        session.set_on_change(Box::new(move |name: &str, value: &str| {
            let _ = change_tx.send((name.to_string(), value.to_string()));
        }));
        session.attach();

        Self {
            session,
            field_value: String::new(),
            focused: true,
            should_quit: false,
            accepted: None,
            warning: None,
            changes: change_rx,
            dirty: true,
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }

    /// Seed the field from outside; the session adopts it without fetching
    pub fn with_initial_value(mut self, value: &str) -> Self {
        self.field_value = value.to_string();
        self.session.sync_external_value(value);
        self
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Fold value-changed notifications into the host's copy of the text
    pub(crate) fn drain_changes(&mut self) {
        for (name, value) in self.changes.try_iter() {
            log::debug!("Field '{}' changed to {:?}", name, value);
            self.field_value = value;
            self.dirty = true;
        }
    }

    pub fn quit(&mut self) {
        self.session.detach();
        self.should_quit = true;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
