use std::fmt;

use crate::suggest::suggestion::Suggestion;

/// Which step of the lookup cycle the session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Blank input, nothing shown
    #[default]
    Idle,
    /// Debounce timer running; any previous list stays visible
    Pending,
    /// Lookup in flight
    Loading,
    /// Non-empty list shown and navigable
    Open,
    /// Lookup succeeded with no matches
    NoResults,
    /// Lookup rejected
    Error,
    /// List dismissed (Escape or blur) but kept for refocus
    Closed,
    /// A suggestion was accepted
    Selected,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Pending => write!(f, "pending"),
            Phase::Loading => write!(f, "loading"),
            Phase::Open => write!(f, "open"),
            Phase::NoResults => write!(f, "no results"),
            Phase::Error => write!(f, "error"),
            Phase::Closed => write!(f, "closed"),
            Phase::Selected => write!(f, "selected"),
        }
    }
}

/// Everything a host needs to render the field and its dropdown.
///
/// `selected_index` is `None` when nothing is highlighted and otherwise always
/// indexes into `suggestions`. The list is never open while empty.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    input_value: String,
    suggestions: Vec<Suggestion>,
    is_loading: bool,
    is_open: bool,
    selected_index: Option<usize>,
    error: Option<String>,
    phase: Phase,
}

impl SessionState {
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.selected_index.and_then(|i| self.suggestions.get(i))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_input(&mut self, value: &str) {
        self.input_value.clear();
        self.input_value.push_str(value);
    }

    /// Back to `Idle`, keeping the current text
    pub(crate) fn go_idle(&mut self) {
        self.suggestions.clear();
        self.is_loading = false;
        self.is_open = false;
        self.selected_index = None;
        self.error = None;
        self.phase = Phase::Idle;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn mark_pending(&mut self) {
        self.is_loading = false;
        self.error = None;
        self.phase = Phase::Pending;
    }

    pub(crate) fn start_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.phase = Phase::Loading;
    }

    pub(crate) fn show_results(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.is_loading = false;
        self.error = None;
        self.selected_index = None;
        self.is_open = !self.suggestions.is_empty();
        self.phase = if self.is_open {
            Phase::Open
        } else {
            Phase::NoResults
        };
    }

    pub(crate) fn show_error(&mut self, message: String) {
        self.suggestions.clear();
        self.is_loading = false;
        self.is_open = false;
        self.selected_index = None;
        self.error = Some(message);
        self.phase = Phase::Error;
    }

    pub(crate) fn apply_selection(&mut self, value: &str) {
        self.set_input(value);
        self.suggestions.clear();
        self.is_loading = false;
        self.is_open = false;
        self.selected_index = None;
        self.error = None;
        self.phase = Phase::Selected;
    }

    pub(crate) fn close(&mut self) {
        self.is_open = false;
        self.selected_index = None;
        if self.phase == Phase::Open {
            self.phase = Phase::Closed;
        }
    }

    /// Reopen a list left over from an earlier lookup. Returns whether it opened.
    pub(crate) fn reopen(&mut self) -> bool {
        if self.suggestions.is_empty() || self.is_open {
            return false;
        }
        self.is_open = true;
        if matches!(self.phase, Phase::Closed) {
            self.phase = Phase::Open;
        }
        true
    }

    pub(crate) fn highlight(&mut self, index: usize) {
        debug_assert!(index < self.suggestions.len());
        self.selected_index = Some(index);
        self.is_open = true;
        if self.phase == Phase::Closed {
            self.phase = Phase::Open;
        }
    }

    #[cfg(test)]
    pub(crate) fn with_suggestions(suggestions: Vec<Suggestion>) -> Self {
        let mut state = Self::default();
        state.show_results(suggestions);
        state
    }
}
