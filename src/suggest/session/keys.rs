//! Keyboard transitions for the suggestion list
//!
//! Each navigation key maps to one transition over [`SessionState`]. Keys
//! without an entry leave the state alone; text entry goes through
//! `Session::on_input_change` instead.

use super::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

/// What a transition did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Highlighted(usize),
    Dismissed,
    /// Accept the suggestion at this index
    Select(usize),
}

pub type Transition = fn(&mut SessionState) -> KeyOutcome;

const TRANSITIONS: [(Key, Transition); 4] = [
    (Key::ArrowDown, highlight_next as Transition),
    (Key::ArrowUp, highlight_previous as Transition),
    (Key::Enter, accept_highlighted as Transition),
    (Key::Escape, dismiss as Transition),
];

pub fn transition_for(key: Key) -> Option<Transition> {
    TRANSITIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, transition)| *transition)
}

/// Run the transition for `key`, if it has one
pub fn apply(key: Key, state: &mut SessionState) -> KeyOutcome {
    match transition_for(key) {
        Some(transition) => transition(state),
        None => KeyOutcome::Ignored,
    }
}

fn highlight_next(state: &mut SessionState) -> KeyOutcome {
    let len = state.suggestions().len();
    if len == 0 {
        return KeyOutcome::Ignored;
    }
    let next = match state.selected_index() {
        Some(i) => (i + 1) % len,
        None => 0,
    };
    state.highlight(next);
    KeyOutcome::Highlighted(next)
}

fn highlight_previous(state: &mut SessionState) -> KeyOutcome {
    let len = state.suggestions().len();
    if len == 0 {
        return KeyOutcome::Ignored;
    }
    let previous = match state.selected_index() {
        Some(i) => (i + len - 1) % len,
        None => len - 1,
    };
    state.highlight(previous);
    KeyOutcome::Highlighted(previous)
}

fn accept_highlighted(state: &mut SessionState) -> KeyOutcome {
    match state.selected_index() {
        Some(i) if i < state.suggestions().len() => KeyOutcome::Select(i),
        _ => KeyOutcome::Ignored,
    }
}

fn dismiss(state: &mut SessionState) -> KeyOutcome {
    state.close();
    KeyOutcome::Dismissed
}
