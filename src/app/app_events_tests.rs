//! Tests for app key handling

use super::*;
use crate::config::AutocompleteConfig;
use crate::suggest::{Phase, Session};
use crate::test_utils::test_helpers::{
    SETTLE_TIMEOUT, ScriptedProvider, fetcher_with, key, key_with_mods,
};

/// App whose lookups fire on the next tick
fn instant_app(provider: &ScriptedProvider) -> App {
    let config = AutocompleteConfig {
        debounce_ms: 0,
        blur_close_ms: 0,
        ..AutocompleteConfig::default()
    };
    App::new(Session::new("street_name", config, fetcher_with(provider)))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
}

/// Pump until the session shows a result for the current text
fn settle_app(app: &mut App) {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    loop {
        app.pump();
        let waiting = app.session.has_pending_lookup() || app.session.is_fetch_in_flight();
        if !waiting || Instant::now() >= deadline {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn oak_provider() -> ScriptedProvider {
    ScriptedProvider::new().with_results("OA", &["OAK ST", "OAKLAND AVE", "OAKWOOD DR"])
}

#[test]
fn test_key_code_mapping() {
    assert_eq!(Key::from(KeyCode::Down), Key::ArrowDown);
    assert_eq!(Key::from(KeyCode::Up), Key::ArrowUp);
    assert_eq!(Key::from(KeyCode::Enter), Key::Enter);
    assert_eq!(Key::from(KeyCode::Esc), Key::Escape);
    assert_eq!(Key::from(KeyCode::Left), Key::Other);
}

#[test]
fn test_typing_opens_suggestions() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);

    type_text(&mut app, "oa");
    settle_app(&mut app);

    assert_eq!(app.field_value, "oa");
    assert_eq!(app.session.state().phase(), Phase::Open);
    assert_eq!(app.session.state().suggestions().len(), 3);
}

#[test]
fn test_arrow_and_enter_select_into_field() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);
    type_text(&mut app, "oa");
    settle_app(&mut app);

    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.field_value, "OAKLAND AVE");
    assert!(!app.session.state().is_open());
    assert!(!app.should_quit());
}

#[test]
fn test_enter_without_highlight_accepts_value() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);
    type_text(&mut app, "Pine");

    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.accepted.as_deref(), Some("Pine"));
    assert!(app.should_quit());
}

#[test]
fn test_enter_on_open_list_without_highlight_keeps_running() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);
    type_text(&mut app, "oa");
    settle_app(&mut app);
    assert!(app.session.state().is_open());

    app.handle_key_event(key(KeyCode::Enter));

    assert!(!app.should_quit());
    assert!(app.accepted.is_none());
    assert!(app.session.state().is_open());

    // Once dismissed, Enter accepts the typed text
    app.handle_key_event(key(KeyCode::Esc));
    app.handle_key_event(key(KeyCode::Enter));
    assert_eq!(app.accepted.as_deref(), Some("oa"));
    assert!(app.should_quit());
}

#[test]
fn test_backspace_to_empty_goes_idle() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);
    type_text(&mut app, "oa");
    settle_app(&mut app);

    app.handle_key_event(key(KeyCode::Backspace));
    app.handle_key_event(key(KeyCode::Backspace));

    assert_eq!(app.field_value, "");
    assert_eq!(app.session.state().phase(), Phase::Idle);
    assert!(!app.session.state().is_open());
}

#[test]
fn test_ctrl_u_clears_field() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);
    type_text(&mut app, "oa");
    settle_app(&mut app);

    app.handle_key_event(key_with_mods(KeyCode::Char('u'), KeyModifiers::CONTROL));

    assert_eq!(app.field_value, "");
    assert!(app.session.state().suggestions().is_empty());
}

#[test]
fn test_tab_blurs_and_refocuses() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);
    type_text(&mut app, "oa");
    settle_app(&mut app);

    app.handle_key_event(key(KeyCode::Tab));
    assert!(!app.focused);
    app.pump();
    assert!(!app.session.state().is_open());

    // Typing is ignored while blurred
    app.handle_key_event(key(KeyCode::Char('k')));
    assert_eq!(app.field_value, "oa");

    app.handle_key_event(key(KeyCode::Tab));
    assert!(app.focused);
    assert!(app.session.state().is_open());
}

#[test]
fn test_paste_uses_first_line() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);

    app.handle_paste_event("oa\nignored");
    settle_app(&mut app);

    assert_eq!(app.field_value, "oa");
    assert_eq!(app.session.state().suggestions().len(), 3);
}

#[test]
fn test_ctrl_c_quits_without_value() {
    let provider = oak_provider();
    let mut app = instant_app(&provider);
    type_text(&mut app, "oa");

    app.handle_key_event(key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL));

    assert!(app.should_quit());
    assert!(app.accepted.is_none());
}
