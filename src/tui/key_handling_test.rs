use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ContactId;
use crate::contacts::Field;
use crate::test_support::{StubApi, controller_for, sample_contacts};
use crate::tui::TuiApp;
use crate::tui::state::InputMode;

async fn loaded_app() -> TuiApp {
    let mut controller = controller_for(&StubApi::new(sample_contacts()));
    controller.load().await.unwrap();
    let mut app = TuiApp::new(controller, "dark");
    app.sync_with_state();
    app
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut TuiApp, code: KeyCode) -> bool {
    app.handle_key(key(code)).unwrap()
}

fn type_str(app: &mut TuiApp, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[tokio::test]
async fn q_quits_from_list() {
    let mut app = loaded_app().await;
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[tokio::test]
async fn ctrl_c_needs_a_second_press() {
    let mut app = loaded_app().await;
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!app.handle_key(ctrl_c).unwrap());
    assert!(app.hint.is_some());
    assert!(app.handle_key(ctrl_c).unwrap());
}

#[tokio::test]
async fn j_and_k_move_selection_within_bounds() {
    let mut app = loaded_app().await;
    assert_eq!(app.list_state.selected(), Some(0));
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.list_state.selected(), Some(0));
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.list_state.selected(), Some(2));
    assert_eq!(app.selected_id(), Some(ContactId::Int(3)));
}

#[tokio::test]
async fn search_filters_and_esc_clears() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode, InputMode::Search);

    type_str(&mut app, "bob");
    assert_eq!(app.controller.state().search_term, "bob");
    assert_eq!(app.controller.state().filtered.len(), 1);
    assert_eq!(app.list_state.selected(), Some(0));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.controller.state().search_term, "");
    assert_eq!(app.controller.state().filtered.len(), 3);
    assert_eq!(app.search_text(), "");
}

#[tokio::test]
async fn enter_leaves_search_but_keeps_term() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "zzz");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.controller.state().search_term, "zzz");
    assert!(app.controller.state().filtered.is_empty());
    assert_eq!(app.list_state.selected(), None);
    assert_eq!(app.selected_id(), None);
}

#[tokio::test]
async fn invalid_form_stays_open_with_errors() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.input_mode, InputMode::Form);

    type_str(&mut app, "Dee");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "not-an-email");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.input_mode, InputMode::Form);
    let form = app.controller.state().form.as_ref().unwrap();
    assert!(!form.submitting);
    assert_eq!(form.draft.name, "Dee");
    assert!(form.errors.get(Field::Email).is_some());
    assert!(form.errors.get(Field::Phone).is_some());
    assert_eq!(form.focus, Field::Email);
}

#[tokio::test]
async fn valid_form_creates_contact_and_closes() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "Dee Park");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "dee@park.io");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "+1 555-0123");
    press(&mut app, KeyCode::Enter);

    let form = app.controller.state().form.as_ref().unwrap();
    assert!(form.submitting);
    // Frozen while in flight.
    type_str(&mut app, "x");
    assert_eq!(
        app.controller.state().form.as_ref().unwrap().draft.phone,
        "+1 555-0123"
    );

    assert!(app.controller.next_outcome().await);
    app.sync_with_state();
    assert_eq!(app.input_mode, InputMode::Normal);
    let state = app.controller.state();
    assert_eq!(state.contacts.len(), 4);
    assert_eq!(state.contacts[0].name, "Dee Park");
}

#[tokio::test]
async fn esc_cancels_form() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "half typed");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.controller.state().form.is_none());
}

#[tokio::test]
async fn esc_is_ignored_while_create_is_in_flight() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "Dee");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "dee@park.io");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "1");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Form);
    assert!(app.controller.state().form.as_ref().unwrap().submitting);

    assert!(app.controller.next_outcome().await);
    app.sync_with_state();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.controller.state().contacts[0].name, "Dee");
}

#[tokio::test]
async fn delete_asks_first_and_n_keeps_contact() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.input_mode, InputMode::ConfirmDelete);
    assert_eq!(
        app.controller.state().pending_delete,
        Some(ContactId::Int(2))
    );

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.controller.state().contacts.len(), 3);
}

#[tokio::test]
async fn delete_confirmed_with_y_removes_contact() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.input_mode, InputMode::Normal);

    assert!(app.controller.next_outcome().await);
    app.sync_with_state();
    let state = app.controller.state();
    assert_eq!(state.contacts.len(), 2);
    assert!(state.contact(&ContactId::Int(3)).is_none());
    assert_eq!(app.list_state.selected(), Some(1));
}

#[tokio::test]
async fn retry_is_ignored_once_loaded() {
    let mut app = loaded_app().await;
    press(&mut app, KeyCode::Char('r'));
    assert!(!app.controller.state().is_loading());
}
