use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::UiEvent;
use crate::tui::view::TuiApp;

/// Handle keys while the add-contact form is open.
pub fn handle_form_key(app: &mut TuiApp, k: KeyEvent) -> Result<bool> {
    let Some(form) = app.controller.form_mut() else {
        return Ok(false);
    };
    // Frozen, Esc included, while a create is in flight.
    if form.submitting {
        return Ok(false);
    }

    match k.code {
        KeyCode::Esc => app.controller.handle(UiEvent::AddContactCancelled),
        KeyCode::Enter => {
            let draft = form.draft.clone();
            app.controller.handle(UiEvent::AddContactSubmitted(draft));
            app.spinner_state = 0;
        }
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => form.push_char(c),
        _ => return Ok(false),
    }
    app.dirty = true;
    Ok(false)
}
