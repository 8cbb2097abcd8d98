use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent};

use crate::controller::UiEvent;
use crate::tui::view::TuiApp;

/// Handle keys while the delete confirmation is shown.
pub fn handle_confirm_delete_key(app: &mut TuiApp, k: KeyEvent) -> Result<bool> {
    let Some(id) = app.controller.state().pending_delete.clone() else {
        return Ok(false);
    };
    match k.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.controller.handle(UiEvent::DeleteContactConfirmed(id));
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.controller.handle(UiEvent::DeleteContactCancelled);
        }
        _ => return Ok(false),
    }
    app.dirty = true;
    Ok(false)
}
