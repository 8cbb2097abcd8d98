use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::controller::{LoadState, UiEvent};
use crate::tui::state::InputMode;
use crate::tui::view::TuiApp;

/// Handle keys while the contact list has focus. Returns Ok(true) if the caller should exit the event loop.
pub fn handle_normal_mode_key(app: &mut TuiApp, k: KeyEvent) -> Result<bool> {
    match k.code {
        KeyCode::Char('q') => return Ok(true),

        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),

        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.dirty = true;
        }

        KeyCode::Char('a') => {
            app.controller.handle(UiEvent::AddContactRequested);
            app.dirty = true;
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_id() {
                debug!(%id, "delete requested");
                app.controller.handle(UiEvent::DeleteContactRequested(id));
                app.dirty = true;
            }
        }

        KeyCode::Char('r') => {
            if matches!(app.controller.state().load, LoadState::LoadFailed(_)) {
                app.controller.handle(UiEvent::RetryLoadRequested);
                app.spinner_state = 0;
                app.dirty = true;
            }
        }

        KeyCode::Esc => {
            app.controller.clear_notice();
            app.dirty = true;
        }

        _ => {}
    }

    Ok(false)
}
