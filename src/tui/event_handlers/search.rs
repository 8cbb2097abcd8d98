use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use tui_textarea::Input;

use crate::controller::UiEvent;
use crate::tui::state::InputMode;
use crate::tui::view::{TuiApp, search_box};

/// Handle keys while the search box has focus. Every edit re-filters the list.
pub fn handle_search_mode_key(app: &mut TuiApp, k: KeyEvent) -> Result<bool> {
    match k.code {
        KeyCode::Esc => {
            app.search = search_box();
            app.controller
                .handle(UiEvent::SearchTermChanged(String::new()));
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
            app.input_mode = InputMode::Normal;
        }
        // Single-line box; newlines never reach the textarea.
        _ => {
            if app.search.input(Input::from(k)) {
                let term = app.search_text();
                app.controller.handle(UiEvent::SearchTermChanged(term));
            }
        }
    }
    app.dirty = true;
    Ok(false)
}
