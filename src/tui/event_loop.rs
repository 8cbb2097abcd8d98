use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::tui::event_handlers::{
    handle_confirm_delete_key, handle_form_key, handle_normal_mode_key, handle_search_mode_key,
};
use crate::tui::state::InputMode;
use crate::tui::view::{TerminalType, TuiApp};

const CTRL_C_WINDOW: Duration = Duration::from_secs(3);

impl TuiApp {
    pub(crate) fn event_loop(&mut self, terminal: &mut TerminalType) -> Result<()> {
        let mut last_spinner_update = Instant::now();
        loop {
            if self.controller.poll_outcomes() {
                self.sync_with_state();
                self.dirty = true;
            }

            let state = self.controller.state();
            let busy = state.is_loading() || state.form.as_ref().is_some_and(|f| f.submitting);
            if busy && last_spinner_update.elapsed() >= Duration::from_millis(150) {
                self.spinner_state = self.spinner_state.wrapping_add(1);
                self.dirty = true;
                last_spinner_update = Instant::now();
            }

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(k) = event::read()?
                && k.kind != KeyEventKind::Release
                && self.handle_key(k)?
            {
                return Ok(());
            }

            if self.dirty {
                terminal.draw(|f| self.view(f))?;
                self.dirty = false;
            }
        }
    }

    /// Route one key press. Returns Ok(true) when the app should exit.
    pub fn handle_key(&mut self, k: KeyEvent) -> Result<bool> {
        if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
            let now = Instant::now();
            if let Some(prev) = self.last_ctrl_c_at
                && now.duration_since(prev) <= CTRL_C_WINDOW
            {
                return Ok(true);
            }
            self.last_ctrl_c_at = Some(now);
            self.hint = Some("[Press Ctrl+C again within 3s to exit]".to_string());
            self.dirty = true;
            return Ok(false);
        }
        if self.hint.take().is_some() {
            self.dirty = true;
        }

        debug!(mode = ?self.input_mode, code = ?k.code, "key");
        let exit = match self.input_mode {
            InputMode::Normal => handle_normal_mode_key(self, k)?,
            InputMode::Search => handle_search_mode_key(self, k)?,
            InputMode::Form => handle_form_key(self, k)?,
            InputMode::ConfirmDelete => handle_confirm_delete_key(self, k)?,
        };
        self.sync_with_state();
        Ok(exit)
    }
}
