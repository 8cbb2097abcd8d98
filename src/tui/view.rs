use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{cursor, execute, terminal};
use ratatui::widgets::{Block, Borders, ListState};
use std::io;
use std::time::Instant;
use tracing::debug;
use tui_textarea::TextArea;

use crate::api::ContactId;
use crate::controller::ContactsController;
use crate::tui::state::InputMode;
use crate::tui::theme::Theme;

pub(crate) type TerminalType = Terminal<CrosstermBackend<io::Stdout>>;

pub struct TuiApp {
    pub controller: ContactsController,
    pub input_mode: InputMode,
    pub search: TextArea<'static>,
    pub list_state: ListState,
    pub theme: Theme,
    pub spinner_state: usize,
    pub dirty: bool,
    /// One-line hint shown in the footer until the next key press.
    pub hint: Option<String>,
    pub(crate) last_ctrl_c_at: Option<Instant>,
}

pub(crate) fn search_box() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_block(Block::default().borders(Borders::ALL).title("Search"));
    textarea.set_placeholder_text("Search contacts by name, email, or phone...");
    textarea
}

impl TuiApp {
    pub fn new(controller: ContactsController, theme: &str) -> Self {
        let theme = Theme::by_name(theme);
        debug!(theme = %theme.name, "tui theme");
        Self {
            controller,
            input_mode: InputMode::Normal,
            search: search_box(),
            list_state: ListState::default(),
            theme,
            spinner_state: 0,
            dirty: true,
            hint: None,
            last_ctrl_c_at: None,
        }
    }

    pub fn search_text(&self) -> String {
        self.search.lines().join("")
    }

    /// Id of the highlighted row in the filtered list.
    pub fn selected_id(&self) -> Option<ContactId> {
        let idx = self.list_state.selected()?;
        self.controller
            .state()
            .filtered
            .get(idx)
            .map(|c| c.id.clone())
    }

    pub fn select_next(&mut self) {
        let len = self.controller.state().filtered.len();
        if len == 0 {
            return;
        }
        let next = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(next));
        self.dirty = true;
    }

    pub fn select_prev(&mut self) {
        if self.controller.state().filtered.is_empty() {
            return;
        }
        let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(prev));
        self.dirty = true;
    }

    /// Re-align mode and selection with controller state after it changed.
    pub fn sync_with_state(&mut self) {
        let state = self.controller.state();
        self.input_mode = if state.form.is_some() {
            InputMode::Form
        } else if state.pending_delete.is_some() {
            InputMode::ConfirmDelete
        } else if matches!(self.input_mode, InputMode::Form | InputMode::ConfirmDelete) {
            InputMode::Normal
        } else {
            self.input_mode
        };

        let len = state.filtered.len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn run(&mut self) -> Result<()> {
        struct TuiGuard;
        impl Drop for TuiGuard {
            fn drop(&mut self) {
                let mut stdout = io::stdout();
                let _ = execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show);
                let _ = terminal::disable_raw_mode();
            }
        }
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        let _guard = TuiGuard;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        self.controller.start_load();
        let res = self.event_loop(&mut terminal);
        self.controller.shutdown();
        res
    }
}
