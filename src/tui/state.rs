use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::Contact;
use crate::controller::{ContactsState, LoadState, NoticeLevel};

pub const TITLE: &str = "Contact List";
pub const SUBTITLE: &str = "Manage your contacts with ease";

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Form,
    ConfirmDelete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    Loading(String),
    Failed {
        message: String,
        hint: String,
    },
    Empty {
        title: String,
        detail: String,
        hint: Option<String>,
    },
    List {
        title: String,
        rows: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub header_lines: Vec<String>,
    pub search_caption: Option<String>,
    pub body: BodyView,
    pub footer_line: String,
    pub notice: Option<(NoticeLevel, String)>,
}

pub fn truncate_display(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if ch_w == 0 {
            out.push(ch);
            continue;
        }
        if width + ch_w > max {
            break;
        }
        out.push(ch);
        width += ch_w;
    }
    out
}

/// Pad or cut `s` to exactly `width` display columns.
fn fit_column(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let pad = width.saturating_sub(cut.width());
    format!("{cut}{}", " ".repeat(pad))
}

pub fn spinner_char(spinner_state: usize) -> char {
    SPINNER_CHARS[spinner_state % SPINNER_CHARS.len()]
}

/// One list row: name, email and phone in columns sized to `w`.
pub fn contact_row(contact: &Contact, w: u16) -> String {
    let w = w as usize;
    let name_w = (w * 3 / 10).max(8);
    let email_w = (w * 4 / 10).max(8);
    let row = format!(
        "{} {} {}",
        fit_column(&contact.name, name_w),
        fit_column(&contact.email, email_w),
        contact.phone
    );
    truncate_display(row.trim_end(), w)
}

pub fn footer_hints(mode: InputMode, load: &LoadState) -> &'static str {
    match mode {
        InputMode::Normal if matches!(load, LoadState::LoadFailed(_)) => {
            "r retry | / search | a add | q quit"
        }
        InputMode::Normal => "↑↓/jk select | / search | a add | d delete | q quit",
        InputMode::Search => "type to filter | Enter/↓ back to list | Esc clear",
        InputMode::Form => "Tab/Shift-Tab move | Enter submit | Esc cancel",
        InputMode::ConfirmDelete => "y/Enter delete | n/Esc cancel",
    }
}

pub fn build_render_plan(
    state: &ContactsState,
    mode: InputMode,
    w: u16,
    spinner_state: usize,
) -> RenderPlan {
    let w_usize = w as usize;
    let header_lines = vec![
        truncate_display(TITLE, w_usize),
        truncate_display(SUBTITLE, w_usize),
    ];

    let term = state.search_term.as_str();
    let search_caption = if term.trim().is_empty() {
        None
    } else {
        Some(truncate_display(
            &format!("Searching for \"{term}\""),
            w_usize,
        ))
    };

    let body = match &state.load {
        LoadState::Idle | LoadState::Loading => BodyView::Loading(format!(
            "Loading contacts... {}",
            spinner_char(spinner_state)
        )),
        LoadState::LoadFailed(message) => BodyView::Failed {
            message: format!("Error: {message}"),
            hint: "Press r to try again".to_string(),
        },
        LoadState::Loaded if state.filtered.is_empty() && !term.trim().is_empty() => {
            BodyView::Empty {
                title: "No contacts found".to_string(),
                detail: format!(
                    "No contacts match \"{term}\". Try adjusting your search terms."
                ),
                hint: None,
            }
        }
        LoadState::Loaded if state.filtered.is_empty() => BodyView::Empty {
            title: "No contacts yet".to_string(),
            detail: "Get started by adding your first contact.".to_string(),
            hint: Some("Press a to add a contact".to_string()),
        },
        LoadState::Loaded => BodyView::List {
            title: format!("Contacts ({})", state.filtered.len()),
            rows: state
                .filtered
                .iter()
                .map(|c| contact_row(c, w.saturating_sub(4)))
                .collect(),
        },
    };

    let footer_line = truncate_display(footer_hints(mode, &state.load), w_usize);
    let notice = state.notice.as_ref().map(|n| {
        let stamped = format!("[{}] {}", n.at.format("%H:%M:%S"), n.message);
        (n.level, truncate_display(&stamped, w_usize))
    });

    RenderPlan {
        header_lines,
        search_caption,
        body,
        footer_line,
        notice,
    }
}

pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete {name}? This action cannot be undone.")
}
