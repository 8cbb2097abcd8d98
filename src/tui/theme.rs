use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub header_style: Style,
    pub subtitle_style: Style,
    pub footer_style: Style,
    pub body_style: Style,
    pub muted_style: Style,
    pub error_style: Style,
    pub info_style: Style,
    pub selected_style: Style,
    pub input_style: Style,
    pub focused_input_style: Style,
    pub popup_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            header_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::Gray),
            footer_style: Style::default().fg(Color::Cyan),
            body_style: Style::default().fg(Color::White),
            muted_style: Style::default().fg(Color::DarkGray),
            error_style: Style::default().fg(Color::Red),
            info_style: Style::default().fg(Color::Green),
            selected_style: Style::default().bg(Color::DarkGray).fg(Color::White),
            input_style: Style::default().fg(Color::White),
            focused_input_style: Style::default().fg(Color::Yellow),
            popup_style: Style::default().fg(Color::White),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            header_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::DarkGray),
            footer_style: Style::default().fg(Color::Blue),
            body_style: Style::default().fg(Color::Black),
            muted_style: Style::default().fg(Color::Gray),
            error_style: Style::default().fg(Color::Red),
            info_style: Style::default().fg(Color::Green),
            selected_style: Style::default().bg(Color::Gray).fg(Color::Black),
            input_style: Style::default().fg(Color::Black),
            focused_input_style: Style::default().fg(Color::Magenta),
            popup_style: Style::default().fg(Color::Black),
        }
    }

    /// Unknown names fall back to dark.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}
