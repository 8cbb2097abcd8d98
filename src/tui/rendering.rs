use crate::contacts::{DraftForm, Field};
use crate::controller::NoticeLevel;
use crate::tui::state::{BodyView, InputMode, RenderPlan, build_render_plan, delete_prompt};
use crate::tui::theme::Theme;
use crate::tui::view::TuiApp;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

impl TuiApp {
    pub fn view(&mut self, f: &mut Frame) {
        let size = f.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Search box
                Constraint::Length(1), // Search caption
                Constraint::Min(1),    // Body
                Constraint::Length(2), // Footer
            ])
            .split(size);

        let plan = build_render_plan(
            self.controller.state(),
            self.input_mode,
            size.width,
            self.spinner_state,
        );

        self.render_header(f, chunks[0], &plan);
        self.render_search(f, chunks[1], chunks[2], &plan);
        self.render_body(f, chunks[3], &plan);
        self.render_footer(f, chunks[4], &plan);

        match self.input_mode {
            InputMode::Form => {
                if let Some(form) = self.controller.state().form.as_ref() {
                    render_form_popup(f, size, form, &self.theme);
                }
            }
            InputMode::ConfirmDelete => self.render_confirm_popup(f, size),
            _ => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, plan: &RenderPlan) {
        let lines: Vec<Line> = plan
            .header_lines
            .iter()
            .enumerate()
            .map(|(i, l)| {
                let style = if i == 0 {
                    self.theme.header_style
                } else {
                    self.theme.subtitle_style
                };
                Line::from(Span::styled(l.clone(), style))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_search(&mut self, f: &mut Frame, area: Rect, caption: Rect, plan: &RenderPlan) {
        let style = if self.input_mode == InputMode::Search {
            self.theme.focused_input_style
        } else {
            self.theme.input_style
        };
        self.search.set_style(style);
        f.render_widget(&self.search, area);

        if let Some(text) = &plan.search_caption {
            let p = Paragraph::new(text.clone()).style(self.theme.muted_style);
            f.render_widget(p, caption);
        }
    }

    fn render_body(&mut self, f: &mut Frame, area: Rect, plan: &RenderPlan) {
        match &plan.body {
            BodyView::Loading(text) => {
                let p = Paragraph::new(text.clone())
                    .style(self.theme.muted_style)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(p, area);
            }
            BodyView::Failed { message, hint } => {
                let lines = vec![
                    Line::from(Span::styled(message.clone(), self.theme.error_style)),
                    Line::from(Span::styled(hint.clone(), self.theme.muted_style)),
                ];
                let p = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(p, area);
            }
            BodyView::Empty {
                title,
                detail,
                hint,
            } => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        title.clone(),
                        self.theme.body_style.add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(detail.clone(), self.theme.muted_style)),
                ];
                if let Some(hint) = hint {
                    lines.push(Line::default());
                    lines.push(Line::from(Span::styled(hint.clone(), self.theme.info_style)));
                }
                let p = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(p, area);
            }
            BodyView::List { title, rows } => {
                let items: Vec<ListItem> = rows
                    .iter()
                    .map(|r| ListItem::new(r.as_str()).style(self.theme.body_style))
                    .collect();
                let list = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title(title.as_str()))
                    .highlight_style(self.theme.selected_style)
                    .highlight_symbol(">> ");
                f.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect, plan: &RenderPlan) {
        let footer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = match (&self.hint, &plan.notice) {
            (Some(hint), _) => Line::from(Span::styled(hint.clone(), self.theme.muted_style)),
            (None, Some((NoticeLevel::Error, msg))) => {
                Line::from(Span::styled(msg.clone(), self.theme.error_style))
            }
            (None, Some((NoticeLevel::Info, msg))) => {
                Line::from(Span::styled(msg.clone(), self.theme.info_style))
            }
            (None, None) => Line::default(),
        };
        f.render_widget(Paragraph::new(status_line), footer_chunks[0]);

        let hints = Paragraph::new(plan.footer_line.clone()).style(self.theme.footer_style);
        f.render_widget(hints, footer_chunks[1]);
    }

    fn render_confirm_popup(&self, f: &mut Frame, area: Rect) {
        let state = self.controller.state();
        let Some(name) = state
            .pending_delete
            .as_ref()
            .and_then(|id| state.contact(id))
            .map(|c| c.name.as_str())
        else {
            return;
        };

        let lines = vec![
            Line::from(delete_prompt(name)),
            Line::default(),
            Line::from(Span::styled(
                "[y] Delete   [n] Cancel",
                self.theme.muted_style,
            )),
        ];
        let block = Block::default()
            .title("Delete Contact")
            .borders(Borders::ALL)
            .border_style(self.theme.error_style);
        let p = Paragraph::new(lines)
            .style(self.theme.popup_style)
            .wrap(Wrap { trim: true })
            .block(block);

        let popup_area = centered_rect(50, 30, area);
        f.render_widget(Clear, popup_area);
        f.render_widget(p, popup_area);
    }
}

fn render_form_popup(f: &mut Frame, area: Rect, form: &DraftForm, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();
    for field in Field::ALL {
        let focused = form.focus == field;
        let label_style = if focused {
            theme.focused_input_style.add_modifier(Modifier::BOLD)
        } else {
            theme.body_style
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let cursor = if focused && !form.submitting { "_" } else { "" };
        let value = format!("> {}{cursor}", form.value(field));
        let value_style = if focused {
            theme.focused_input_style
        } else {
            theme.input_style
        };
        lines.push(Line::from(Span::styled(value, value_style)));

        match form.errors.get(field) {
            Some(err) => lines.push(Line::from(Span::styled(err.to_string(), theme.error_style))),
            None => lines.push(Line::default()),
        }
    }

    if let Some(err) = &form.submit_error {
        lines.push(Line::from(Span::styled(err.clone(), theme.error_style)));
    }
    let action = if form.submitting {
        Span::styled("Adding...", theme.muted_style)
    } else {
        Span::styled("[Enter] Add Contact   [Esc] Cancel", theme.info_style)
    };
    lines.push(Line::from(action));

    let block = Block::default()
        .title("Add New Contact")
        .borders(Borders::ALL);
    let p = Paragraph::new(lines)
        .style(theme.popup_style)
        .wrap(Wrap { trim: false })
        .block(block);

    let popup_area = centered_rect(60, 70, area);
    f.render_widget(Clear, popup_area);
    f.render_widget(p, popup_area);
}

/// helper function to create a centered rect using up certain percentage of the available rect `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
