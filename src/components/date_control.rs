//! Date control with quick-set keys and an inline editor

use crate::action::Action;
use crate::component::Component;
use crate::model::QueryDate;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// `YYYY-MM-DD`
const MAX_INPUT_LEN: usize = 10;

#[derive(Debug, Default)]
pub struct DateControl {
    pub editing: bool,
    pub buffer: String,
}

impl DateControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_edit(&mut self, current: &QueryDate) {
        self.editing = true;
        self.buffer = current.as_str().to_string();
    }

    /// Finish editing and hand back the typed value
    pub fn take_input(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.buffer)
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.buffer.clear();
    }

    pub fn draw_with(&mut self, frame: &mut Frame, area: Rect, date: &QueryDate) {
        let value = if self.editing {
            Span::styled(
                format!("{}▏", self.buffer),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                date.as_str().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let hints: Vec<Span> = if self.editing {
            vec![
                Span::styled("  Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" Apply  "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" Cancel"),
            ]
        } else {
            vec![
                Span::styled("  t", Style::default().fg(Color::Cyan)),
                Span::raw(" Today  "),
                Span::styled("m", Style::default().fg(Color::Cyan)),
                Span::raw(" Tomorrow  "),
                Span::styled("d", Style::default().fg(Color::Cyan)),
                Span::raw(" Edit"),
            ]
        };

        let mut spans = vec![value];
        spans.extend(hints);

        let border = if self.editing { Color::Yellow } else { Color::DarkGray };
        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Date ")
                .title_style(Style::default().fg(Color::Cyan))
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);
    }
}

impl Component for DateControl {
    /// Only consulted while editing
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => Some(Action::CommitDate),
            KeyCode::Esc => Some(Action::CancelDateEdit),
            KeyCode::Backspace => Some(Action::DateBackspace),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => Some(Action::DateInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::DateInput(c) => {
                if self.buffer.len() < MAX_INPUT_LEN {
                    self.buffer.push(c);
                }
            }
            Action::DateBackspace => {
                self.buffer.pop();
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the current date, so the app calls draw_with
        Ok(())
    }
}
