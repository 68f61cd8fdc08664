//! Case search dialog: by CNR, or by case type, number and year

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{CaseDetails, CaseLookup, LookupStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Input the dialog is editing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Cnr,
    CaseType,
    CaseNumber,
    CaseYear,
}

impl SearchField {
    fn next(self) -> Self {
        match self {
            SearchField::Cnr => SearchField::CaseType,
            SearchField::CaseType => SearchField::CaseNumber,
            SearchField::CaseNumber => SearchField::CaseYear,
            SearchField::CaseYear => SearchField::Cnr,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SearchField::Cnr => "CNR",
            SearchField::CaseType => "Case type",
            SearchField::CaseNumber => "Number",
            SearchField::CaseYear => "Year",
        }
    }

    /// CNR numbers are 16 characters
    fn max_len(self) -> usize {
        match self {
            SearchField::Cnr => 16,
            SearchField::CaseType => 10,
            SearchField::CaseNumber => 7,
            SearchField::CaseYear => 4,
        }
    }

    fn accepts(self, c: char) -> bool {
        match self {
            SearchField::Cnr | SearchField::CaseType => c.is_ascii_alphanumeric(),
            SearchField::CaseNumber | SearchField::CaseYear => c.is_ascii_digit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Cnr,
    Details,
}

/// What a submitted search asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseSearch {
    Cnr(String),
    Details(CaseDetails),
}

#[derive(Debug, Default)]
pub struct CaseSearchDialog {
    pub field: SearchField,
    pub cnr_input: String,
    pub case_type: String,
    pub case_number: String,
    pub case_year: String,
}

impl CaseSearchDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// CNR field is CNR mode; any of the other three is details mode
    pub fn mode(&self) -> SearchMode {
        match self.field {
            SearchField::Cnr => SearchMode::Cnr,
            _ => SearchMode::Details,
        }
    }

    fn input_mut(&mut self, field: SearchField) -> &mut String {
        match field {
            SearchField::Cnr => &mut self.cnr_input,
            SearchField::CaseType => &mut self.case_type,
            SearchField::CaseNumber => &mut self.case_number,
            SearchField::CaseYear => &mut self.case_year,
        }
    }

    fn input(&self, field: SearchField) -> &str {
        match field {
            SearchField::Cnr => &self.cnr_input,
            SearchField::CaseType => &self.case_type,
            SearchField::CaseNumber => &self.case_number,
            SearchField::CaseYear => &self.case_year,
        }
    }

    /// Normalized CNR, or `None` while the input is empty
    pub fn cnr(&self) -> Option<String> {
        let cnr = self.cnr_input.trim().to_uppercase();
        (!cnr.is_empty()).then_some(cnr)
    }

    /// Case details once type and number are filled and the year has four digits
    pub fn details(&self) -> Option<CaseDetails> {
        if self.case_type.is_empty() || self.case_number.is_empty() || self.case_year.len() != 4 {
            return None;
        }
        Some(CaseDetails {
            case_type: self.case_type.clone(),
            case_number: self.case_number.clone(),
            case_year: self.case_year.clone(),
        })
    }

    /// Search for the active mode, or `None` while its input is incomplete
    pub fn request(&self) -> Option<CaseSearch> {
        match self.mode() {
            SearchMode::Cnr => self.cnr().map(CaseSearch::Cnr),
            SearchMode::Details => self.details().map(CaseSearch::Details),
        }
    }

    fn input_line(&self, field: SearchField) -> Line<'static> {
        let active = self.field == field;
        let label_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cursor = if active { "▏" } else { "" };
        Line::from(vec![
            Span::styled(format!("  {:<11}", format!("{}:", field.label())), label_style),
            Span::styled(
                format!("{}{}", self.input(field), cursor),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }

    fn result_lines(result: &CaseLookup) -> Vec<Line<'static>> {
        let color = if result.found { Color::Green } else { Color::Yellow };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("  {}  ", result.case_id),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    result.listing_summary(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        // Page rows when there are any, else whatever fields were filled in
        let rows: Vec<(String, String)> = if result.details.is_empty() {
            [
                ("next hearing", &result.next_hearing_date),
                ("status", &result.case_status),
                ("court", &result.court_name),
                ("serial no.", &result.serial_number),
            ]
            .into_iter()
            .filter_map(|(label, value)| value.clone().map(|v| (label.to_string(), v)))
            .collect()
        } else {
            result.details.clone()
        };

        if rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No case details returned",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        let label_width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0)
            .min(24);
        for (label, value) in rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<width$}  ", label, width = label_width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(value),
            ]));
        }
        lines
    }

    pub fn draw_with(&mut self, frame: &mut Frame, area: Rect, lookup: &LookupStatus) {
        let popup_area = centered_popup(area, 70, 24);
        frame.render_widget(Clear, popup_area);

        let mode_hint = match self.mode() {
            SearchMode::Cnr => "  Search by CNR  (Tab: case details)",
            SearchMode::Details => "  Search by case details in the selected court  (Tab: next field)",
        };
        let mut lines = vec![
            Line::from(Span::styled(mode_hint, Style::default().fg(Color::DarkGray))),
            Line::from(""),
            self.input_line(SearchField::Cnr),
            Line::from(""),
            self.input_line(SearchField::CaseType),
            self.input_line(SearchField::CaseNumber),
            self.input_line(SearchField::CaseYear),
            Line::from(""),
        ];

        match lookup {
            LookupStatus::Idle => lines.push(Line::from(Span::styled(
                "  Fill in the active search and press Enter",
                Style::default().fg(Color::DarkGray),
            ))),
            LookupStatus::Searching => lines.push(Line::from(Span::styled(
                "  Searching...",
                Style::default().fg(Color::Yellow),
            ))),
            LookupStatus::Failed(message) => lines.push(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            ))),
            LookupStatus::Found(result) => lines.extend(Self::result_lines(result)),
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Case Search ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                    .title_bottom(Line::from(" Enter Search  Tab Field  Esc Close ").centered()),
            );
        frame.render_widget(paragraph, popup_area);
    }
}

impl Component for CaseSearchDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitCaseSearch),
            KeyCode::Tab => Some(Action::CaseSearchNextField),
            KeyCode::Backspace => Some(Action::CaseSearchBackspace),
            KeyCode::Char(c) if self.field.accepts(c) => Some(Action::CaseSearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let field = self.field;
        match action {
            Action::CaseSearchInput(c) if field.accepts(c) => {
                let input = self.input_mut(field);
                if input.len() < field.max_len() {
                    input.push(c.to_ascii_uppercase());
                }
            }
            Action::CaseSearchBackspace => {
                self.input_mut(field).pop();
            }
            Action::CaseSearchNextField => self.field = field.next(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the lookup status, so the app calls draw_with
        Ok(())
    }
}
