//! Cause list results: fetch trigger, error text, count and case table

use crate::action::Action;
use crate::component::Component;
use crate::model::fetch::trigger_caption;
use crate::model::{CauseList, FetchStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub const COLUMN_HEADERS: [&str; 5] = ["Sr. No", "Case Number", "Parties", "Advocate", "Purpose"];

/// Upper bound for a column's width before the rest gets squeezed
const MAX_COLUMN_WIDTH: usize = 40;

#[derive(Debug, Default)]
pub struct CauseListView {
    pub has_focus: bool,
    pub scroll: usize,
    /// Row count from the last draw, used to clamp scrolling
    row_count: usize,
}

impl CauseListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top; called when a new list arrives
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.row_count.saturating_sub(1) as isize;
        self.scroll = (self.scroll as isize + delta).clamp(0, max.max(0)) as usize;
    }

    /// The fetch button; dimmed when it cannot be triggered
    pub fn draw_trigger(frame: &mut Frame, area: Rect, loading: bool, enabled: bool) {
        let caption = trigger_caption(loading);
        let style = if enabled {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let key_hint = if enabled { "f " } else { "" };

        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(key_hint, Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {} ", caption), style),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }

    /// Column widths from content, capped so one long field cannot take over
    pub fn column_widths(list: &CauseList) -> [Constraint; 5] {
        let mut widths: [usize; 5] = COLUMN_HEADERS.map(|h| h.width());
        for case in &list.cases {
            for (i, cell) in case.cells().iter().enumerate() {
                widths[i] = widths[i].max(cell.width()).min(MAX_COLUMN_WIDTH);
            }
        }
        widths.map(|w| Constraint::Max(w as u16))
    }

    pub fn draw_with(&mut self, frame: &mut Frame, area: Rect, status: &FetchStatus) {
        let border = if self.has_focus { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Cause List ")
            .title_style(Style::default().fg(Color::Cyan))
            .border_style(Style::default().fg(border));

        match status {
            FetchStatus::Idle => {
                self.row_count = 0;
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    "Choose a court and date, then press f to fetch the cause list",
                    Style::default().fg(Color::DarkGray),
                )))
                .block(block);
                frame.render_widget(paragraph, area);
            }
            FetchStatus::Loading => {
                self.row_count = 0;
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    "Loading cause list...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )))
                .block(block);
                frame.render_widget(paragraph, area);
            }
            FetchStatus::Error(message) => {
                self.row_count = 0;
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )))
                .wrap(Wrap { trim: true })
                .block(block.border_style(Style::default().fg(Color::Red)));
                frame.render_widget(paragraph, area);
            }
            FetchStatus::Success(list) => self.draw_table(frame, area, block, list),
        }
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect, block: Block, list: &CauseList) {
        self.row_count = list.cases.len();
        if self.scroll >= self.row_count {
            self.scroll = self.row_count.saturating_sub(1);
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let summary = Line::from(vec![
            Span::styled("Total cases: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                list.total_cases.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "   x Export JSON  p Open PDF  s Save PDF",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(summary), chunks[0]);

        let header = Row::new(COLUMN_HEADERS.iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        }));

        let rows: Vec<Row> = list
            .cases
            .iter()
            .map(|case| Row::new(case.cells().map(|c| Cell::from(c.to_string()))))
            .collect();

        let table = Table::new(rows, Self::column_widths(list))
            .header(header)
            .column_spacing(2)
            .highlight_style(Style::default().bg(Color::DarkGray));

        let mut state = TableState::default();
        if self.has_focus && self.row_count > 0 {
            state.select(Some(self.scroll));
        }
        *state.offset_mut() = self.scroll;
        frame.render_stateful_widget(table, chunks[1], &mut state);

        let visible = chunks[1].height.saturating_sub(1) as usize;
        if self.row_count > visible {
            let mut scrollbar_state =
                ScrollbarState::new(self.row_count.saturating_sub(visible)).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

impl Component for CauseListView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollUp => self.scroll_by(-1),
            Action::PageDown => self.scroll_by(10),
            Action::PageUp => self.scroll_by(-10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the fetch status, so the app calls draw_with
        Ok(())
    }
}
