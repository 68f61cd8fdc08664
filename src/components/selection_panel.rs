//! Court selection panel
//!
//! Four side-by-side lists (state, district, court complex, court). The
//! highlighted row moves with j/k, the focused list with h/l, and Enter
//! commits the highlighted option.

use crate::action::Action;
use crate::component::Component;
use crate::model::{Level, LocationLists, Selection};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct SelectionPanel {
    /// List with keyboard focus
    pub focused_level: Level,
    /// Whether the panel as a whole has focus
    pub has_focus: bool,
    highlighted: [usize; 4],
    /// Option counts from the last draw, used to clamp movement
    lengths: [usize; 4],
}

impl Default for SelectionPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPanel {
    pub fn new() -> Self {
        Self {
            focused_level: Level::State,
            has_focus: true,
            highlighted: [0; 4],
            lengths: [0; 4],
        }
    }

    pub fn highlighted(&self, level: Level) -> usize {
        self.highlighted[level.index()]
    }

    /// Sync option counts so movement stays in range before the next draw
    pub fn set_lengths(&mut self, lists: &LocationLists) {
        for level in Level::all() {
            let len = lists.options(level).len();
            self.lengths[level.index()] = len;
            let idx = &mut self.highlighted[level.index()];
            *idx = (*idx).min(len.saturating_sub(1));
        }
    }

    /// Move the highlight of `level` onto the currently selected code
    pub fn highlight_selected(&mut self, level: Level, lists: &LocationLists, selection: &Selection) {
        if let Some(code) = selection.get(level) {
            if let Some(pos) = lists.options(level).iter().position(|l| l.code == code) {
                self.highlighted[level.index()] = pos;
            }
        } else {
            self.highlighted[level.index()] = 0;
        }
    }

    fn move_highlight(&mut self, delta: isize) {
        let i = self.focused_level.index();
        let len = self.lengths[i];
        if len == 0 {
            return;
        }
        let current = self.highlighted[i] as isize;
        self.highlighted[i] = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    pub fn draw_with(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        lists: &LocationLists,
        selection: &Selection,
    ) {
        self.set_lengths(lists);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for level in Level::all() {
            let column = columns[level.index()];
            let focused = self.has_focus && self.focused_level == level;
            let title = if level.is_optional() {
                format!(" {} (optional) ", level.name())
            } else {
                format!(" {} ", level.name())
            };
            let border_color = if focused { Color::Cyan } else { Color::DarkGray };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .border_style(Style::default().fg(border_color));

            let options = lists.options(level);
            if options.is_empty() {
                let message = if lists.is_loading(level) {
                    "Loading..."
                } else if level == Level::State || selection.get(level.prev().unwrap_or(level)).is_some() {
                    "No options"
                } else {
                    "Choose above first"
                };
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    message,
                    Style::default().fg(Color::DarkGray),
                )))
                .block(block);
                frame.render_widget(paragraph, column);
                continue;
            }

            let selected_code = selection.get(level);
            let items: Vec<ListItem> = options
                .iter()
                .map(|location| {
                    let is_selected = selected_code == Some(location.code.as_str());
                    let marker = if is_selected { "● " } else { "  " };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Green)),
                        Span::raw(location.name.clone()),
                    ]))
                })
                .collect();

            let mut list = List::new(items).block(block);
            if focused {
                list = list
                    .highlight_style(
                        Style::default()
                            .bg(Color::Blue)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )
                    .highlight_symbol("▶ ");
            }

            let mut state = ListState::default();
            state.select(Some(self.highlighted[level.index()]));
            frame.render_stateful_widget(list, column, &mut state);
        }
    }
}

impl Component for SelectionPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_highlight(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_highlight(-1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(next) = self.focused_level.next() {
                    self.focused_level = next;
                }
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(prev) = self.focused_level.prev() {
                    self.focused_level = prev;
                }
                None
            }
            KeyCode::Enter if self.lengths[self.focused_level.index()] > 0 => Some(
                Action::ChooseLocation(self.focused_level, self.highlighted(self.focused_level)),
            ),
            KeyCode::Backspace | KeyCode::Delete => Some(Action::ClearLocation(self.focused_level)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the option lists, so the app calls draw_with
        Ok(())
    }
}
