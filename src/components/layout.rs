//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub selection: Rect,
    pub date: Rect,
    pub trigger: Rect,
    pub results: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_x = area.x + (area.width - width) / 2;
    let popup_y = area.y + (area.height - height) / 2;

    Rect::new(popup_x, popup_y, width, height)
}

/// Calculate main screen layout
///
/// Selection lists on top, a row with the date and the fetch trigger,
/// then the results table, optional status line and the help bar.
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let mut constraints = vec![
        Constraint::Length(10),
        Constraint::Length(3),
        Constraint::Min(5),
    ];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let (status, help) = if has_status {
        (Some(chunks[3]), chunks[4])
    } else {
        (None, chunks[3])
    };

    MainLayout {
        selection: chunks[0],
        date: controls[0],
        trigger: controls[1],
        results: chunks[2],
        status,
        help,
    }
}
