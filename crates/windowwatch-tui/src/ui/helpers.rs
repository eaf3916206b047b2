use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};
use windowwatch_daemon::Indicator;

pub fn indicator_style(indicator: Indicator) -> Style {
    let color = match indicator {
        Indicator::Neutral => Color::Cyan,
        Indicator::Open => Color::Green,
        Indicator::Closed => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn digit_style(flipping: bool) -> Style {
    if flipping {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// A `width`-wide strip centered horizontally in `area`.
pub fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let side = (area.width - width) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(side),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area)[1]
}
