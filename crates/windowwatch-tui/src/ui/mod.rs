mod big_text;
pub mod helpers;

use crate::app::App;
use big_text::{BigText, GLYPH_HEIGHT};
use helpers::{centered_columns, digit_style, indicator_style};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::time::Duration;
use windowwatch_core::Clock;
use windowwatch_daemon::CountdownField;

const FLIP_DURATION: Duration = Duration::from_millis(600);

pub fn draw<C: Clock>(f: &mut Frame, app: &App<C>) {
    let view = &app.display.state_view;

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(GLYPH_HEIGHT + 2),
        Constraint::Length(2),
    ];
    if view.show_progress {
        constraints.push(Constraint::Length(3));
    }
    if view.show_action {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_title_bar(f, app, chunks[0]);
    draw_state_pill(f, app, chunks[1]);
    draw_countdown(f, app, chunks[2]);
    draw_description(f, app, chunks[3]);

    let mut next = 4;
    if view.show_progress {
        draw_progress(f, app, chunks[next]);
        next += 1;
    }
    if view.show_action {
        draw_action(f, chunks[next]);
    }

    draw_status_bar(f, app, chunks[chunks.len() - 1]);
}

fn draw_title_bar<C: Clock>(f: &mut Frame, app: &App<C>, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " WindowWatch ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            app.display.local_time.as_str(),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn draw_state_pill<C: Clock>(f: &mut Frame, app: &App<C>, area: Rect) {
    let view = &app.display.state_view;
    let style = indicator_style(view.indicator);
    let label = format!(" ● {} ", view.label);

    let pill_area = centered_columns(area, label.chars().count() as u16 + 2);
    let pill = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(pill, pill_area);
}

fn draw_countdown<C: Clock>(f: &mut Frame, app: &App<C>, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (field, card) in CountdownField::ALL.into_iter().zip(cards.iter()) {
        let value = app.display.field(field);
        let flipping = app.display.recently_changed(field, FLIP_DURATION);

        let block = Block::default()
            .borders(Borders::ALL)
            .title_bottom(Line::from(format!(" {} ", field.label())).centered())
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(*card);
        f.render_widget(block, *card);

        let digits = centered_columns(inner, BigText::width(value));
        f.render_widget(BigText::new(value).style(digit_style(flipping)), digits);
    }
}

fn draw_description<C: Clock>(f: &mut Frame, app: &App<C>, area: Rect) {
    let description = Paragraph::new(app.display.description.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    f.render_widget(description, area);
}

fn draw_progress<C: Clock>(f: &mut Frame, app: &App<C>, area: Rect) {
    let ratio = (app.display.progress_percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(ratio)
        .label(app.display.progress_label.as_str());
    f.render_widget(gauge, area);
}

fn draw_action(f: &mut Frame, area: Rect) {
    let text = " ▶ Start migration [Enter] ";
    let button_area = centered_columns(area, text.chars().count() as u16 + 2);
    let button = Paragraph::new(Span::styled(
        text,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(button, button_area);
}

fn draw_status_bar<C: Clock>(f: &mut Frame, app: &App<C>, area: Rect) {
    let mut spans = vec![
        Span::styled("[q]", Style::default().fg(Color::Yellow)),
        Span::raw("Quit "),
    ];
    if app.display.state_view.show_action {
        spans.push(Span::styled("[Enter]", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw("Action "));
    }
    if !app.status_message.is_empty() {
        spans.push(Span::raw("│ "));
        spans.push(Span::raw(app.status_message.as_str()));
    }

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status, area);
}
