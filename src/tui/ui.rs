//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Gauge, List, ListItem, ListState, Paragraph,
    },
    Frame,
};

use crate::features::breathing::display::{phase_progress, SCALE_MAX};
use crate::features::breathing::{breath_scale, FeedbackSink, Phase};
use crate::tui::app::{App, SettingRow};
use crate::tui::event::HELP;

/// Accent color for a phase.
const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::Gray,
        Phase::InhaleNose => Color::Cyan,
        Phase::HoldAfterInhale | Phase::HoldAfterExhale => Color::Yellow,
        Phase::ExhaleMouth => Color::Magenta,
    }
}

/// Render the application UI.
pub fn render<F: FeedbackSink>(frame: &mut Frame<'_>, app: &App<F>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    if app.show_settings {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(chunks[1]);
        render_session(frame, app, body[0]);
        render_settings(frame, app, body[1]);
    } else {
        render_session(frame, app, chunks[1]);
    }

    render_status_bar(frame, app, chunks[2]);
}

/// Render the phase label.
fn render_header<F: FeedbackSink>(frame: &mut Frame<'_>, app: &App<F>, area: Rect) {
    let phase = app.controller.phase();
    let color = phase_color(phase);

    let lines = vec![
        Line::from(Span::styled(
            phase.prefix_text(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            phase.main_text(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(header, area);
}

/// Render the breathing circle, counters, and phase gauge.
fn render_session<F: FeedbackSink>(frame: &mut Frame<'_>, app: &App<F>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Circle
            Constraint::Length(1), // Counters
            Constraint::Length(1), // Gauge
        ])
        .split(area);

    let snapshot = app.snapshot();
    let color = phase_color(snapshot.phase);
    let radius = breath_scale(&snapshot) / SCALE_MAX * 0.9;

    let circle = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius,
                color,
            });
        });
    frame.render_widget(circle, chunks[0]);

    let values = app.display_values();
    let counters = Paragraph::new(Line::from(vec![
        Span::styled(
            values.seconds_text(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} left", values.reps_text()),
            Style::default().fg(Color::White),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(counters, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(phase_progress(&snapshot))
        .label("");
    frame.render_widget(gauge, chunks[2]);
}

/// Render the settings panel.
fn render_settings<F: FeedbackSink>(frame: &mut Frame<'_>, app: &App<F>, area: Rect) {
    let locked = app.controller.is_active();

    let items: Vec<ListItem<'_>> = SettingRow::ALL
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let is_selected = i == app.selected;
            let unit = match row {
                SettingRow::Duration(_) => "s",
                SettingRow::Reps => "",
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<20}", row.label()),
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("{:>3}{unit}", app.row_value(*row)),
                    Style::default().fg(if locked {
                        Color::DarkGray
                    } else {
                        Color::Yellow
                    }),
                ),
            ]);

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let title = if locked { " Settings (locked) " } else { " Settings " };
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar.
fn render_status_bar<F: FeedbackSink>(frame: &mut Frame<'_>, app: &App<F>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
