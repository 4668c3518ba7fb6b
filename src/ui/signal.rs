//! Signal panel rendering.
//!
//! Sureness meter, the headline trade (action, call, levels) and the
//! per-instrument universe signals.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::coerce::display_text;
use crate::data::derive::{
    action_class, action_tone, display_signals, stop_loss_class, sureness_clamped, target_class,
};
use crate::data::format::{format_float, format_number, PRICE_DIGITS};
use crate::data::Tone;

/// Render the Signal panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Signal ")
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Label
        Constraint::Length(1), // Gauge
        Constraint::Length(1), // Action
        Constraint::Length(1), // Spacer
        Constraint::Length(5), // Levels
        Constraint::Min(3),    // Universe signals
    ])
    .split(inner);

    render_sureness(frame, app, chunks[0], chunks[1]);
    render_action(frame, app, chunks[2]);
    render_levels(frame, app, chunks[4]);
    render_universe(frame, app, chunks[5]);
}

fn render_sureness(frame: &mut Frame, app: &App, label_area: Rect, gauge_area: Rect) {
    let sureness = sureness_clamped(&app.state.signal);

    let label = Line::from(vec![Span::styled("SURENESS METER", app.theme.header)]);
    frame.render_widget(Paragraph::new(label), label_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.highlight))
        .ratio(sureness / 100.0)
        .label(format!("{}%", format_float(sureness, 1)));
    frame.render_widget(gauge, gauge_area);
}

fn render_action(frame: &mut Frame, app: &App, area: Rect) {
    let signal = &app.state.signal;
    let line = Line::from(vec![
        Span::styled("Action: ", Style::default().fg(app.theme.muted)),
        Span::styled(
            display_text(&signal.action),
            app.theme.tone_style(action_class(signal)),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_levels(frame: &mut Frame, app: &App, area: Rect) {
    let signal = &app.state.signal;
    let label = Style::default().fg(app.theme.muted);

    let lines = vec![
        Line::from(vec![
            Span::styled("Signal     ", label),
            Span::styled(display_text(&signal.call), app.theme.tone_style(Tone::Accent)),
        ]),
        Line::from(vec![
            Span::styled("Price      ", label),
            Span::styled(
                format_number(&signal.price, PRICE_DIGITS),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Target     ", label),
            Span::styled(
                format_number(&signal.target, PRICE_DIGITS),
                app.theme.tone_style(target_class(signal)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Stop Loss  ", label),
            Span::styled(
                format_number(&signal.stop_loss, PRICE_DIGITS),
                app.theme.tone_style(stop_loss_class(signal)),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_universe(frame: &mut Frame, app: &App, area: Rect) {
    let signal = &app.state.signal;

    let header = Row::new(vec![
        Cell::from("Underlying"),
        Cell::from("Signal"),
        Cell::from("Action"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = display_signals(signal)
        .iter()
        .map(|item| {
            let action = item.action();
            Row::new(vec![
                Cell::from(item.underlying()).style(Style::default().fg(app.theme.muted)),
                Cell::from(item.call()),
                Cell::from(display_text(&action)).style(app.theme.tone_style(action_tone(&action))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Fill(2),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Universe Signals ")
            .borders(Borders::TOP)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(table, area);
}
