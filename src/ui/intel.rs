//! Market Intel panel rendering.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::coerce::display_text;
use crate::data::derive::{
    bias_label, headlines, health_label, indicator_text, indicator_value, policy_label,
    sentiment_class, sentiment_value,
};
use crate::data::format::{
    format_clock, format_float, format_number, format_time, PLACEHOLDER, PRICE_DIGITS,
    SENTIMENT_DIGITS,
};
use crate::data::Tone;

/// Indicators shown as text.
const TEXT_INDICATORS: [(&str, &str); 2] = [("Trend", "trend"), ("Momentum", "momentum")];

/// Indicators shown as fixed-precision numbers.
const NUMERIC_INDICATORS: [(&str, &str); 4] =
    [("SMA20", "sma20"), ("SMA50", "sma50"), ("RSI", "rsi"), ("ATR", "atr")];

/// Render the Market Intel panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Market Intel ")
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Bias / sentiment / earning / volatility
        Constraint::Length(3), // Reason and policy
        Constraint::Length(3), // Indicators
        Constraint::Min(3),    // Headlines
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    render_readouts(frame, app, chunks[0]);
    render_reason(frame, app, chunks[1]);
    render_indicators(frame, app, chunks[2]);
    render_headlines(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

fn label(app: &App, text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(app.theme.muted))
}

fn render_readouts(frame: &mut Frame, app: &App, area: Rect) {
    let signal = &app.state.signal;
    let value = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            label(app, "Bias "),
            Span::styled(
                bias_label(signal).into_owned(),
                app.theme.tone_style(sentiment_class(signal)),
            ),
            label(app, "   Sentiment "),
            Span::styled(format_float(sentiment_value(signal), SENTIMENT_DIGITS), value),
        ]),
        Line::from(vec![
            label(app, "Earning Pot. "),
            Span::styled(
                format!("{}%", format_number(&signal.earning_potential, PRICE_DIGITS)),
                app.theme.tone_style(Tone::Accent),
            ),
            label(app, "   Volatility "),
            Span::styled(
                format!("{}%", format_number(&signal.volatility, PRICE_DIGITS)),
                value,
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_reason(frame: &mut Frame, app: &App, area: Rect) {
    let signal = &app.state.signal;
    let lines = vec![
        Line::from(vec![label(app, "Reason: "), Span::raw(display_text(&signal.reason))]),
        Line::from(vec![label(app, "Policy: "), Span::raw(policy_label(signal))]),
    ];
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_indicators(frame: &mut Frame, app: &App, area: Rect) {
    let signal = &app.state.signal;
    let value = Style::default().add_modifier(Modifier::BOLD);

    let mut cells: Vec<(&str, String)> = TEXT_INDICATORS
        .iter()
        .map(|(name, key)| (*name, indicator_text(signal, key)))
        .collect();
    cells.extend(NUMERIC_INDICATORS.iter().map(|(name, key)| {
        (*name, format_number(indicator_value(signal, key), PRICE_DIGITS))
    }));

    // Two indicators per line
    let lines: Vec<Line> = cells
        .chunks(2)
        .map(|pair| {
            let mut spans = Vec::new();
            for (i, (name, text)) in pair.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("   "));
                }
                spans.push(Span::styled(
                    format!("{}: ", name),
                    Style::default().fg(app.theme.muted),
                ));
                spans.push(Span::styled(format!("{:<10}", text), value));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_headlines(frame: &mut Frame, app: &App, area: Rect) {
    let items = headlines(&app.state.signal);

    let title = if items.is_empty() {
        " Headlines Used ".to_string()
    } else {
        format!(
            " Headlines Used ({}/{}) ",
            app.headline_offset + 1,
            items.len()
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::TOP)
        .border_style(Style::default().fg(app.theme.border));

    let lines: Vec<Line> = if items.is_empty() {
        vec![Line::from(Span::styled(
            "No headlines available.",
            Style::default().fg(app.theme.muted),
        ))]
    } else {
        items
            .iter()
            .skip(app.headline_offset)
            .map(|h| {
                Line::from(vec![
                    Span::styled(h.source.clone(), app.theme.source),
                    Span::raw(": "),
                    Span::raw(h.title.clone()),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let signal = &app.state.signal;
    let last_update = app
        .state
        .connectivity
        .last_updated
        .as_ref()
        .map(format_clock)
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let health = health_label(signal);
    let health_tone = if health == "DEGRADED" {
        Tone::Caution
    } else {
        Tone::Positive
    };

    let line = Line::from(vec![
        label(app, "Last update: "),
        Span::raw(last_update),
        label(app, "  Feed time: "),
        Span::raw(format_time(&signal.timestamp)),
        Span::raw("  "),
        Span::styled(format!("[{}]", health), app.theme.tone_style(health_tone)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
