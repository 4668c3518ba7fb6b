//! Common UI components shared across panels.
//!
//! This module contains the header bar, connectivity banner, status bar,
//! and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::coerce::display_text;
use crate::data::format::format_clock;

/// Connectivity badge text.
pub fn connectivity_label(online: Option<bool>) -> &'static str {
    match online {
        Some(true) => "LIVE",
        Some(false) => "OFFLINE",
        None => "CONNECTING",
    }
}

/// Render the header bar with engine name and connectivity badge.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let online = app.state.connectivity.online;
    let badge_style = app.theme.connectivity_style(online);

    let mut spans = vec![
        Span::styled(" ● ", badge_style),
        Span::styled(
            display_text(&app.state.signal.name).to_uppercase(),
            app.theme.header,
        ),
        Span::raw(" │ "),
        Span::styled("Decision Console", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            " · Noise-filtered F&O signal stream ",
            Style::default().fg(app.theme.muted),
        ),
        Span::raw("│ "),
        Span::styled(format!("[{}]", connectivity_label(online)), badge_style),
    ];
    if app.is_polling() {
        spans.push(Span::styled(" ⟳", Style::default().fg(app.theme.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Banner text explaining the current connectivity state.
pub fn banner_text(online: Option<bool>, api_base: &str) -> String {
    match online {
        Some(true) => "Live data connected. Signals are streaming from the backend.".to_string(),
        Some(false) => format!(
            "Backend unreachable. Make sure the signal server is running and reachable at {}.",
            api_base
        ),
        None => format!("Connecting to {}...", api_base),
    }
}

/// Render the connectivity banner below the header.
pub fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let online = app.state.connectivity.online;
    let style = app.theme.connectivity_style(online);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(style);

    let paragraph = Paragraph::new(banner_text(online, &app.api_base))
        .style(style.remove_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom.
///
/// Shows: engine status, source, time of last update, available controls.
/// Temporary status messages take over the bar while they last.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let engine = if app.state.connectivity.is_online() {
        "Streaming live signals"
    } else {
        "Awaiting backend connection"
    };

    let updated = app
        .state
        .connectivity
        .last_updated
        .as_ref()
        .map(format_clock)
        .unwrap_or_else(|| "never".to_string());

    let status = format!(
        " Engine status: {} | {} | Updated {} | r:refresh ?:help q:quit",
        engine,
        app.source_description(),
        updated,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Headlines",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Scroll"),
        Line::from("  PgUp/PgDn   Scroll 10"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Poll now"),
        Line::from("  ?           Toggle help"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
