//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`signal`]: Sureness meter, trade levels and universe signals
//! - [`intel`]: Bias, sentiment, indicators, headlines and feed health
//! - [`common`]: Shared components (header, banner, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Banner (common::render_banner)       │
//! ├──────────────────┬───────────────────┤
//! │ signal::render   │ intel::render     │
//! │                  │                   │
//! ├──────────────────┴───────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Help overlay rendered on top
//! ```

pub mod common;
pub mod intel;
pub mod signal;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal width for usable display.
pub const MIN_WIDTH: u16 = 80;
/// Minimum terminal height for usable display.
pub const MIN_HEIGHT: u16 = 20;

/// Draw the whole dashboard for one frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, app, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(3), // Banner
        Constraint::Min(14),   // Panels
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_banner(frame, app, chunks[1]);

    let panels = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    signal::render(frame, app, panels[0]);
    intel::render(frame, app, panels[1]);

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

fn render_too_small(frame: &mut Frame, app: &App, area: Rect) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.caution));
    let height = area.height.min(5);
    let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, height);
    frame.render_widget(paragraph, centered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::DashboardState;
    use chrono::Local;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;
    use tokio::sync::watch;

    fn draw(state: DashboardState, width: u16, height: u16) -> String {
        let (_tx, rx) = watch::channel(state);
        let app = App::with_receiver(rx, "test", "http://10.0.0.5:8000", Theme::dark());

        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_initial_state() {
        let text = draw(DashboardState::default(), 120, 32);
        assert!(text.contains("CONNECTING"));
        assert!(text.contains("SCANNING..."));
        assert!(text.contains("0.0%"));
        assert!(text.contains("No headlines available."));
        assert!(text.contains("DEGRADED"));
    }

    #[test]
    fn test_renders_live_signal() {
        let mut state = DashboardState::default();
        state.apply(
            Ok(json!({
                "sureness": 82.5,
                "call": "BUY CE",
                "action": "STRONG BUY",
                "price": 22150.5,
                "sentiment": 0.31,
                "degraded": false,
                "indicators": {"trend": "UP", "rsi": 61.234},
                "news": [{"source": "Wire", "title": "Markets rally"}],
                "signals": [{"underlying": "BANKNIFTY", "call": "BUY PE", "action": "HOLD"}]
            })),
            Local::now(),
        );

        let text = draw(state, 120, 32);
        assert!(text.contains("LIVE"));
        assert!(text.contains("82.5%"));
        assert!(text.contains("22150.50"));
        assert!(text.contains("BULLISH"));
        assert!(text.contains("61.23"));
        assert!(text.contains("Markets rally"));
        assert!(text.contains("BANKNIFTY"));
        assert!(text.contains("HEALTHY"));
    }

    #[test]
    fn test_offline_banner_names_api_base() {
        let mut state = DashboardState::default();
        state.apply(Err(crate::source::FetchError::Timeout), Local::now());

        let text = draw(state, 120, 32);
        assert!(text.contains("OFFLINE"));
        assert!(text.contains("http://10.0.0.5:8000"));
    }

    #[test]
    fn test_small_terminal_message() {
        let text = draw(DashboardState::default(), 40, 10);
        assert!(text.contains("Terminal too small"));
    }
}
