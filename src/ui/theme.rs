//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Tone;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights, the signal call and the gauge.
    pub highlight: Color,
    /// Color for positive values (strong actions, bullish, targets).
    pub positive: Color,
    /// Color for negative values (bearish, stop losses).
    pub negative: Color,
    /// Color for caution (HOLD, neutral, degraded engine).
    pub caution: Color,
    /// Color for secondary text.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles and field labels.
    pub header: Style,
    /// Style for the headline source.
    pub source: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            positive: Color::Green,
            negative: Color::Red,
            caution: Color::Yellow,
            muted: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            source: Style::default().fg(Color::Cyan),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            positive: Color::Green,
            negative: Color::Red,
            caution: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            source: Style::default().fg(Color::Blue),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a display tone
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Positive => Style::default().fg(self.positive).add_modifier(Modifier::BOLD),
            Tone::Negative => Style::default().fg(self.negative).add_modifier(Modifier::BOLD),
            Tone::Caution => Style::default().fg(self.caution),
            Tone::Accent => Style::default().fg(self.highlight).add_modifier(Modifier::BOLD),
            Tone::Muted => Style::default().fg(self.muted),
        }
    }

    /// Style for the connectivity badge and banner.
    ///
    /// `None` means no poll has completed yet.
    pub fn connectivity_style(&self, online: Option<bool>) -> Style {
        match online {
            Some(true) => Style::default().fg(self.positive).add_modifier(Modifier::BOLD),
            Some(false) => Style::default().fg(self.negative).add_modifier(Modifier::BOLD),
            None => Style::default().fg(self.caution),
        }
    }
}
