//! Application state and interaction logic.

use std::time::{Duration, Instant};

use tokio::sync::watch;

use crate::data::derive::headlines;
use crate::poll::{DashboardState, PollHandle, PollPhase};
use crate::ui::Theme;

/// How long a status bar message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// The app only reads dashboard state; the poll loop is its sole writer.
/// Owning the [`PollHandle`] ties polling to the dashboard session: when the
/// app is dropped, polling stops.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Polling
    poller: Option<PollHandle>,
    receiver: watch::Receiver<DashboardState>,
    pub state: DashboardState,
    source_description: String,
    pub api_base: String,

    // Navigation state
    pub headline_offset: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create an app driven by a running poll loop.
    pub fn new(poller: PollHandle, api_base: impl Into<String>, theme: Theme) -> Self {
        let receiver = poller.subscribe();
        let description = poller.description().to_string();
        let mut app = Self::with_receiver(receiver, description, api_base, theme);
        app.poller = Some(poller);
        app
    }

    /// Create an app observing a state channel it does not own.
    ///
    /// Manual refresh is unavailable in this mode.
    pub fn with_receiver(
        mut receiver: watch::Receiver<DashboardState>,
        source_description: impl Into<String>,
        api_base: impl Into<String>,
        theme: Theme,
    ) -> Self {
        let state = receiver.borrow_and_update().clone();
        Self {
            running: true,
            show_help: false,
            poller: None,
            receiver,
            state,
            source_description: source_description.into(),
            api_base: api_base.into(),
            headline_offset: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the signal source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Pick up the latest published state.
    ///
    /// Returns true if the state changed since the last call.
    pub fn sync_state(&mut self) -> bool {
        if !self.receiver.has_changed().unwrap_or(false) {
            return false;
        }
        self.state = self.receiver.borrow_and_update().clone();

        // Clamp scroll position to the new headline list
        let max = self.headline_count().saturating_sub(1);
        self.headline_offset = self.headline_offset.min(max);
        true
    }

    /// Whether the feed has been reached at least once in this session.
    pub fn is_connecting(&self) -> bool {
        self.state.connectivity.online.is_none()
    }

    /// Whether a request is currently in flight.
    pub fn is_polling(&self) -> bool {
        self.state.phase == PollPhase::Polling
    }

    /// Ask the poll loop to fetch now.
    pub fn refresh(&mut self) {
        match &self.poller {
            Some(poller) => {
                poller.refresh();
                self.set_status_message("Refreshing...".to_string());
            }
            None => self.set_status_message("Refresh unavailable for this source".to_string()),
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    fn headline_count(&self) -> usize {
        headlines(&self.state.signal).len()
    }

    /// Scroll headlines down by one.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Scroll headlines up by one.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Scroll headlines down by n.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.headline_count().saturating_sub(1);
        self.headline_offset = (self.headline_offset + n).min(max);
    }

    /// Scroll headlines up by n.
    pub fn select_prev_n(&mut self, n: usize) {
        self.headline_offset = self.headline_offset.saturating_sub(n);
    }

    /// Jump to the first headline.
    pub fn select_first(&mut self) {
        self.headline_offset = 0;
    }

    /// Jump to the last headline.
    pub fn select_last(&mut self) {
        self.headline_offset = self.headline_count().saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
