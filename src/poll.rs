//! Poll scheduler: the repeating fetch loop and connectivity tracking.
//!
//! A single background task owns the current [`DashboardState`]. It polls
//! immediately on start, then on a fixed interval, and publishes each new
//! state through a `watch` channel. Signal and connectivity are replaced in
//! one send, so a reader never observes one updated without the other.
//!
//! ```text
//!  INITIAL ──▶ POLLING ──▶ ONLINE  ──┐
//!                 ▲    └─▶ OFFLINE ──┤
//!                 └──── next tick ◀──┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde_json::Value;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::data::{normalize, Signal};
use crate::source::{fetch_bounded, FetchError, SignalSource, REQUEST_TIMEOUT};

/// Time between the start of consecutive polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Where the scheduler is in its cycle.
///
/// Phases are published through a `watch` channel, which keeps only the
/// latest value. When a poll ends after the next tick is already due, its
/// `Online`/`Offline` phase is replaced by `Polling` before observers see it.
/// Read [`Connectivity`] for the outcome of the last completed poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// No poll has started yet.
    Initial,
    /// A request is in flight.
    Polling,
    /// The last poll succeeded.
    Online,
    /// The last poll failed or timed out.
    Offline,
}

/// Connectivity as of the most recent completed poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connectivity {
    /// `None` until the first poll completes.
    pub online: Option<bool>,
    /// When the signal was last replaced by a successful poll.
    pub last_updated: Option<DateTime<Local>>,
}

impl Connectivity {
    pub fn is_online(&self) -> bool {
        self.online == Some(true)
    }

    pub fn is_offline(&self) -> bool {
        self.online == Some(false)
    }
}

/// Everything the dashboard renders, published as one value.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub signal: Arc<Signal>,
    pub connectivity: Connectivity,
    pub phase: PollPhase,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            signal: Arc::new(Signal::default()),
            connectivity: Connectivity::default(),
            phase: PollPhase::Initial,
        }
    }
}

impl DashboardState {
    /// Fold one fetch outcome into the state.
    ///
    /// Success replaces the signal and marks the feed online. Failure only
    /// marks it offline: the last good signal stays on screen.
    pub fn apply(&mut self, outcome: Result<Value, FetchError>, now: DateTime<Local>) {
        match outcome {
            Ok(raw) => {
                self.signal = Arc::new(normalize(raw));
                self.connectivity = Connectivity {
                    online: Some(true),
                    last_updated: Some(now),
                };
                self.phase = PollPhase::Online;
            }
            Err(_) => {
                self.connectivity.online = Some(false);
                self.phase = PollPhase::Offline;
            }
        }
    }
}

/// Timing for the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Handle to a running poll loop.
///
/// Dropping the handle (or calling [`PollHandle::shutdown`]) aborts the loop,
/// cancelling the repeating tick and any request still in flight.
#[derive(Debug)]
pub struct PollHandle {
    receiver: watch::Receiver<DashboardState>,
    description: String,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Start polling `source` on the current tokio runtime.
    pub fn spawn(source: Arc<dyn SignalSource>, config: PollConfig) -> Self {
        let (tx, receiver) = watch::channel(DashboardState::default());
        let refresh = Arc::new(Notify::new());
        let description = source.description().to_string();

        let poller = Poller {
            source,
            config,
            state: tx,
            refresh: refresh.clone(),
        };
        let task = tokio::spawn(poller.run());

        Self {
            receiver,
            description,
            refresh,
            task,
        }
    }

    /// A receiver observing every published state.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.receiver.clone()
    }

    /// Description of the source being polled.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Poll now instead of waiting for the next tick.
    ///
    /// If a poll is already in flight, the refresh runs right after it.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop polling.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Poller {
    source: Arc<dyn SignalSource>,
    config: PollConfig,
    state: watch::Sender<DashboardState>,
    refresh: Arc<Notify>,
}

impl Poller {
    async fn run(self) {
        info!(
            source = self.source.description(),
            interval_ms = self.config.interval.as_millis() as u64,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "signal polling started"
        );

        // The first tick completes immediately.
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.refresh.notified() => {
                    debug!("manual refresh requested");
                    ticker.reset();
                }
            }

            if self.state.is_closed() {
                info!("no dashboard observing state, polling stopped");
                break;
            }

            self.poll_once().await;
        }
    }

    async fn poll_once(&self) {
        self.state.send_modify(|state| state.phase = PollPhase::Polling);

        let outcome = fetch_bounded(self.source.as_ref(), self.config.timeout).await;
        match &outcome {
            Ok(_) => debug!(source = self.source.description(), "signal received"),
            Err(e) => warn!(
                source = self.source.description(),
                error = %e,
                "signal backend unreachable"
            ),
        }

        let now = Local::now();
        self.state.send_modify(|state| state.apply(outcome, now));
    }
}
