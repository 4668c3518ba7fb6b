//! Channel-based signal source.
//!
//! Serves fetch outcomes pushed through a tokio mpsc channel. Useful for
//! driving the dashboard from something other than the HTTP backend (a
//! replayed feed, a bridge from another transport, tests).

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, Mutex};

use super::{FetchError, SignalSource};

/// Outcome delivered to a [`ChannelSource`] for one fetch.
pub type FetchOutcome = Result<Value, FetchError>;

/// A source whose fetches are answered by values sent through a channel.
///
/// Each fetch waits for the next outcome. A fetch with nothing queued stays
/// pending, which lets the poll timeout apply exactly as for a slow backend.
///
/// # Example
///
/// ```
/// use signal_console::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("replay");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: Mutex<mpsc::Receiver<FetchOutcome>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of an mpsc channel
    /// * `source_description` - Where outcomes come from (shown in the status bar)
    pub fn new(receiver: mpsc::Receiver<FetchOutcome>, source_description: &str) -> Self {
        Self {
            receiver: Mutex::new(receiver),
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for feeding a ChannelSource.
    pub fn create(source_description: &str) -> (mpsc::Sender<FetchOutcome>, Self) {
        let (tx, rx) = mpsc::channel(16);
        (tx, Self::new(rx, source_description))
    }
}

#[async_trait]
impl SignalSource for ChannelSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let mut receiver = self.receiver.lock().await;
        match receiver.recv().await {
            Some(outcome) => outcome,
            None => Err(FetchError::Transport("channel closed".to_string())),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
