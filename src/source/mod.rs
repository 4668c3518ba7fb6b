//! Signal source abstraction.
//!
//! A [`SignalSource`] performs one request for the current signal payload.
//! The HTTP backend is the normal source; [`ChannelSource`] lets outcomes be
//! pushed from elsewhere.

mod channel;
mod error;
mod http;

pub use channel::{ChannelSource, FetchOutcome};
pub use error::FetchError;
pub use http::{endpoint_url, HttpSource, HttpSourceBuilder, DEFAULT_API_BASE, SIGNAL_PATH};

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// How long a single fetch may take before it is abandoned.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(4000);

/// Trait for fetching raw signal payloads.
///
/// Implementations return the payload exactly as received; normalization is
/// the caller's job. Every failure (bad status, transport error, undecodable
/// body) is an `Err`, and callers treat them all as "unreachable".
#[async_trait]
pub trait SignalSource: Send + Sync + Debug {
    /// Perform one request for the current signal.
    async fn fetch(&self) -> Result<Value, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}

/// Fetch from `source`, giving up after `timeout`.
///
/// When the timeout elapses the in-flight request future is dropped, which
/// cancels it, and the fetch reports [`FetchError::Timeout`].
pub async fn fetch_bounded(
    source: &dyn SignalSource,
    timeout: Duration,
) -> Result<Value, FetchError> {
    match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout),
    }
}
