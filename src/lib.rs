//! # signal-console
//!
//! A terminal dashboard and library for watching a live trading-signal feed.
//!
//! The dashboard polls a signal backend over HTTP, merges whatever comes back
//! into a well-formed [`Signal`], derives display labels from it, and tracks
//! whether the backend is reachable. The last good signal stays on screen
//! while the backend is down.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  poll   │───▶│   app    │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (task)  │    │ (state)  │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └────┬────┘    └─────────┘ │
//! │       │                              │                      │
//! │       ▼                              ▼                      │
//! │  ┌─────────┐                    ┌──────────┐                │
//! │  │ source  │◀── HttpSource      │   data   │                │
//! │  │ (fetch) │    ChannelSource   │ (derive) │                │
//! │  └─────────┘                    └──────────┘                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`SignalSource`] trait, the HTTP fetcher and a
//!   channel-backed source
//! - **[`poll`]**: The repeating poll task and connectivity tracking
//! - **[`data`]**: The canonical [`Signal`], normalization, derived labels
//!   and formatting
//! - **[`app`]**: Application state and interaction logic
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the backend on this machine
//! signal-console
//!
//! # Poll a backend elsewhere
//! signal-console --api-base http://10.0.0.5:8000
//!
//! # Print the current signal once and exit
//! signal-console --once
//! ```
//!
//! ### As a library with the HTTP backend
//!
//! ```no_run
//! use std::sync::Arc;
//! use signal_console::{App, HttpSource, PollConfig, PollHandle, Theme};
//!
//! # tokio_test::block_on(async {
//! let source = HttpSource::new("http://127.0.0.1:8000").unwrap();
//! let poller = PollHandle::spawn(Arc::new(source), PollConfig::default());
//! let app = App::new(poller, "http://127.0.0.1:8000", Theme::dark());
//! # });
//! ```
//!
//! ### Normalizing a payload
//!
//! ```
//! use serde_json::json;
//! use signal_console::normalize;
//!
//! let signal = normalize(json!({"sureness": "72.5", "news": "not a list"}));
//! assert_eq!(signal.sureness, 72.5);
//! assert!(signal.news.is_empty());
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod logging;
pub mod poll;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{normalize, Bias, DisplaySignal, Headline, Signal, Tone};
pub use poll::{Connectivity, DashboardState, PollConfig, PollHandle, PollPhase};
pub use source::{fetch_bounded, ChannelSource, FetchError, HttpSource, SignalSource};
pub use ui::Theme;
