//! Signal model, normalization and display derivations.
//!
//! This module turns whatever the backend sent into a complete, displayable
//! [`Signal`], and computes the labels the UI shows from it.
//!
//! ## Submodules
//!
//! - [`signal`]: The canonical [`Signal`] shape and its safe default
//! - [`normalize`]: Merging an untrusted payload into the canonical shape
//! - [`derive`]: Bias/sentiment labels, display tones, per-instrument rows
//! - [`format`]: Fixed-precision number and timestamp formatting
//! - [`coerce`]: Lenient JSON value coercions shared by the above
//!
//! ## Data Flow
//!
//! ```text
//! raw JSON (from the backend)
//!        │
//!        ▼
//! normalize()  ──▶ Signal (always well-formed)
//!                     │
//!                     ├──▶ derive::*  (labels, tones, rows)
//!                     └──▶ format::*  (display strings)
//! ```

pub mod coerce;
pub mod derive;
pub mod format;
pub mod normalize;
pub mod signal;

pub use derive::{Bias, DisplaySignal, Tone};
pub use normalize::normalize;
pub use signal::{Headline, Signal};
