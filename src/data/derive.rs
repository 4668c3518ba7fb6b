//! Labels and display classes derived from a normalized [`Signal`].
//!
//! Everything here is a pure function of the signal and is recomputed on
//! every render. Nothing is cached or written back into the model.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{json, Value};

use super::coerce::{display_text, is_truthy, number_or_zero};
use super::signal::{Headline, Signal, DEFAULT_POLICY};

/// Sentiment magnitude beyond which the market is considered directional.
pub const SENTIMENT_THRESHOLD: f64 = 0.15;

/// Directional market lean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    /// Classify a sentiment score using the fixed symmetric threshold.
    pub fn from_sentiment(sentiment: f64) -> Self {
        if sentiment > SENTIMENT_THRESHOLD {
            Bias::Bullish
        } else if sentiment < -SENTIMENT_THRESHOLD {
            Bias::Bearish
        } else {
            Bias::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bias::Bullish => "BULLISH",
            Bias::Bearish => "BEARISH",
            Bias::Neutral => "NEUTRAL",
        }
    }
}

/// Display category for a field.
///
/// The theme decides what each tone looks like; the derivations only decide
/// which tone applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Caution,
    Accent,
    Muted,
}

/// Sureness clamped into `[0, 100]`.
pub fn sureness_clamped(signal: &Signal) -> f64 {
    let sureness = if signal.sureness.is_nan() {
        0.0
    } else {
        signal.sureness
    };
    sureness.clamp(0.0, 100.0)
}

/// Numeric sentiment, `0` when missing or non-numeric.
pub fn sentiment_value(signal: &Signal) -> f64 {
    number_or_zero(&signal.sentiment)
}

/// The bias label to display.
///
/// An explicit upstream `bias` wins; otherwise it is derived from sentiment.
pub fn bias_label(signal: &Signal) -> Cow<'_, str> {
    match &signal.bias {
        Value::String(s) if !s.is_empty() => Cow::Borrowed(s.as_str()),
        other if is_truthy(other) => Cow::Owned(display_text(other)),
        _ => Cow::Borrowed(Bias::from_sentiment(sentiment_value(signal)).label()),
    }
}

/// Sentiment classification, always derived from the numeric sentiment.
///
/// This may disagree with [`bias_label`] when upstream supplies `bias`.
pub fn sentiment_label(signal: &Signal) -> Bias {
    Bias::from_sentiment(sentiment_value(signal))
}

fn is_bearish(signal: &Signal) -> bool {
    bias_label(signal) == Bias::Bearish.label()
}

/// Tone for an action string.
pub fn action_tone(action: &Value) -> Tone {
    match action.as_str() {
        Some("STRONG BUY") | Some("STRONG SELL") => Tone::Positive,
        Some("BUY") | Some("SELL") => Tone::Accent,
        Some("HOLD") => Tone::Caution,
        _ => Tone::Muted,
    }
}

/// Tone for the top-level signal's action.
pub fn action_class(signal: &Signal) -> Tone {
    action_tone(&signal.action)
}

/// Tone for the sentiment/bias readout.
pub fn sentiment_class(signal: &Signal) -> Tone {
    match sentiment_label(signal) {
        Bias::Bullish => Tone::Positive,
        Bias::Bearish => Tone::Negative,
        Bias::Neutral => Tone::Caution,
    }
}

/// Tone for the target price: a target is good news unless the bias is bearish.
pub fn target_class(signal: &Signal) -> Tone {
    if is_bearish(signal) {
        Tone::Negative
    } else {
        Tone::Positive
    }
}

/// Tone for the stop loss, the inverse of [`target_class`].
pub fn stop_loss_class(signal: &Signal) -> Tone {
    if is_bearish(signal) {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

/// One row of the per-instrument signal list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplaySignal<'a> {
    /// An entry from `signal.signals`.
    Instrument(&'a Value),
    /// The top-level signal standing in for an empty list.
    Overall(&'a Signal),
}

impl DisplaySignal<'_> {
    fn field(&self, key: &str) -> Value {
        match self {
            DisplaySignal::Instrument(value) => value.get(key).cloned().unwrap_or(Value::Null),
            DisplaySignal::Overall(signal) => match key {
                "call" => signal.call.clone(),
                "action" => signal.action.clone(),
                other => signal.extra.get(other).cloned().unwrap_or(Value::Null),
            },
        }
    }

    /// Instrument name, `INDEX` when not given.
    pub fn underlying(&self) -> String {
        let underlying = self.field("underlying");
        if is_truthy(&underlying) {
            display_text(&underlying)
        } else {
            "INDEX".to_string()
        }
    }

    pub fn call(&self) -> String {
        display_text(&self.field("call"))
    }

    pub fn action(&self) -> Value {
        self.field("action")
    }
}

/// The per-instrument signals to show, falling back to the signal itself.
pub fn display_signals(signal: &Signal) -> Vec<DisplaySignal<'_>> {
    if signal.signals.is_empty() {
        vec![DisplaySignal::Overall(signal)]
    } else {
        signal.signals.iter().map(DisplaySignal::Instrument).collect()
    }
}

/// Headline records from the `news` sequence.
pub fn headlines(signal: &Signal) -> Vec<Headline> {
    signal.news.iter().map(Headline::from_value).collect()
}

/// Trading policy, `strict` when not given.
pub fn policy_label(signal: &Signal) -> String {
    if is_truthy(&signal.policy) {
        display_text(&signal.policy)
    } else {
        DEFAULT_POLICY.to_string()
    }
}

/// Engine health badge derived from the upstream `degraded` flag.
pub fn health_label(signal: &Signal) -> &'static str {
    if is_truthy(&signal.degraded) {
        "DEGRADED"
    } else {
        "HEALTHY"
    }
}

/// Text indicator (e.g. `trend`, `momentum`), `--` when absent.
pub fn indicator_text(signal: &Signal, key: &str) -> String {
    match signal.indicators.get(key) {
        Some(value) if is_truthy(value) => display_text(value),
        _ => super::format::PLACEHOLDER.to_string(),
    }
}

/// Raw indicator value, `null` when absent.
pub fn indicator_value<'a>(signal: &'a Signal, key: &str) -> &'a Value {
    signal.indicators.get(key).unwrap_or(&Value::Null)
}

/// Every derived label for `signal`, as JSON.
///
/// Used by one-shot mode to print what the dashboard would show.
pub fn derived_summary(signal: &Signal) -> Value {
    let universe: Vec<Value> = display_signals(signal)
        .iter()
        .map(|item| {
            let action = item.action();
            json!({
                "underlying": item.underlying(),
                "call": item.call(),
                "action": action,
                "action_class": action_tone(&action),
            })
        })
        .collect();

    json!({
        "sureness": sureness_clamped(signal),
        "sentiment_value": sentiment_value(signal),
        "bias": bias_label(signal),
        "sentiment": sentiment_label(signal).label(),
        "action_class": action_class(signal),
        "sentiment_class": sentiment_class(signal),
        "target_class": target_class(signal),
        "stop_loss_class": stop_loss_class(signal),
        "policy": policy_label(signal),
        "health": health_label(signal),
        "feed_time": super::format::format_time(&signal.timestamp),
        "universe": universe,
    })
}
