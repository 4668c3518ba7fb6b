//! The canonical signal model.
//!
//! A [`Signal`] always has every field the dashboard renders. Fields the
//! backend is allowed to shape freely are kept as raw JSON [`Value`]s; the
//! few fields the dashboard depends on structurally (`sureness`, `news`,
//! `signals`, `indicators`) are typed and guaranteed by the normalizer.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Engine name shown before the backend has identified itself.
pub const DEFAULT_ENGINE_NAME: &str = "GF SmartSignals";

/// Trading policy assumed when none is reported.
pub const DEFAULT_POLICY: &str = "strict";

/// A complete trading signal snapshot as displayed by the dashboard.
///
/// The current signal is replaced wholesale on every successful poll; nothing
/// mutates it field by field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub name: Value,
    pub policy: Value,
    /// Confidence score. Stored as received (after numeric coercion); clamp
    /// with [`crate::data::derive::sureness_clamped`] before display.
    pub sureness: f64,
    pub call: Value,
    pub action: Value,
    pub reason: Value,
    pub price: Value,
    pub target: Value,
    pub stop_loss: Value,
    pub sentiment: Value,
    pub bias: Value,
    pub earning_potential: Value,
    pub volatility: Value,
    pub degraded: Value,
    pub timestamp: Value,
    pub indicators: Map<String, Value>,
    pub news: Vec<Value>,
    pub signals: Vec<Value>,
    /// Upstream fields the dashboard does not know about, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Signal {
    /// The safe state: what the dashboard shows before the first successful
    /// poll, and the baseline for any field missing from a response.
    fn default() -> Self {
        Self {
            name: json!(DEFAULT_ENGINE_NAME),
            policy: json!(DEFAULT_POLICY),
            sureness: 0.0,
            call: json!("SCANNING..."),
            action: json!("WAIT"),
            reason: json!("Engine warming up"),
            price: Value::Null,
            target: Value::Null,
            stop_loss: Value::Null,
            sentiment: json!(0),
            bias: Value::Null,
            earning_potential: json!(0),
            volatility: Value::Null,
            degraded: json!(true),
            timestamp: Value::Null,
            indicators: Map::new(),
            news: Vec::new(),
            signals: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Signal {
    /// The field a known key maps to, if the key is part of the canonical shape.
    ///
    /// Only the untyped pass-through fields are reachable here; the typed
    /// fields are handled by the normalizer directly.
    pub(crate) fn passthrough_field_mut(&mut self, key: &str) -> Option<&mut Value> {
        let field = match key {
            "name" => &mut self.name,
            "policy" => &mut self.policy,
            "call" => &mut self.call,
            "action" => &mut self.action,
            "reason" => &mut self.reason,
            "price" => &mut self.price,
            "target" => &mut self.target,
            "stop_loss" => &mut self.stop_loss,
            "sentiment" => &mut self.sentiment,
            "bias" => &mut self.bias,
            "earning_potential" => &mut self.earning_potential,
            "volatility" => &mut self.volatility,
            "degraded" => &mut self.degraded,
            "timestamp" => &mut self.timestamp,
            _ => return None,
        };
        Some(field)
    }
}

/// A headline record from the `news` sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub source: String,
    pub title: String,
}

impl Headline {
    /// Read a headline out of an arbitrary news entry.
    ///
    /// A bare string is treated as a title with no source.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                source: map.get("source").map(super::coerce::display_text).unwrap_or_default(),
                title: map.get("title").map(super::coerce::display_text).unwrap_or_default(),
            },
            other => Self {
                source: String::new(),
                title: super::coerce::display_text(other),
            },
        }
    }
}
