//! Reconcile an untrusted backend payload into a complete [`Signal`].
//!
//! Normalization starts from [`Signal::default()`], overlays every field the
//! payload carries, then repairs the handful of fields the dashboard relies
//! on structurally. It never fails: malformed fields fall back to their
//! defaults and anything unrecognised is carried along untouched.

use serde_json::{Map, Value};

use super::coerce::number_or_zero;
use super::signal::Signal;

/// Normalize a raw JSON payload into a well-formed [`Signal`].
///
/// A payload that is not a JSON object normalizes to the default signal.
pub fn normalize(raw: Value) -> Signal {
    let Value::Object(fields) = raw else {
        return Signal::default();
    };
    overlay(Signal::default(), fields)
}

fn overlay(mut signal: Signal, fields: Map<String, Value>) -> Signal {
    // Missing sureness coerces to 0 rather than keeping the default.
    signal.sureness = fields.get("sureness").map_or(0.0, number_or_zero);

    for (key, value) in fields {
        match key.as_str() {
            "sureness" => {}
            "news" => signal.news = into_sequence(value),
            "signals" => signal.signals = into_sequence(value),
            "indicators" => signal.indicators = into_mapping(value),
            _ => match signal.passthrough_field_mut(&key) {
                Some(field) => *field = value,
                None => {
                    signal.extra.insert(key, value);
                }
            },
        }
    }

    signal
}

fn into_sequence(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn into_mapping(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::sureness_clamped;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(normalize(json!({})), Signal::default());
    }

    #[test]
    fn test_non_object_is_default() {
        for raw in [json!(null), json!([1, 2]), json!("signal"), json!(7)] {
            assert_eq!(normalize(raw), Signal::default());
        }
    }

    #[test]
    fn test_overlays_present_fields() {
        let signal = normalize(json!({
            "name": "Alpha Engine",
            "sureness": 72.4,
            "call": "BUY NIFTY CE",
            "action": "STRONG BUY",
            "price": 22450.5,
            "degraded": false
        }));

        assert_eq!(signal.name, json!("Alpha Engine"));
        assert_eq!(signal.sureness, 72.4);
        assert_eq!(signal.call, json!("BUY NIFTY CE"));
        assert_eq!(signal.action, json!("STRONG BUY"));
        assert_eq!(signal.price, json!(22450.5));
        assert_eq!(signal.degraded, json!(false));
        // Untouched fields keep their defaults
        assert_eq!(signal.reason, json!("Engine warming up"));
        assert!(signal.target.is_null());
    }

    #[test]
    fn test_sureness_coercion() {
        assert_eq!(normalize(json!({"sureness": "88.5"})).sureness, 88.5);
        assert_eq!(normalize(json!({"sureness": "high"})).sureness, 0.0);
        assert_eq!(normalize(json!({"sureness": null})).sureness, 0.0);
        assert_eq!(normalize(json!({"sureness": {"v": 1}})).sureness, 0.0);
        assert_eq!(normalize(json!({"name": "x"})).sureness, 0.0);
    }

    #[test]
    fn test_sureness_always_clamps_into_range() {
        let cases = [
            json!({"sureness": "250"}),
            json!({"sureness": -40}),
            json!({"sureness": 1e9}),
            json!({"sureness": "-Infinity"}),
            json!({"sureness": "not a number"}),
            json!({}),
        ];
        for raw in cases {
            let clamped = sureness_clamped(&normalize(raw.clone()));
            assert!((0.0..=100.0).contains(&clamped), "{raw} -> {clamped}");
        }
    }

    #[test]
    fn test_malformed_collections_are_replaced() {
        let signal = normalize(json!({
            "news": "not-an-array",
            "signals": {"underlying": "NIFTY"},
            "indicators": [1, 2, 3]
        }));
        assert!(signal.news.is_empty());
        assert!(signal.signals.is_empty());
        assert!(signal.indicators.is_empty());

        let nulls = normalize(json!({"news": null, "signals": null, "indicators": null}));
        assert_eq!(nulls, Signal::default());
    }

    #[test]
    fn test_well_formed_collections_pass_through() {
        let signal = normalize(json!({
            "news": [{"source": "ET", "title": "Banks rally"}],
            "signals": [{"underlying": "BANKNIFTY", "call": "HOLD", "action": "HOLD"}],
            "indicators": {"trend": "UP", "rsi": 61.2}
        }));
        assert_eq!(signal.news.len(), 1);
        assert_eq!(signal.signals[0]["underlying"], json!("BANKNIFTY"));
        assert_eq!(signal.indicators["rsi"], json!(61.2));
    }

    #[test]
    fn test_passthrough_is_not_type_checked() {
        let signal = normalize(json!({"price": "n/a", "action": 3, "bias": null}));
        assert_eq!(signal.price, json!("n/a"));
        assert_eq!(signal.action, json!(3));
        assert!(signal.bias.is_null());
    }

    #[test]
    fn test_unknown_fields_are_retained() {
        let signal = normalize(json!({"engine_version": "2.1", "sureness": 10}));
        assert_eq!(signal.extra.get("engine_version"), Some(&json!("2.1")));
        assert_eq!(signal.sureness, 10.0);
    }
}
