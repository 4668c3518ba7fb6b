//! Lenient coercions over untrusted JSON values.
//!
//! The backend is free to send numbers as strings, booleans where numbers are
//! expected, or nothing at all. These helpers turn such values into something
//! the dashboard can display without ever failing.

use serde_json::Value;

/// Coerce a JSON value to a number the way a loosely-typed feed expects.
///
/// - `null`, `false` and blank strings are `0`, `true` is `1`
/// - numeric strings parse (surrounding whitespace ignored, `0x`/`0o`/`0b` prefixes allowed)
/// - a single-element array coerces its element, an empty array is `0`
/// - anything else is `NaN`
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] if !single.is_array() && !single.is_object() => to_number(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Coerce to a number, substituting `0` for anything non-numeric.
pub fn number_or_zero(value: &Value) -> f64 {
    let n = to_number(value);
    if n.is_nan() {
        0.0
    } else {
        n
    }
}

fn parse_numeric_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }

    // Rust accepts "inf"/"nan" spellings that a feed value should not.
    let lower = s.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Whether a value counts as "present" for display fallbacks.
///
/// `null`, `false`, `0`, `NaN` and the empty string are absent; everything
/// else, including empty arrays and objects, is present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar value as display text.
///
/// Booleans, `null` and objects render as nothing; arrays render their
/// elements back to back.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(display_text).collect(),
        Value::Null | Value::Bool(_) | Value::Object(_) => String::new(),
    }
}
