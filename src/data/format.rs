//! Display formatting for numeric and time fields.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde_json::Value;

use super::coerce::to_number;

/// Shown in place of any value that cannot be displayed.
pub const PLACEHOLDER: &str = "--";

/// Digits used for prices, percentages and indicator values.
pub const PRICE_DIGITS: usize = 2;

/// Digits used for the raw sentiment score.
pub const SENTIMENT_DIGITS: usize = 3;

/// Format a JSON value as a fixed-precision number.
///
/// `null` and anything that does not coerce to a number format as [`PLACEHOLDER`].
pub fn format_number(value: &Value, digits: usize) -> String {
    if value.is_null() {
        return PLACEHOLDER.to_string();
    }
    format_float(to_number(value), digits)
}

/// Magnitude from which numbers are shown in exponent notation.
const EXPONENT_FROM: f64 = 1e21;

/// Format an already-numeric value with fixed precision.
///
/// Magnitudes of `1e21` and above use exponent notation (`1.5e+22`).
pub fn format_float(n: f64, digits: usize) -> String {
    if n.is_nan() {
        PLACEHOLDER.to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n.abs() >= EXPONENT_FROM {
        format!("{:e}", n).replacen('e', "e+", 1)
    } else {
        format!("{:.*}", digits, n)
    }
}

/// Format a feed timestamp as local wall-clock time.
///
/// Accepts RFC 3339 strings, naive ISO 8601 strings (read as local time) and
/// epoch milliseconds. Anything else formats as [`PLACEHOLDER`].
pub fn format_time(value: &Value) -> String {
    parse_timestamp(value)
        .map(|t| format_clock(&t))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Format a local time as `HH:MM:SS`.
pub fn format_clock(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Local>> {
    match value {
        Value::String(s) if !s.is_empty() => {
            if let Ok(t) = DateTime::parse_from_rfc3339(s) {
                return Some(t.with_timezone(&Local));
            }
            let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                .ok()?;
            Local.from_local_datetime(&naive).earliest()
        }
        Value::Number(n) => {
            let millis = n.as_f64()?;
            if !millis.is_finite() || millis == 0.0 {
                return None;
            }
            DateTime::from_timestamp_millis(millis as i64).map(|t| t.with_timezone(&Local))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_format_number_precision() {
        assert_eq!(format_number(&json!(22450.456), 2), "22450.46");
        assert_eq!(format_number(&json!(0.1234), SENTIMENT_DIGITS), "0.123");
        assert_eq!(format_number(&json!("17.5"), 2), "17.50");
        assert_eq!(format_number(&json!(0), 2), "0.00");
    }

    #[test]
    fn test_format_number_placeholders() {
        assert_eq!(format_number(&json!(null), 2), "--");
        assert_eq!(format_number(&json!("n/a"), 2), "--");
        assert_eq!(format_number(&json!({"v": 1}), 2), "--");
        assert_eq!(format_float(f64::NAN, 2), "--");
    }

    #[test]
    fn test_format_float_huge_uses_exponent() {
        assert_eq!(format_float(1e21, 2), "1e+21");
        assert_eq!(format_float(-1.5e22, 2), "-1.5e+22");
        assert_eq!(format_number(&json!(2.5e25), PRICE_DIGITS), "2.5e+25");
        assert_eq!(format_float(9.99e20, 0), "999000000000000000000");
    }

    #[test]
    fn test_format_float_infinite() {
        assert_eq!(format_float(f64::INFINITY, 2), "Infinity");
        assert_eq!(format_float(f64::NEG_INFINITY, 2), "-Infinity");
    }

    #[test]
    fn test_format_time_rfc3339() {
        let utc = Utc::now();
        let expected = format_clock(&utc.with_timezone(&Local));
        assert_eq!(format_time(&json!(utc.to_rfc3339())), expected);
    }

    #[test]
    fn test_format_time_naive_and_epoch() {
        assert_eq!(format_time(&json!("2025-03-14T09:15:30.250")), "09:15:30");

        let millis = 1_700_000_000_000_i64;
        let expected = format_clock(
            &DateTime::from_timestamp_millis(millis).unwrap().with_timezone(&Local),
        );
        assert_eq!(format_time(&json!(millis)), expected);
    }

    #[test]
    fn test_format_time_invalid() {
        assert_eq!(format_time(&json!(null)), "--");
        assert_eq!(format_time(&json!("")), "--");
        assert_eq!(format_time(&json!("yesterday")), "--");
        assert_eq!(format_time(&json!(true)), "--");
    }
}
