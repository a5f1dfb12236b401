//! Raw value coercion
//!
//! Host columns arrive as JSON numbers or numeric strings. Each cell is
//! coerced to the type of the row field it feeds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Coerce a raw value to a finite number.
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Coerce a raw value to a UTC timestamp.
///
/// Integers (and digit-only strings) are epoch milliseconds. Strings without
/// an offset are read as UTC.
pub fn to_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        let millis = s.parse::<i64>().ok()?;
        return Utc.timestamp_millis_opt(millis).single();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Short rendering of a raw value for error messages.
pub fn describe_value(value: &Value) -> String {
    const MAX: usize = 40;
    let text = match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    };
    if text.chars().count() > MAX {
        let cut: String = text.chars().take(MAX).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!("10")), Some(10.0));
        assert_eq!(to_number(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(to_number(&json!(-3)), Some(-3.0));
        assert_eq!(to_number(&json!("1e3")), Some(1000.0));
        assert_eq!(to_number(&json!("")), None);
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!("NaN")), None);
        assert_eq!(to_number(&json!("inf")), None);
        assert_eq!(to_number(&json!(true)), None);
        assert_eq!(to_number(&Value::Null), None);
    }

    #[test]
    fn test_to_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(to_date(&json!("2024-01-01")), Some(midnight));
        assert_eq!(to_date(&json!("2024-01-01T00:00:00Z")), Some(midnight));
        assert_eq!(to_date(&json!("2024-01-01T02:00:00+02:00")), Some(midnight));
        assert_eq!(to_date(&json!("2024-01-01 00:00:00")), Some(midnight));
        assert_eq!(to_date(&json!("2024-01-01T00:00:00.000")), Some(midnight));
        assert_eq!(to_date(&json!(1704067200000_i64)), Some(midnight));
        assert_eq!(to_date(&json!("1704067200000")), Some(midnight));
    }

    #[test]
    fn test_to_date_rejects() {
        assert_eq!(to_date(&json!("yesterday")), None);
        assert_eq!(to_date(&json!("2024-13-01")), None);
        assert_eq!(to_date(&json!("")), None);
        assert_eq!(to_date(&json!(1.5)), None);
        assert_eq!(to_date(&Value::Null), None);
    }

    #[test]
    fn test_describe_value_truncates() {
        assert_eq!(describe_value(&json!("x")), "\"x\"");
        assert_eq!(describe_value(&Value::Null), "null");
        assert!(describe_value(&json!("a".repeat(100))).ends_with("..."));
    }
}
