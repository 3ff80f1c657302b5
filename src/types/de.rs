//! Lenient field deserializers
//!
//! The server emits loosely typed JSON: flags come as booleans, numbers or
//! strings with an optional `@` prefix, prices and ids as numbers or strings.
//! Everything is normalized here so the rest of the crate sees plain types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalize a boolean-like value: `true`, `1`, `"true"`, `"@true"`, `"yes"`
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(flag_value).unwrap_or(false))
}

pub(crate) fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            let s = s.strip_prefix('@').unwrap_or(s);
            matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
        }
        _ => false,
    }
}

/// A numeric or numeric-string amount; anything else is 0
pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(price_value).unwrap_or(0.0))
}

pub(crate) fn price_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// A whole number sent as a number or a string; anything else is 0
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or(0))
}

/// A page number or counter; negatives clamp to 0
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = int(deserializer)?;
    Ok(n.clamp(0, u32::MAX as i64) as u32)
}

/// Text that might have been sent as a number; null is empty
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

/// Optional text; null and blank strings are `None`
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_value))
}

pub(crate) fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A list that may be null or missing
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flag_accepts_every_observed_form() {
        for truthy in [json!(true), json!("true"), json!("@true"), json!(" TRUE "), json!(1), json!("1")] {
            assert!(flag_value(&truthy), "{} should be true", truthy);
        }
        for falsy in [json!(false), json!("false"), json!("@false"), json!(""), json!(0), json!(null), json!({})] {
            assert!(!flag_value(&falsy), "{} should be false", falsy);
        }
    }

    #[test]
    fn test_price_never_produces_nan() {
        assert_eq!(price_value(&json!(100)), 100.0);
        assert_eq!(price_value(&json!("49.90")), 49.9);
        assert_eq!(price_value(&json!("12,50")), 0.0);
        assert_eq!(price_value(&json!("abc")), 0.0);
        assert_eq!(price_value(&json!("NaN")), 0.0);
        assert_eq!(price_value(&json!(null)), 0.0);
        assert_eq!(price_value(&json!([1, 2])), 0.0);
    }
}
