//! Lenient field deserializers.
//!
//! Clients send form values loosely typed: a mobile number may arrive as a JSON
//! number, a salary as a numeric string. These helpers cast scalars the way a
//! schema-driven document store would instead of rejecting the whole body.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

fn scalar_to_text<E: Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected a text value, found {other}"))),
    }
}

/// Required text field; numbers and booleans are stringified.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_text::<D::Error>(Value::deserialize(deserializer)?)?
        .ok_or_else(|| D::Error::custom("expected a text value, found null"))
}

/// Optional text field; `null` reads as absent.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_text::<D::Error>(Value::deserialize(deserializer)?)
}

/// Optional number; accepts JSON numbers and numeric strings. An empty string
/// reads as absent.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("number {n} is out of range"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("cast to number failed for value \"{s}\""))),
        other => Err(D::Error::custom(format!("expected a number, found {other}"))),
    }
}

/// Patch text field: absent stays `None` through `#[serde(default)]`, while a
/// present key yields `Some`, with `null` as `Some(None)`.
pub fn patch_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_text(deserializer).map(Some)
}

/// Patch number field; `null` and `""` both read as `Some(None)`.
pub fn patch_number<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_number(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "optional_text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "optional_number")]
        amount: Option<f64>,
    }

    fn loose(json: &str) -> Result<Loose, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "patch_text")]
        label: Option<Option<String>>,
        #[serde(default, deserialize_with = "patch_number")]
        amount: Option<Option<f64>>,
    }

    #[test]
    fn test_patch_distinguishes_absent_from_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.label, None);
        assert_eq!(absent.amount, None);

        let cleared: Patch = serde_json::from_str(r#"{"label":null,"amount":""}"#).unwrap();
        assert_eq!(cleared.label, Some(None));
        assert_eq!(cleared.amount, Some(None));

        let set: Patch = serde_json::from_str(r#"{"label":7,"amount":"12.5"}"#).unwrap();
        assert_eq!(set.label, Some(Some("7".to_string())));
        assert_eq!(set.amount, Some(Some(12.5)));
    }

    #[test]
    fn test_text_accepts_scalars() {
        assert_eq!(loose(r#"{"label":"abc"}"#).unwrap().label.as_deref(), Some("abc"));
        assert_eq!(loose(r#"{"label":5551234}"#).unwrap().label.as_deref(), Some("5551234"));
        assert_eq!(loose(r#"{"label":null}"#).unwrap().label, None);
        assert_eq!(loose("{}").unwrap().label, None);
        assert!(loose(r#"{"label":["a"]}"#).is_err());
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        assert_eq!(loose(r#"{"amount":50000}"#).unwrap().amount, Some(50000.0));
        assert_eq!(loose(r#"{"amount":" 1250.5 "}"#).unwrap().amount, Some(1250.5));
        assert_eq!(loose(r#"{"amount":""}"#).unwrap().amount, None);
        assert!(loose(r#"{"amount":"lots"}"#).is_err());
        assert!(loose(r#"{"amount":true}"#).is_err());
    }
}
