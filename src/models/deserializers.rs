//! Serde helpers for OMDb's stringly-typed fields.
//!
//! OMDb encodes every value as a string and uses `"N/A"` for missing data,
//! e.g. `"Runtime": "148 min"` or `"imdbRating": "N/A"`.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NOT_AVAILABLE: &str = "N/A";

/// Parse a runtime like `"148 min"` into minutes. `"N/A"` and garbage become 0.
pub fn deserialize_runtime<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(|m| m.min(u32::MAX as u64) as u32)
            .ok_or_else(|| Error::custom("runtime must be a positive integer")),
        Value::String(s) => Ok(parse_runtime(&s)),
        Value::Null => Ok(0),
        _ => Err(Error::custom("runtime must be a string or number")),
    }
}

/// Parse a rating like `"8.8"`. `"N/A"` and garbage become 0.0.
pub fn deserialize_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| Error::custom("invalid rating")),
        Value::String(s) => Ok(parse_rating(&s)),
        Value::Null => Ok(0.0),
        _ => Err(Error::custom("rating must be a string or number")),
    }
}

/// Map OMDb's `"N/A"` placeholder to an empty string
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if s.trim() == NOT_AVAILABLE { Ok(String::new()) } else { Ok(s) }
}

pub(crate) fn parse_runtime(raw: &str) -> u32 {
    raw.split_whitespace().next().and_then(|first| first.parse::<u32>().ok()).unwrap_or(0)
}

pub(crate) fn parse_rating(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite()).unwrap_or(0.0)
}
