//! Lenient field decoders for payloads produced by loosely typed clients.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a JSON string, number, or null and yields its text form (`""` for null).
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}
