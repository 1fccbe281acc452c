//! Result payload extraction.
//!
//! Backends have shipped the record list under several field names over
//! time. [`RESULT_ALIASES`] lists them in priority order.

use serde_json::Value;

/// Candidate keys for the record list, checked in order.
pub const RESULT_ALIASES: [&str; 6] = [
    "content",
    "data",
    "businesses",
    "people",
    "prospects",
    "results",
];

/// Key carrying the total/pagination count.
pub const TOTAL_KEY: &str = "total";

/// Records and count pulled out of a `done` frame or a buffered response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPayload {
    pub records: Vec<Value>,
    pub total: Option<u64>,
}

impl ResultPayload {
    /// Build from a JSON body. Returns `None` unless `value` is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let records = select_records(value).cloned().unwrap_or_default();
        let total = object.get(TOTAL_KEY).and_then(Value::as_u64);
        Some(Self { records, total })
    }

    /// Parse a `done` payload.
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(data)?;
        Ok(Self::from_value(&value).unwrap_or_default())
    }
}

/// The alias that wins for this payload, if any.
///
/// The first alias that is present and not `null` wins, whatever its value.
pub fn matched_alias(value: &Value) -> Option<&'static str> {
    RESULT_ALIASES
        .iter()
        .copied()
        .find(|key| value.get(*key).is_some_and(|v| !v.is_null()))
}

/// The record list under the winning alias.
///
/// `None` when no alias matched or the winner does not hold an array.
pub fn select_records(value: &Value) -> Option<&Vec<Value>> {
    matched_alias(value).and_then(|key| value.get(key)).and_then(Value::as_array)
}
