//! Filter serialization for query strings and cache keys.

use serde::Serialize;
use serde_json::Value;

/// Flattens a filter into `(field, value)` pairs sorted by field name.
///
/// Absent fields (`None`, serialized as `null` or skipped) never appear.
/// `0`, `false` and empty strings are kept. Non-object input yields nothing.
pub(crate) fn scalar_fields<F: Serialize + ?Sized>(filter: &F) -> Vec<(String, Value)> {
    let Ok(Value::Object(map)) = serde_json::to_value(filter) else {
        return Vec::new();
    };
    let mut fields: Vec<(String, Value)> = map
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    fields
}

/// Query-string pairs ready for `Url::query_pairs_mut`.
pub fn query_pairs<F: Serialize + ?Sized>(filter: &F) -> Vec<(String, String)> {
    scalar_fields(filter)
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (name, text)
        })
        .collect()
}
