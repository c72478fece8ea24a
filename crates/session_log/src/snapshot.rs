#![forbid(unsafe_code)]

use serde_json::{Map, Value};

use crate::preview::{MAX_PREVIEW_UNITS, truncate};
use crate::redact::{is_sensitive_key, redact_text, redacted};

pub const MAX_ARRAY_ITEMS: usize = 20;

/// Debug copy of a host event: strings cut and scrubbed, arrays capped,
/// objects walked. An object-valued `args` entry is kept verbatim so the
/// exact call can be replayed from the log.
pub fn safe_snapshot(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(truncate(&redact_text(s), MAX_PREVIEW_UNITS)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .take(MAX_ARRAY_ITEMS)
                .map(safe_snapshot)
                .collect(),
        ),
        Value::Object(map) => Value::Object(snapshot_object(map)),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

fn snapshot_object(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in map {
        let copied = if key == "args" && value.is_object() {
            value.clone()
        } else if is_sensitive_key(key) {
            Value::String(redacted().to_string())
        } else {
            safe_snapshot(value)
        };
        out.insert(key.clone(), copied);
    }
    out
}

/// Sorted top-level keys of the event; empty for anything but an object.
pub fn input_keys(event: &Value) -> Vec<String> {
    let mut keys = event
        .as_object()
        .map(|map| map.keys().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    keys.sort();
    keys
}
