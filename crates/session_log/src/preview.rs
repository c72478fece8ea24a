#![forbid(unsafe_code)]

use serde_json::{Map, Value};

pub const MAX_PREVIEW_UNITS: usize = 500;

const ELLIPSIS: char = '…';

/// Cuts `value` to `max_units` UTF-16 code units, marking the cut with an
/// ellipsis. A surrogate pair that would straddle the limit is dropped whole.
pub fn truncate(value: &str, max_units: usize) -> String {
    let mut units = 0;
    for (cut, ch) in value.char_indices() {
        units += ch.len_utf16();
        if units > max_units {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&value[..cut]);
            out.push(ELLIPSIS);
            return out;
        }
    }
    value.to_string()
}

#[derive(Clone, Copy)]
enum Field {
    Plain(&'static str),
    Truncated(&'static str),
}

const BASH_FIELDS: &[Field] = &[Field::Truncated("command")];
const FILE_FIELDS: &[Field] = &[Field::Plain("filePath")];
const GREP_FIELDS: &[Field] = &[
    Field::Truncated("pattern"),
    Field::Plain("include"),
    Field::Plain("path"),
];
const GLOB_FIELDS: &[Field] = &[Field::Truncated("pattern"), Field::Plain("path")];

/// Fields worth keeping per built-in tool. Anything else is copied whole.
fn preview_fields(tool: &str) -> Option<&'static [Field]> {
    match tool {
        "bash" => Some(BASH_FIELDS),
        "read" | "edit" | "write" => Some(FILE_FIELDS),
        "grep" => Some(GREP_FIELDS),
        "glob" => Some(GLOB_FIELDS),
        _ => None,
    }
}

/// Builds the compact argument preview logged for a tool call.
///
/// Only the event's `args` object is considered. Whitelisted fields whose
/// value is not a string are left out.
pub fn args_preview(tool: Option<&str>, event: &Value) -> Map<String, Value> {
    let Some(args) = event.get("args").and_then(Value::as_object) else {
        return Map::new();
    };

    let Some(fields) = tool.and_then(preview_fields) else {
        return args.clone();
    };

    let mut out = Map::new();
    for field in fields {
        let (key, limit) = match *field {
            Field::Plain(key) => (key, None),
            Field::Truncated(key) => (key, Some(MAX_PREVIEW_UNITS)),
        };
        let Some(raw) = args.get(key).and_then(Value::as_str) else {
            continue;
        };
        let value = match limit {
            Some(max) => truncate(raw, max),
            None => raw.to_string(),
        };
        out.insert(key.to_string(), Value::String(value));
    }
    out
}
