#![forbid(unsafe_code)]

use serde_json::{Value, json};

use super::{READ_JSON_FILE, VALIDATE_BUILDER_RESULT, VALIDATE_INSPECTOR_RESULT, WRITE_JSON_FILE};

fn data_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "data": { "description": description }
        },
        "required": ["data"]
    })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": READ_JSON_FILE,
            "description": "Read a JSON file and return its parsed contents.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "path": { "type": "string", "description": "File path, relative to the server root or absolute." }
                },
                "required": ["path"]
            },
        }),
        json!({
            "name": WRITE_JSON_FILE,
            "description": "Write a value as pretty-printed JSON, replacing the file.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "path": { "type": "string", "description": "File path, relative to the server root or absolute." },
                    "data": { "description": "Any JSON value." }
                },
                "required": ["path", "data"]
            },
        }),
        json!({
            "name": VALIDATE_BUILDER_RESULT,
            "description": "Validate a builder_result document against the builder contract.",
            "inputSchema": data_schema("The builder_result object."),
        }),
        json!({
            "name": VALIDATE_INSPECTOR_RESULT,
            "description": "Validate an inspector_result document against the inspector contract.",
            "inputSchema": data_schema("The inspector_result object."),
        }),
    ]
}
