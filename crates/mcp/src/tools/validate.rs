#![forbid(unsafe_code)]

use fm_core::{
    ROOT_PATH, TOOL_PATH, ValidationError, ValidationResult, codes, validate_builder_result,
    validate_inspector_result,
};
use serde_json::Value;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::ToolOutput;

const FILE_PATH_UNSUPPORTED: &str =
    "This tool currently validates only the 'data' object; file path is not supported";

pub(crate) fn builder(args: &Value) -> ToolOutput {
    run(args, validate_builder_result)
}

pub(crate) fn inspector(args: &Value) -> ToolOutput {
    run(args, validate_inspector_result)
}

fn run(args: &Value, validator: fn(&Value) -> ValidationResult) -> ToolOutput {
    let result = match args.get("data") {
        Some(data) if !is_falsy(data) => guarded(validator, data),
        _ => ValidationResult::single(ValidationError::new(
            ROOT_PATH,
            codes::REQUIRED,
            FILE_PATH_UNSUPPORTED,
        )),
    };
    ToolOutput::encode(result.ok(), &result)
}

/// `null`, `false`, zero and the empty string count as "no data supplied".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// A validator bug must still yield a well-formed result.
fn guarded(validator: fn(&Value) -> ValidationResult, data: &Value) -> ValidationResult {
    catch_unwind(AssertUnwindSafe(|| validator(data))).unwrap_or_else(|panic| {
        let detail = panic
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::warn!(%detail, "validator panicked");
        ValidationResult::single(ValidationError::new(
            TOOL_PATH,
            codes::UNEXPECTED_ERROR,
            format!("validator threw an unexpected error: {detail}"),
        ))
    })
}
