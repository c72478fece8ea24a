#![forbid(unsafe_code)]

use serde::Serialize;
use serde_json::Value;

use super::{ToolContext, ToolOutput, failure};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ToolError {
    #[error("Failed to {action} file: path must be a non-empty string")]
    MissingPath { action: &'static str },
    #[error("Failed to read file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to write file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write file {path}: {source}")]
    Encode {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct ReadOk {
    ok: bool,
    data: Value,
}

#[derive(Serialize)]
struct WriteOk {
    ok: bool,
}

fn path_arg<'a>(args: &'a Value, action: &'static str) -> Result<&'a str, ToolError> {
    match args.get("path").and_then(Value::as_str) {
        Some(path) if !path.is_empty() => Ok(path),
        _ => Err(ToolError::MissingPath { action }),
    }
}

pub(crate) fn read_json(ctx: &ToolContext, args: &Value) -> Result<Value, ToolError> {
    let path = path_arg(args, "read")?;
    let raw = std::fs::read_to_string(ctx.resolve(path)).map_err(|source| ToolError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ToolError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Replaces the file with pretty JSON plus a trailing newline. An absent
/// `data` argument is written as `null`.
pub(crate) fn write_json(ctx: &ToolContext, args: &Value) -> Result<(), ToolError> {
    let path = path_arg(args, "write")?;
    let data = args.get("data").unwrap_or(&Value::Null);
    let mut body = serde_json::to_string_pretty(data).map_err(|source| ToolError::Encode {
        path: path.to_string(),
        source,
    })?;
    body.push('\n');
    std::fs::write(ctx.resolve(path), body).map_err(|source| ToolError::Write {
        path: path.to_string(),
        source,
    })
}

pub(crate) fn read(ctx: &ToolContext, args: &Value) -> ToolOutput {
    match read_json(ctx, args) {
        Ok(data) => ToolOutput::encode(true, &ReadOk { ok: true, data }),
        Err(err) => {
            tracing::debug!(error = %err, "read-json-file failed");
            failure(&err.to_string())
        }
    }
}

pub(crate) fn write(ctx: &ToolContext, args: &Value) -> ToolOutput {
    match write_json(ctx, args) {
        Ok(()) => ToolOutput::encode(true, &WriteOk { ok: true }),
        Err(err) => {
            tracing::debug!(error = %err, "write-json-file failed");
            failure(&err.to_string())
        }
    }
}
