#![forbid(unsafe_code)]

mod definitions;
mod dispatch;
mod json_file;
mod validate;

pub(crate) use definitions::tool_definitions;
pub(crate) use dispatch::dispatch_tool;

use serde::Serialize;
use std::path::{Path, PathBuf};

pub(crate) const READ_JSON_FILE: &str = "read-json-file";
pub(crate) const WRITE_JSON_FILE: &str = "write-json-file";
pub(crate) const VALIDATE_BUILDER_RESULT: &str = "validate-builder-result";
pub(crate) const VALIDATE_INSPECTOR_RESULT: &str = "validate-inspector-result";

/// State shared by every tool call.
#[derive(Clone, Debug)]
pub(crate) struct ToolContext {
    root: PathBuf,
}

impl ToolContext {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Relative paths are anchored at the server root.
    pub(crate) fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }
}

/// A tool's JSON-encoded reply plus whether it reports success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ToolOutput {
    pub(crate) ok: bool,
    pub(crate) text: String,
}

impl ToolOutput {
    pub(crate) fn encode<T: Serialize>(ok: bool, payload: &T) -> Self {
        let text = serde_json::to_string(payload)
            .unwrap_or_else(|err| format!(r#"{{"ok":false,"error":"encode failed: {err}"}}"#));
        Self { ok, text }
    }
}

/// File-based plugin hosts register tools as `read_json_file`; the wire names
/// use dashes.
pub(crate) fn canonical_name(name: &str) -> String {
    name.replace('_', "-")
}

#[derive(Serialize)]
struct Failure<'a> {
    ok: bool,
    error: &'a str,
}

pub(crate) fn failure(error: &str) -> ToolOutput {
    ToolOutput::encode(false, &Failure { ok: false, error })
}
