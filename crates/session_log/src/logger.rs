#![forbid(unsafe_code)]

use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::host::{LoggerHost, SinkError};
use crate::preview::args_preview;
use crate::session::safe_filename;
use crate::snapshot::{input_keys, safe_snapshot};

pub const EVENT_TYPE: &str = "tool.execute.before";
pub const SESSIONS_INDEX: &str = "sessions.jsonl";

#[derive(Serialize)]
struct ToolEventLine<'a> {
    ts: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "sessionId")]
    session_id: &'a str,
    directory: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool: Option<&'a Value>,
    #[serde(rename = "argsPreview")]
    args_preview: Map<String, Value>,
    debug: DebugSection,
}

#[derive(Serialize)]
struct DebugSection {
    #[serde(rename = "inputKeys")]
    input_keys: Vec<String>,
    input: Value,
}

#[derive(Serialize)]
struct IndexLine<'a> {
    ts: &'a str,
    #[serde(rename = "sessionId")]
    session_id: &'a str,
}

pub struct SessionLogger<H: LoggerHost> {
    host: H,
    directory: String,
}

impl<H: LoggerHost> SessionLogger<H> {
    /// `directory` is the project directory recorded in every entry.
    pub fn new(host: H, directory: impl Into<String>) -> Self {
        Self {
            host,
            directory: directory.into(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Records one "before tool execution" event. Never fails.
    pub fn before_tool_execute(&self, event: &Value) {
        if let Err(err) = self.try_record(event, &now_rfc3339()) {
            tracing::warn!(error = %err, "session log write failed");
        }
    }

    pub fn try_record(&self, event: &Value, ts: &str) -> Result<(), SinkError> {
        let session_id = self.host.session_id(event);
        let entry = self.entry_line(event, &session_id, ts);
        self.host
            .append_line(&format!("{}.jsonl", safe_filename(&session_id)), &entry)?;

        let index = IndexLine {
            ts,
            session_id: &session_id,
        };
        self.host.append_line(SESSIONS_INDEX, &encode(&index))
    }

    fn entry_line(&self, event: &Value, session_id: &str, ts: &str) -> String {
        let tool = event.get("tool");
        let line = ToolEventLine {
            ts,
            kind: EVENT_TYPE,
            session_id,
            directory: &self.directory,
            tool,
            args_preview: args_preview(tool.and_then(Value::as_str), event),
            debug: DebugSection {
                input_keys: input_keys(event),
                input: safe_snapshot(event),
            },
        };
        encode(&line)
    }
}

fn encode<T: Serialize>(value: &T) -> String {
    // Only maps with string keys reach here, so encoding cannot fail in practice.
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
