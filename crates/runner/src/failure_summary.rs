#![forbid(unsafe_code)]

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct FailureSummary {
    pub(crate) status: String,
    pub(crate) reason: String,
    pub(crate) errors: Option<Value>,
    pub(crate) data: SummaryData,
}

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct SummaryData {
    pub(crate) run: Option<Value>,
    pub(crate) work: Option<Value>,
}

/// Folds a handoff report into the rejection summary. `raw_json` that is not
/// a JSON object contributes nothing.
pub(crate) fn summarize(status: &str, reason: &str, raw_json: &str) -> FailureSummary {
    let payload = match serde_json::from_str::<Value>(raw_json) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(error = %err, "raw handoff json does not parse");
            None
        }
    };

    let empty = Map::new();
    let data = payload
        .as_ref()
        .and_then(|p| p.get("data"))
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    FailureSummary {
        status: status.to_string(),
        reason: reason.to_string(),
        errors: payload.as_ref().and_then(|p| p.get("errors")).cloned(),
        data: SummaryData {
            run: data.get("run").cloned(),
            work: data.get("work").cloned(),
        },
    }
}
