#![forbid(unsafe_code)]

use serde_json::{Map, Value};

use super::{
    ROOT_PATH, ValidationError, as_plain_object, codes, is_one_of, is_optional_string, push,
};
use crate::model::RunStatus;

/// Where the shared `run`/`work` checks leave the caller.
pub(super) enum Envelope<'a> {
    /// Validation ended early; nothing else may be inspected.
    Stop,
    /// `work` is an object and the role-specific checks should run on it.
    Work(&'a Map<String, Value>),
}

/// Checks the part both result documents share: the root object, the `run`
/// block, and whether `work` has the shape that `run.status` calls for.
pub(super) fn check_envelope<'a>(
    document: &'a Value,
    document_name: &str,
    errors: &mut Vec<ValidationError>,
) -> Envelope<'a> {
    let Some(root) = document.as_object() else {
        push(
            errors,
            ROOT_PATH,
            codes::TYPE_ERROR,
            &format!("{document_name} must be a JSON object"),
        );
        return Envelope::Stop;
    };

    let run_status = check_run(root.get("run"), errors);
    let work = root.get("work");

    // The branch keys off the raw status, so an invalid status still takes the `ok` path.
    if run_status == Some(RunStatus::Failed.as_str()) {
        if !matches!(work, Some(Value::Null)) {
            push(
                errors,
                "work",
                codes::INVALID,
                "work must be null when run.status is 'failed'",
            );
        }
        return Envelope::Stop;
    }

    match as_plain_object(work) {
        Some(work) => Envelope::Work(work),
        None => {
            push(
                errors,
                "work",
                codes::REQUIRED,
                "work must be an object when run.status is 'ok'",
            );
            Envelope::Stop
        }
    }
}

/// Returns the raw `run.status` string, if there is one.
fn check_run<'a>(run: Option<&'a Value>, errors: &mut Vec<ValidationError>) -> Option<&'a str> {
    let Some(run) = as_plain_object(run) else {
        push(errors, "run", codes::REQUIRED, "run must be an object");
        return None;
    };

    let status = run.get("status");
    if !is_one_of(status, RunStatus::parse) {
        push(
            errors,
            "run.status",
            codes::INVALID_ENUM,
            "run.status must be 'ok' or 'failed'",
        );
    }

    if !is_optional_string(run.get("failed_step")) {
        push(
            errors,
            "run.failed_step",
            codes::TYPE_ERROR,
            "run.failed_step must be a string or null",
        );
    }

    if !is_optional_string(run.get("error")) {
        push(
            errors,
            "run.error",
            codes::TYPE_ERROR,
            "run.error must be a string or null",
        );
    }

    status.and_then(Value::as_str)
}
