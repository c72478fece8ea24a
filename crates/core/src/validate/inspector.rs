#![forbid(unsafe_code)]

use serde_json::{Map, Value};

use super::envelope::{Envelope, check_envelope};
use super::{
    ValidationError, ValidationResult, codes, is_non_empty_string, is_one_of, push,
};
use crate::model::{ReviewStatus, Severity};

pub fn validate_inspector_result(document: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    if let Envelope::Work(work) = check_envelope(document, "inspector_result", &mut errors) {
        check_work(work, &mut errors);
    }

    ValidationResult::from_errors(errors)
}

fn check_work(work: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    let status = work.get("status");
    if !is_one_of(status, ReviewStatus::parse) {
        push(
            errors,
            "work.status",
            codes::INVALID_ENUM,
            "work.status must be 'approved' or 'changes_requested'",
        );
    }

    let issues: &[Value] = match work.get("issues") {
        Some(Value::Array(items)) => items,
        _ => {
            push(
                errors,
                "work.issues",
                codes::REQUIRED,
                "work.issues must be an array",
            );
            &[]
        }
    };

    let changes_requested = status.and_then(Value::as_str)
        == Some(ReviewStatus::ChangesRequested.as_str());
    if changes_requested && issues.is_empty() {
        push(
            errors,
            "work.issues",
            codes::EMPTY_FOR_CHANGES_REQUESTED,
            "work.issues must be non-empty when work.status is 'changes_requested'",
        );
    }

    for (idx, issue) in issues.iter().enumerate() {
        check_issue(&format!("work.issues[{idx}]"), issue, errors);
    }

    let next_tasks: &[Value] = match work.get("next_tasks") {
        Some(Value::Array(items)) => items,
        _ => {
            push(
                errors,
                "work.next_tasks",
                codes::TYPE_ERROR,
                "work.next_tasks must be an array of strings",
            );
            &[]
        }
    };
    for (idx, task) in next_tasks.iter().enumerate() {
        if !is_non_empty_string(Some(task)) {
            push(
                errors,
                &format!("work.next_tasks[{idx}]"),
                codes::TYPE_ERROR,
                "each work.next_tasks entry must be a non-empty string",
            );
        }
    }
}

fn check_issue(prefix: &str, issue: &Value, errors: &mut Vec<ValidationError>) {
    let Some(issue) = issue.as_object() else {
        push(errors, prefix, codes::TYPE_ERROR, "each issue must be an object");
        return;
    };

    if !is_one_of(issue.get("severity"), Severity::parse) {
        push(
            errors,
            &format!("{prefix}.severity"),
            codes::INVALID_ENUM,
            "severity must be one of 'blocker', 'major', 'minor'",
        );
    }

    if !is_non_empty_string(issue.get("description")) {
        push(
            errors,
            &format!("{prefix}.description"),
            codes::REQUIRED,
            "description must be a non-empty string",
        );
    }

    match issue.get("paths") {
        Some(Value::Array(paths)) if !paths.is_empty() => {
            for (idx, path) in paths.iter().enumerate() {
                if !is_non_empty_string(Some(path)) {
                    push(
                        errors,
                        &format!("{prefix}.paths[{idx}]"),
                        codes::TYPE_ERROR,
                        "each path must be a non-empty string",
                    );
                }
            }
        }
        _ => push(
            errors,
            &format!("{prefix}.paths"),
            codes::REQUIRED,
            "paths must be a non-empty array of strings",
        ),
    }
}
