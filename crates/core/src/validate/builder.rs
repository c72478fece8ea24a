#![forbid(unsafe_code)]

use serde_json::Value;

use super::envelope::{Envelope, check_envelope};
use super::{ValidationError, ValidationResult, codes, is_non_empty_string, is_one_of, push};
use crate::model::Complexity;

/// Counted in UTF-16 code units, so an astral character takes two.
pub const MAX_SUMMARY_UNITS: usize = 300;

pub fn validate_builder_result(document: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    if let Envelope::Work(work) = check_envelope(document, "builder_result", &mut errors) {
        check_summary(work.get("summary"), &mut errors);

        if !is_one_of(work.get("complexity"), Complexity::parse) {
            push(
                &mut errors,
                "work.complexity",
                codes::INVALID_ENUM,
                "work.complexity must be one of 'low', 'medium', 'high'",
            );
        }
    }

    ValidationResult::from_errors(errors)
}

fn check_summary(summary: Option<&Value>, errors: &mut Vec<ValidationError>) {
    if !is_non_empty_string(summary) {
        push(
            errors,
            "work.summary",
            codes::REQUIRED,
            "work.summary must be a non-empty string",
        );
        return;
    }
    let length = summary
        .and_then(Value::as_str)
        .map(|s| s.encode_utf16().count())
        .unwrap_or(0);
    if length > MAX_SUMMARY_UNITS {
        push(
            errors,
            "work.summary",
            codes::TOO_LONG,
            "work.summary should be at most 300 characters",
        );
    }
}
