#![forbid(unsafe_code)]

//! Result documents exchanged between the orchestrator and its agent roles.
//!
//! `validate` holds the hand-written shape checks for `builder_result` and
//! `inspector_result`; `model` holds the typed view of a document that passed
//! those checks.

pub mod model;
pub mod validate;

pub use model::{
    BuilderResult, BuilderWork, Complexity, InspectorIssue, InspectorResult, InspectorWork,
    ReviewStatus, RunOutcome, RunStatus, Severity,
};
pub use validate::{
    ROOT_PATH, TOOL_PATH, ValidationError, ValidationResult, codes, validate_builder_result,
    validate_inspector_result,
};
