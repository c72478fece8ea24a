#![forbid(unsafe_code)]

use fm_core::{
    BuilderResult, InspectorResult, RunOutcome, ValidationError, ValidationResult,
};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::git::{ChangedFile, changed_files};

pub(crate) const FILE_MISSING: &str = "file_missing";
pub(crate) const INVALID_JSON: &str = "invalid_json";

/// The agent role whose result file is being handed off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Role {
    Builder,
    Inspector,
}

impl Role {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Builder => "builder",
            Self::Inspector => "inspector",
        }
    }

    pub(crate) fn result_file(self) -> &'static str {
        match self {
            Self::Builder => "builder_result.json",
            Self::Inspector => "inspector_result.json",
        }
    }

    fn validated_run(self, document: &Value) -> Result<RunOutcome, ValidationResult> {
        match self {
            Self::Builder => BuilderResult::from_value(document).map(|result| result.run),
            Self::Inspector => InspectorResult::from_value(document).map(|result| result.run),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum HandoffStatus {
    Valid,
    InvalidSchema,
    InvalidJson,
    FileMissing,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct HandoffData {
    pub(crate) run: Option<RunOutcome>,
    pub(crate) work: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct HandoffReport {
    pub(crate) status: HandoffStatus,
    pub(crate) errors: Vec<ValidationError>,
    pub(crate) data: HandoffData,
    pub(crate) changed_files: Vec<ChangedFile>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum HandoffError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads and validates `<role>_result.json` under `worktree`. A missing or
/// malformed file is a report, not an error; only unexpected IO failures
/// (permissions, a directory in place of the file) are returned as `Err`.
pub(crate) fn check_handoff(role: Role, worktree: &Path) -> Result<HandoffReport, HandoffError> {
    let (status, errors, data) = inspect_result_file(role, worktree)?;
    Ok(HandoffReport {
        status,
        errors,
        data,
        changed_files: changed_files(worktree),
    })
}

fn inspect_result_file(
    role: Role,
    worktree: &Path,
) -> Result<(HandoffStatus, Vec<ValidationError>, HandoffData), HandoffError> {
    let file = role.result_file();
    let path = worktree.join(file);

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let error = ValidationError::new(
                file,
                FILE_MISSING,
                format!("{file} not found in worktree root"),
            );
            return Ok((HandoffStatus::FileMissing, vec![error], HandoffData::default()));
        }
        Err(source) => return Err(HandoffError::Read { path, source }),
    };

    let document: Value = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(err) => {
            let error =
                ValidationError::new(file, INVALID_JSON, format!("{file} is not valid JSON: {err}"));
            return Ok((HandoffStatus::InvalidJson, vec![error], HandoffData::default()));
        }
    };

    match role.validated_run(&document) {
        Ok(run) => {
            let data = HandoffData {
                run: Some(run),
                work: document.get("work").filter(|work| work.is_object()).cloned(),
            };
            Ok((HandoffStatus::Valid, Vec::new(), data))
        }
        Err(result) => Ok((
            HandoffStatus::InvalidSchema,
            result.into_errors(),
            HandoffData::default(),
        )),
    }
}
