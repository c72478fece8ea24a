#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{
    ROOT_PATH, ValidationError, ValidationResult, codes, validate_builder_result,
    validate_inspector_result,
};

macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }
    };
}

wire_enum!(RunStatus { Ok => "ok", Failed => "failed" });
wire_enum!(Complexity { Low => "low", Medium => "medium", High => "high" });
wire_enum!(ReviewStatus { Approved => "approved", ChangesRequested => "changes_requested" });
wire_enum!(Severity { Blocker => "blocker", Major => "major", Minor => "minor" });

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    #[serde(default)]
    pub failed_step: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderWork {
    pub summary: String,
    pub complexity: Complexity,
}

/// A `builder_result` document that passed validation.
///
/// `work` is `None` exactly when `run.status` is `failed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderResult {
    pub run: RunOutcome,
    pub work: Option<BuilderWork>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorIssue {
    pub severity: Severity,
    pub description: String,
    pub paths: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorWork {
    pub status: ReviewStatus,
    pub issues: Vec<InspectorIssue>,
    pub next_tasks: Vec<String>,
}

/// An `inspector_result` document that passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorResult {
    pub run: RunOutcome,
    pub work: Option<InspectorWork>,
}

impl BuilderResult {
    pub fn from_value(document: &Value) -> Result<Self, ValidationResult> {
        narrow(document, validate_builder_result)
    }
}

impl InspectorResult {
    pub fn from_value(document: &Value) -> Result<Self, ValidationResult> {
        narrow(document, validate_inspector_result)
    }
}

fn narrow<T: serde::de::DeserializeOwned>(
    document: &Value,
    validate: fn(&Value) -> ValidationResult,
) -> Result<T, ValidationResult> {
    let result = validate(document);
    if !result.ok() {
        return Err(result);
    }
    serde_json::from_value(document.clone()).map_err(|err| {
        ValidationResult::single(ValidationError::new(
            ROOT_PATH,
            codes::TYPE_ERROR,
            format!("document does not match the typed model: {err}"),
        ))
    })
}
