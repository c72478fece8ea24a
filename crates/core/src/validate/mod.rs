#![forbid(unsafe_code)]

mod builder;
mod envelope;
mod inspector;


use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use builder::validate_builder_result;
pub use inspector::validate_inspector_result;

/// Path used when the whole document is at fault.
pub const ROOT_PATH: &str = "<root>";
/// Path used when the tool invocation itself failed.
pub const TOOL_PATH: &str = "<tool>";

pub mod codes {
    pub const TYPE_ERROR: &str = "type_error";
    pub const REQUIRED: &str = "required";
    pub const INVALID: &str = "invalid";
    pub const INVALID_ENUM: &str = "invalid_enum";
    pub const TOO_LONG: &str = "too_long";
    pub const EMPTY_FOR_CHANGES_REQUESTED: &str = "empty_for_changes_requested";
    pub const UNEXPECTED_ERROR: &str = "unexpected_error";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, code: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: Some(code.to_string()),
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Outcome of one validation call. `ok` is derived from `errors`, so the two
/// can never disagree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

#[derive(Deserialize)]
struct ValidationResultWire {
    ok: bool,
    errors: Vec<ValidationError>,
}

impl Serialize for ValidationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            ok: bool,
            errors: &'a [ValidationError],
        }
        Borrowed {
            ok: self.ok(),
            errors: &self.errors,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidationResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `ok` on the wire is informational; the error list is authoritative.
        let wire = ValidationResultWire::deserialize(deserializer)?;
        Ok(Self::from_errors(wire.errors))
    }
}

pub(crate) fn push(errors: &mut Vec<ValidationError>, path: &str, code: &str, message: &str) {
    errors.push(ValidationError::new(path, code, message));
}

pub(crate) fn as_plain_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// Space separators (Zs), the ASCII controls `\t \n \v \f \r`, the line and
/// paragraph separators and the BOM. U+0085 is not in the set.
fn is_trim_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

pub(crate) fn is_blank(raw: &str) -> bool {
    raw.trim_matches(is_trim_whitespace).is_empty()
}

pub(crate) fn is_non_empty_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !is_blank(s))
}

pub(crate) fn is_one_of<T>(value: Option<&Value>, parse: fn(&str) -> Option<T>) -> bool {
    value.and_then(Value::as_str).and_then(parse).is_some()
}

/// `null` and absent are both accepted; anything else must be a string.
pub(crate) fn is_optional_string(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::String(_)))
}
