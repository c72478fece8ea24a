#![forbid(unsafe_code)]

use serde_json::Value;

use super::{
    READ_JSON_FILE, ToolContext, ToolOutput, VALIDATE_BUILDER_RESULT, VALIDATE_INSPECTOR_RESULT,
    WRITE_JSON_FILE, canonical_name, json_file, validate,
};

pub(crate) fn dispatch_tool(ctx: &ToolContext, name: &str, args: &Value) -> Option<ToolOutput> {
    let resp = match canonical_name(name).as_str() {
        READ_JSON_FILE => json_file::read(ctx, args),
        WRITE_JSON_FILE => json_file::write(ctx, args),
        VALIDATE_BUILDER_RESULT => validate::builder(args),
        VALIDATE_INSPECTOR_RESULT => validate::inspector(args),
        _ => return None,
    };
    Some(resp)
}
