#![forbid(unsafe_code)]

use serde_json::{Map, Value};

pub const UNKNOWN_SESSION: &str = "unknown";

const TOP_LEVEL_KEYS: [&str; 3] = ["sessionID", "sessionId", "session_id"];
const NESTED_KEYS: [&str; 5] = ["id", "sessionId", "session_id", "sessionID", "key"];

/// Finds the session id a host event belongs to.
///
/// Hosts disagree on where they put it, so the lookup walks a fixed list of
/// candidates and takes the first non-empty string: top-level spellings,
/// then the nested `session` object, then a bare top-level `id`.
pub fn resolve_session_id(event: &Value) -> Option<String> {
    let event = event.as_object()?;
    let session = event.get("session").and_then(Value::as_object);

    let top = TOP_LEVEL_KEYS.iter().map(|key| event.get(*key));
    let nested = NESTED_KEYS
        .iter()
        .map(|key| session.and_then(|s: &Map<String, Value>| s.get(*key)));
    let fallback = std::iter::once(event.get("id"));

    top.chain(nested)
        .chain(fallback)
        .flatten()
        .filter_map(Value::as_str)
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
}

/// Maps a session id onto a token that is safe as a file name.
pub fn safe_filename(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_spellings_win_in_order() {
        let event = json!({ "sessionId": "b", "session_id": "c", "sessionID": "a", "id": "z" });
        assert_eq!(resolve_session_id(&event).as_deref(), Some("a"));

        let event = json!({ "session_id": "c", "session": { "id": "nested" } });
        assert_eq!(resolve_session_id(&event).as_deref(), Some("c"));
    }

    #[test]
    fn nested_session_fields_come_before_bare_id() {
        let event = json!({ "session": { "key": "k", "session_id": "s" }, "id": "call-1" });
        assert_eq!(resolve_session_id(&event).as_deref(), Some("s"));

        let event = json!({ "session": { "key": "k" }, "id": "call-1" });
        assert_eq!(resolve_session_id(&event).as_deref(), Some("k"));
    }

    #[test]
    fn empty_and_non_string_candidates_are_skipped() {
        let event = json!({ "sessionID": "", "sessionId": 12, "session": "flat", "id": "call-9" });
        assert_eq!(resolve_session_id(&event).as_deref(), Some("call-9"));
    }

    #[test]
    fn nothing_usable_yields_none() {
        assert_eq!(resolve_session_id(&json!({ "tool": "bash" })), None);
        assert_eq!(resolve_session_id(&json!(["sessionID"])), None);
        assert_eq!(resolve_session_id(&Value::Null), None);
    }

    #[test]
    fn filenames_keep_only_safe_characters() {
        assert_eq!(safe_filename("ses_01H.x-y"), "ses_01H.x-y");
        assert_eq!(safe_filename("../etc/passwd"), ".._etc_passwd");
        assert_eq!(safe_filename("a b:c/é"), "a_b_c__");
    }
}
