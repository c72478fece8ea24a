#![forbid(unsafe_code)]

mod support;
use support::*;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::io::Write;
use std::process::{Command, Stdio};

fn lines(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
        .lines()
        .map(|line| serde_json::from_str(line).expect("jsonl line"))
        .collect()
}

#[test]
fn tool_calls_append_session_and_index_lines() {
    let mut server = Server::start_initialized();
    let resp = server.request(json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {
            "name": "validate-builder-result",
            "arguments": { "data": { "run": { "status": "failed" }, "work": null } },
            "_meta": { "sessionID": "ses/alpha" }
        }
    }));
    let (is_error, _) = tool_payload(&resp);
    assert!(!is_error);

    let log_dir = server.session_log_dir();
    let entries = lines(&log_dir.join("ses_alpha.jsonl"));
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry["type"], "tool.execute.before");
    assert_eq!(entry["sessionId"], "ses/alpha");
    assert_eq!(entry["tool"], "validate-builder-result");
    assert_eq!(entry["directory"], &*server.root().to_string_lossy());
    assert_eq!(entry["debug"]["inputKeys"], json!(["args", "sessionID", "tool"]));
    assert_eq!(
        entry["debug"]["input"]["args"],
        json!({ "data": { "run": { "status": "failed" }, "work": null } })
    );

    let index = lines(&log_dir.join("sessions.jsonl"));
    assert_eq!(index.len(), 1);
    assert_eq!(index[0]["sessionId"], "ses/alpha");
    assert_eq!(index[0]["ts"], entry["ts"]);
}

#[test]
fn calls_without_a_session_go_to_unknown() {
    let mut server = Server::start_initialized();
    server.call_tool(2, "read-json-file", json!({ "path": "nothing.json" }));
    server.call_tool(3, "read-json-file", json!({ "path": "nothing.json" }));
    let entries = lines(&server.session_log_dir().join("unknown.jsonl"));
    assert_eq!(entries.len(), 2);
}

#[test]
fn disabled_session_log_writes_nothing() {
    let mut server = Server::start_initialized_with_args(&["--no-session-log"]);
    let (is_error, _) = server.call_tool(2, "read-json-file", json!({ "path": "nothing.json" }));
    assert!(is_error);
    assert!(!server.session_log_dir().exists());
}

#[test]
fn custom_log_dir_is_honored() {
    let mut server = Server::start_initialized_with_args(&["--log-dir", "logs"]);
    server.call_tool(2, "write-json-file", json!({ "path": "x.json", "data": 1 }));
    assert!(server.root().join("logs").join("unknown.jsonl").exists());
    assert!(!server.session_log_dir().exists());
}

#[test]
fn hook_subcommand_records_one_event() {
    let root = tempfile::tempdir().expect("tempdir");
    let long = "z".repeat(600);
    let event = json!({
        "tool": "bash",
        "session": { "id": "ses_hook" },
        "args": { "command": long, "description": "run" }
    });

    let mut child = Command::new(env!("CARGO_BIN_EXE_fm_mcp"))
        .arg("--root")
        .arg(root.path())
        .arg("hook")
        .env_remove("FOREMAN_NO_SESSION_LOG")
        .env_remove("FOREMAN_SESSION_LOG_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn fm_mcp hook");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(event.to_string().as_bytes())
        .expect("write event");
    let output = child.wait_with_output().expect("wait hook");
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "hook prints nothing on stdout");

    let log_dir = root.path().join(".opencode").join("session-log");
    let entries = lines(&log_dir.join("ses_hook.jsonl"));
    let preview = entries[0]["argsPreview"]["command"].as_str().expect("command preview");
    assert_eq!(preview.chars().count(), 501);
    assert!(preview.ends_with('…'));
    assert_eq!(entries[0]["argsPreview"].as_object().map(|m| m.len()), Some(1));
}

#[test]
fn hook_tolerates_garbage_input() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_fm_mcp"))
        .arg("--root")
        .arg(root.path())
        .arg("hook")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn fm_mcp hook");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"not json at all")
        .expect("write event");
    assert!(child.wait().expect("wait hook").success());
    assert!(!root.path().join(".opencode").exists());
}
