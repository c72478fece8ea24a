#![forbid(unsafe_code)]
#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tempfile::TempDir;

pub(crate) struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    root: TempDir,
}

impl Server {
    pub(crate) fn start() -> Self {
        Self::start_with_args(&[])
    }

    /// Spawns the server with a fresh scratch root as `--root`.
    pub(crate) fn start_with_args(extra_args: &[&str]) -> Self {
        let root = tempfile::tempdir().expect("create scratch root");
        let mut child = Command::new(env!("CARGO_BIN_EXE_fm_mcp"))
            .arg("--root")
            .arg(root.path())
            .args(extra_args)
            .env_remove("FOREMAN_ROOT")
            .env_remove("FOREMAN_SESSION_LOG_DIR")
            .env_remove("FOREMAN_NO_SESSION_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn fm_mcp");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        Self {
            child,
            stdin,
            stdout,
            root,
        }
    }

    pub(crate) fn start_initialized() -> Self {
        let mut server = Self::start();
        server.initialize_default();
        server
    }

    pub(crate) fn start_initialized_with_args(extra_args: &[&str]) -> Self {
        let mut server = Self::start_with_args(extra_args);
        server.initialize_default();
        server
    }

    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    pub(crate) fn session_log_dir(&self) -> PathBuf {
        self.root().join(".opencode").join("session-log")
    }

    pub(crate) fn send(&mut self, req: Value) {
        writeln!(self.stdin, "{req}").expect("write request");
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn send_raw(&mut self, raw: &str) {
        writeln!(self.stdin, "{raw}").expect("write request");
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn recv(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        assert!(!line.trim().is_empty(), "empty response line");
        serde_json::from_str(&line).expect("parse response json")
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send(req);
        self.recv()
    }

    pub(crate) fn initialize_default(&mut self) {
        let _ = self.request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
        }));
        self.send(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
            "params": {}
        }));
    }

    /// Calls a tool and returns `(isError, decoded text payload)`.
    pub(crate) fn call_tool(&mut self, id: i64, name: &str, arguments: Value) -> (bool, Value) {
        let resp = self.request(json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }));
        tool_payload(&resp)
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub(crate) fn tool_payload(resp: &Value) -> (bool, Value) {
    let result = resp.get("result").expect("tools/call result");
    let is_error = result
        .get("isError")
        .and_then(Value::as_bool)
        .expect("isError flag");
    let text = result
        .get("content")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("text"))
        .and_then(Value::as_str)
        .expect("text content");
    (is_error, serde_json::from_str(text).expect("tool text is json"))
}
