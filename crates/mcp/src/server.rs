#![forbid(unsafe_code)]

use crate::config::Config;
use crate::entry::session_logger;
use crate::tools::{ToolContext, ToolOutput, dispatch_tool, failure, tool_definitions};
use crate::{
    INVALID_PARAMS, JsonRpcRequest, METHOD_NOT_FOUND, NOT_INITIALIZED, json_rpc_error,
    json_rpc_response, tool_text_content,
};
use fm_session_log::{FsHost, SessionLogger};
use serde_json::{Map, Value, json};

pub(crate) struct McpServer {
    initialized: bool,
    tools: ToolContext,
    logger: Option<SessionLogger<FsHost>>,
}

impl McpServer {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            initialized: false,
            tools: ToolContext::new(&config.root),
            logger: config.session_log.then(|| session_logger(config)),
        }
    }

    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();

        if method == "initialize" {
            self.initialized = true;
            return Some(json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": crate::MCP_VERSION,
                    "serverInfo": { "name": crate::SERVER_NAME, "version": crate::SERVER_VERSION },
                    "capabilities": { "tools": {} }
                }),
            ));
        }

        // Notifications never get a reply, known or not.
        if request.is_notification() {
            if method == "notifications/initialized" {
                self.initialized = true;
            } else {
                tracing::debug!(method, "ignoring notification");
            }
            return None;
        }

        if !self.initialized {
            return Some(json_rpc_error(
                request.id,
                NOT_INITIALIZED,
                "Server not initialized",
            ));
        }

        match method {
            "ping" => Some(json_rpc_response(request.id, json!({}))),
            // Some clients list resources by default; advertise an empty set.
            "resources/list" => Some(json_rpc_response(request.id, json!({ "resources": [] }))),
            "resources/read" => Some(json_rpc_response(request.id, json!({ "contents": [] }))),
            "tools/list" => Some(json_rpc_response(
                request.id,
                json!({ "tools": tool_definitions() }),
            )),
            "tools/call" => {
                let Some(params) = request.params.as_ref().and_then(Value::as_object) else {
                    return Some(json_rpc_error(
                        request.id,
                        INVALID_PARAMS,
                        "params must be an object",
                    ));
                };
                let output = self.call_tool(params);
                Some(json_rpc_response(
                    request.id,
                    json!({
                        "content": [tool_text_content(&output.text)],
                        "isError": !output.ok
                    }),
                ))
            }
            _ => Some(json_rpc_error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {method}"),
            )),
        }
    }

    pub(crate) fn call_tool(&mut self, params: &Map<String, Value>) -> ToolOutput {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        let args = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        if let Some(logger) = &self.logger {
            logger.before_tool_execute(&tool_event(params, name, &args));
        }

        tracing::debug!(tool = name, "tools/call");
        dispatch_tool(&self.tools, name, &args)
            .unwrap_or_else(|| failure(&format!("Unknown tool: {name}")))
    }
}

/// Shapes a `tools/call` as the event the session logger expects: the call's
/// own fields, `_meta` hoisted to the top level (that is where clients put
/// the session id), then `tool` and `args`.
fn tool_event(params: &Map<String, Value>, name: &str, args: &Value) -> Value {
    let mut event = Map::new();
    for (key, value) in params {
        match key.as_str() {
            "name" | "arguments" => {}
            "_meta" => {
                if let Some(meta) = value.as_object() {
                    for (meta_key, meta_value) in meta {
                        event.insert(meta_key.clone(), meta_value.clone());
                    }
                }
            }
            _ => {
                event.insert(key.clone(), value.clone());
            }
        }
    }
    event.insert("tool".to_string(), Value::String(name.to_string()));
    event.insert("args".to_string(), args.clone());
    Value::Object(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_request;
    use pretty_assertions::assert_eq;

    fn server(root: &std::path::Path, session_log: bool) -> McpServer {
        McpServer::new(&Config::new(root.to_path_buf(), None, session_log))
    }

    fn send(server: &mut McpServer, raw: Value) -> Option<Value> {
        let body = serde_json::to_vec(&raw).expect("encode");
        server.handle(parse_request(&body).expect("request"))
    }

    fn initialized(root: &std::path::Path, session_log: bool) -> McpServer {
        let mut srv = server(root, session_log);
        send(
            &mut srv,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        );
        send(
            &mut srv,
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        );
        srv
    }

    #[test]
    fn requests_before_initialize_are_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = server(tmp.path(), false);
        let resp = send(&mut srv, json!({ "jsonrpc": "2.0", "id": 5, "method": "tools/list" }))
            .expect("response");
        assert_eq!(resp["error"]["code"], NOT_INITIALIZED);
        assert_eq!(resp["id"], 5);
    }

    #[test]
    fn initialize_reports_server_identity() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = server(tmp.path(), false);
        let resp = send(
            &mut srv,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }),
        )
        .expect("response");
        assert_eq!(resp["result"]["protocolVersion"], crate::MCP_VERSION);
        assert_eq!(resp["result"]["serverInfo"]["name"], "foreman-mcp");
    }

    #[test]
    fn notifications_get_no_reply() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = initialized(tmp.path(), false);
        assert!(
            send(&mut srv, json!({ "jsonrpc": "2.0", "method": "notifications/cancelled" }))
                .is_none()
        );
    }

    #[test]
    fn unknown_method_is_not_found() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = initialized(tmp.path(), false);
        let resp = send(&mut srv, json!({ "jsonrpc": "2.0", "id": 2, "method": "prompts/list" }))
            .expect("response");
        assert_eq!(resp["error"]["code"], METHOD_NOT_FOUND);
    }

    #[test]
    fn tools_call_wraps_output_as_text_content() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = initialized(tmp.path(), false);
        let resp = send(
            &mut srv,
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": { "name": "validate-builder-result", "arguments": { "data": [] } }
            }),
        )
        .expect("response");
        assert_eq!(resp["result"]["isError"], true);
        assert_eq!(resp["result"]["content"][0]["type"], "text");
        let text = resp["result"]["content"][0]["text"].as_str().expect("text");
        let payload: Value = serde_json::from_str(text).expect("payload");
        assert_eq!(payload["errors"][0]["code"], "type_error");
    }

    #[test]
    fn unknown_tool_is_a_tool_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = initialized(tmp.path(), false);
        let resp = send(
            &mut srv,
            json!({
                "jsonrpc": "2.0", "id": 4, "method": "tools/call",
                "params": { "name": "rm-rf", "arguments": {} }
            }),
        )
        .expect("response");
        assert_eq!(resp["result"]["isError"], true);
        assert_eq!(
            resp["result"]["content"][0]["text"],
            r#"{"ok":false,"error":"Unknown tool: rm-rf"}"#
        );
    }

    #[test]
    fn tools_call_without_params_is_invalid() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = initialized(tmp.path(), false);
        let resp = send(&mut srv, json!({ "jsonrpc": "2.0", "id": 6, "method": "tools/call" }))
            .expect("response");
        assert_eq!(resp["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn tool_calls_are_recorded_in_the_session_log() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut srv = initialized(tmp.path(), true);
        send(
            &mut srv,
            json!({
                "jsonrpc": "2.0", "id": 7, "method": "tools/call",
                "params": {
                    "name": "read-json-file",
                    "arguments": { "path": "missing.json" },
                    "_meta": { "sessionId": "ses 9" }
                }
            }),
        );
        let log_dir = tmp.path().join(".opencode").join("session-log");
        let line = std::fs::read_to_string(log_dir.join("ses_9.jsonl")).expect("session log");
        let entry: Value = serde_json::from_str(line.trim()).expect("json");
        assert_eq!(entry["tool"], "read-json-file");
        assert_eq!(entry["sessionId"], "ses 9");
        assert_eq!(entry["debug"]["inputKeys"], json!(["args", "sessionId", "tool"]));
        assert_eq!(entry["argsPreview"], json!({ "path": "missing.json" }));
    }

    #[test]
    fn tool_event_hoists_meta_and_drops_call_fields() {
        let params = json!({ "name": "x", "arguments": {"a": 1}, "_meta": {"sessionID": "s"}, "extra": true });
        let event = tool_event(params.as_object().expect("object"), "x", &json!({"a": 1}));
        assert_eq!(
            event,
            json!({ "sessionID": "s", "extra": true, "tool": "x", "args": {"a": 1} })
        );
    }
}
