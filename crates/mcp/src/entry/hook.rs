#![forbid(unsafe_code)]

use crate::config::Config;
use fm_session_log::{FsHost, SessionLogger};
use serde_json::Value;
use std::io::Read;

/// Records one host event read from `input`. Logging is best effort: a bad
/// event or an unwritable log directory is reported on stderr and otherwise
/// ignored so the host's tool call is never blocked.
pub(crate) fn run_hook<R: Read>(config: &Config, mut input: R) {
    if !config.session_log {
        tracing::debug!("session log disabled; hook event dropped");
        return;
    }
    let mut raw = String::new();
    if let Err(err) = input.read_to_string(&mut raw) {
        tracing::warn!(error = %err, "failed to read hook event");
        return;
    }
    let event: Value = match serde_json::from_str(raw.trim()) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "hook event is not valid JSON");
            return;
        }
    };
    session_logger(config).before_tool_execute(&event);
}

pub(crate) fn session_logger(config: &Config) -> SessionLogger<FsHost> {
    SessionLogger::new(
        FsHost::new(&config.log_dir),
        config.root.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_appends_event_to_session_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = Config::new(tmp.path().to_path_buf(), None, true);
        let event = r#"{"tool":"bash","sessionID":"ses_h","args":{"command":"ls"}}"#;
        run_hook(&config, event.as_bytes());

        let log = std::fs::read_to_string(config.log_dir.join("ses_h.jsonl")).expect("log");
        let line: Value = serde_json::from_str(log.trim()).expect("json line");
        assert_eq!(line["argsPreview"]["command"], "ls");
        assert_eq!(line["directory"], &*tmp.path().to_string_lossy());
    }

    #[test]
    fn invalid_event_or_disabled_log_writes_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = Config::new(tmp.path().to_path_buf(), None, true);
        run_hook(&config, "not json".as_bytes());
        assert!(!config.log_dir.exists());

        let disabled = Config::new(tmp.path().to_path_buf(), None, false);
        run_hook(&disabled, r#"{"tool":"bash"}"#.as_bytes());
        assert!(!disabled.log_dir.exists());
    }
}
