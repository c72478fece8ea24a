#![forbid(unsafe_code)]

use serde_json::Value;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::session::{UNKNOWN_SESSION, resolve_session_id};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("create log dir {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("append to {}: {source}", path.display())]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid log file name {0:?}")]
    InvalidName(String),
}

/// What the logger needs from the host runtime.
pub trait LoggerHost {
    /// Appends `line` plus a newline to the log file called `file_name`.
    fn append_line(&self, file_name: &str, line: &str) -> Result<(), SinkError>;

    fn session_id(&self, event: &Value) -> String {
        resolve_session_id(event).unwrap_or_else(|| UNKNOWN_SESSION.to_string())
    }
}

/// Writes log files into one directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct FsHost {
    log_dir: PathBuf,
}

impl FsHost {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

impl LoggerHost for FsHost {
    fn append_line(&self, file_name: &str, line: &str) -> Result<(), SinkError> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(SinkError::InvalidName(file_name.to_string()));
        }
        std::fs::create_dir_all(&self.log_dir).map_err(|source| SinkError::CreateDir {
            path: self.log_dir.clone(),
            source,
        })?;

        let path = self.log_dir.join(file_name);
        let mut payload = String::with_capacity(line.len() + 1);
        payload.push_str(line);
        payload.push('\n');

        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| file.write_all(payload.as_bytes()))
            .map_err(|source| SinkError::Append { path, source })
    }
}
