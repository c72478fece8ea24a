#![forbid(unsafe_code)]

//! Session-activity logger.
//!
//! Every "before tool execution" event the host emits becomes one JSON line in
//! a per-session file plus one line in the shared `sessions.jsonl` index.
//! Logging is best effort: a failing sink is reported through `tracing` and
//! never reaches the tool call being observed.
//!
//! The host is reached only through [`LoggerHost`]; [`FsHost`] is the
//! filesystem adapter used by the binaries.

mod host;
mod logger;
mod preview;
mod redact;
mod session;
mod snapshot;

pub use host::{FsHost, LoggerHost, SinkError};
pub use logger::{EVENT_TYPE, SESSIONS_INDEX, SessionLogger};
pub use preview::{MAX_PREVIEW_UNITS, args_preview, truncate};
pub use session::{UNKNOWN_SESSION, resolve_session_id, safe_filename};
pub use snapshot::{MAX_ARRAY_ITEMS, input_keys, safe_snapshot};
