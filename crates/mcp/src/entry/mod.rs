#![forbid(unsafe_code)]

pub(crate) mod framing;
mod hook;
mod stdio;

pub(crate) use hook::{run_hook, session_logger};
pub(crate) use stdio::run_stdio;
