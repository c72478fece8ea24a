#![forbid(unsafe_code)]

mod jsonrpc;
mod logging;

pub(crate) use jsonrpc::*;
pub(crate) use logging::*;
