#![forbid(unsafe_code)]

use super::framing::{FrameReader, TransportMode};
use crate::{McpServer, parse_request};
use std::io::{BufRead, Write};

/// Serves requests until the reader reaches EOF.
pub(crate) fn run_stdio<R: BufRead, W: Write>(
    server: &mut McpServer,
    reader: R,
    writer: &mut W,
) -> std::io::Result<()> {
    let mut frames = FrameReader::new(reader);
    while let Some(body) = frames.next_frame()? {
        let mode = frames.mode().unwrap_or(TransportMode::NewlineJson);
        let resp = match parse_request(&body) {
            Ok(request) => server.handle(request),
            Err(resp) => Some(resp),
        };
        if let Some(resp) = resp {
            mode.write(writer, &resp)?;
        }
    }
    Ok(())
}
