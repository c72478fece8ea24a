#![forbid(unsafe_code)]

use serde_json::Value;
use std::io::{BufRead, Write};

const MAX_CONTENT_LENGTH_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TransportMode {
    NewlineJson,
    ContentLength,
}

impl TransportMode {
    /// Picks the framing from the first non-blank line a client sends.
    pub(crate) fn detect(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Some(Self::NewlineJson);
        }
        // Some clients send Content-Type before Content-Length.
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("content-length:") || lower.starts_with("content-type:") {
            return Some(Self::ContentLength);
        }
        None
    }

    pub(crate) fn write<W: Write>(self, writer: &mut W, resp: &Value) -> std::io::Result<()> {
        let body = serde_json::to_vec(resp)?;
        match self {
            Self::NewlineJson => {
                writer.write_all(&body)?;
                writer.write_all(b"\n")?;
            }
            Self::ContentLength => {
                write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
                writer.write_all(&body)?;
            }
        }
        writer.flush()
    }
}

fn parse_content_length_header(line: &str) -> Option<usize> {
    let (key, value) = line.trim().split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

/// Reads one framed message body. The mode is fixed by the first message and
/// kept for the rest of the connection so replies never mix framings.
pub(crate) struct FrameReader<R> {
    reader: R,
    mode: Option<TransportMode>,
}

impl<R: BufRead> FrameReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, mode: None }
    }

    pub(crate) fn mode(&self) -> Option<TransportMode> {
        self.mode
    }

    /// `Ok(None)` means the peer closed the stream.
    pub(crate) fn next_frame(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let mode = match self.mode {
                Some(mode) => mode,
                None => match TransportMode::detect(&line) {
                    Some(mode) => {
                        tracing::debug!(?mode, "transport framing detected");
                        self.mode = Some(mode);
                        mode
                    }
                    None => continue,
                },
            };
            if line.trim().is_empty() {
                continue;
            }
            match mode {
                TransportMode::NewlineJson => return Ok(Some(line.trim().as_bytes().to_vec())),
                TransportMode::ContentLength => return self.read_content_length_body(line),
            }
        }
    }

    fn read_content_length_body(&mut self, mut header: String) -> std::io::Result<Option<Vec<u8>>> {
        let mut content_length = parse_content_length_header(&header);
        while !header.trim_end().is_empty() {
            header.clear();
            if self.reader.read_line(&mut header)? == 0 {
                // EOF mid-header: treat as connection close.
                return Ok(None);
            }
            if content_length.is_none() {
                content_length = parse_content_length_header(&header);
            }
        }

        let Some(len) = content_length else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Missing Content-Length header",
            ));
        };
        if len > MAX_CONTENT_LENGTH_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Content-Length exceeds max allowed size",
            ));
        }

        let mut body = vec![0u8; len];
        self.reader.read_exact(&mut body)?;
        Ok(Some(body))
    }
}
