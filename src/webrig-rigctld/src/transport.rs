// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Line-oriented session over a byte stream.
//!
//! Every I/O failure and end-of-stream is reported as
//! [`RigError::Connection`], so callers can tell an unreachable radio apart
//! from a malformed reply.

use std::fmt;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time;
use tracing::debug;

use webrig_core::{RigError, RigResult};

pub const DEFAULT_RIGCTLD_PORT: u16 = 4532;
const MAX_LINE_BYTES: usize = 4 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RigctldEndpoint {
    pub host: String,
    pub port: u16,
}

impl RigctldEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn connect_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for RigctldEndpoint {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_RIGCTLD_PORT)
    }
}

impl fmt::Display for RigctldEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.connect_addr())
    }
}

type LineReader = BufReader<Box<dyn AsyncRead + Send + Unpin>>;
type LineWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// An open connection to rigctld.
pub struct Session {
    reader: LineReader,
    writer: LineWriter,
    peer: String,
}

impl Session {
    /// Open a TCP connection, failing with a connection error on refusal or
    /// when `timeout` elapses first.
    pub async fn connect(endpoint: &RigctldEndpoint, timeout: Duration) -> RigResult<Self> {
        let addr = endpoint.connect_addr();
        let stream = time::timeout(timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| RigError::connection(format!("connect to {addr} timed out after {timeout:?}")))?
            .map_err(|e| RigError::connection(format!("connect to {addr} failed: {e}")))?;
        let _ = stream.set_nodelay(true);
        Ok(Self::new(stream, addr))
    }

    /// Wrap an already established stream.
    pub fn new<S>(stream: S, peer: impl Into<String>) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        let reader: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        Self {
            reader: BufReader::new(reader),
            writer: Box::new(writer),
            peer: peer.into(),
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub async fn write_line(&mut self, line: &str) -> RigResult<()> {
        debug!("-> rigctld: {}", line.trim_end());
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| RigError::connection(format!("write failed: {e}")))?;
        self.writer
            .flush()
            .await
            .map_err(|e| RigError::connection(format!("flush failed: {e}")))
    }

    /// Read one reply line with surrounding whitespace removed.
    ///
    /// An oversized or non-UTF-8 line leaves the stream at an unknown
    /// position, so it is reported as a connection failure and the session
    /// must be dropped.
    pub async fn read_line(&mut self) -> RigResult<String> {
        let line = read_limited_line(&mut self.reader, MAX_LINE_BYTES)
            .await
            .map_err(|e| RigError::connection(format!("read failed: {e}")))?
            .ok_or_else(|| RigError::connection("connection closed by rigctld"))?;
        let line = line.trim().to_string();
        debug!("<- rigctld: {}", line);
        Ok(line)
    }

    pub async fn shutdown(&mut self) {
        let _ = self.writer.shutdown().await;
    }
}

async fn read_limited_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    max_bytes: usize,
) -> std::io::Result<Option<String>> {
    let mut line = Vec::with_capacity(64);
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            // A partial line without terminator at EOF is not a reply.
            return Ok(None);
        }

        let (chunk_len, done) = match available.iter().position(|b| *b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };
        if line.len() + chunk_len > max_bytes {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("line exceeds maximum size of {max_bytes} bytes"),
            ));
        }
        line.extend_from_slice(&available[..chunk_len]);
        reader.consume(chunk_len);

        if done {
            let text = String::from_utf8(line).map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("line is not valid UTF-8: {e}"),
                )
            })?;
            return Ok(Some(text));
        }
    }
}

/// Parse `host`, `host:port`, `[v6]` or `[v6]:port`, optionally prefixed
/// with `tcp://`.
pub fn parse_endpoint(input: &str) -> Result<RigctldEndpoint, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("rigctld address is empty".into());
    }
    let addr = trimmed.strip_prefix("tcp://").unwrap_or(trimmed);

    if let Some(rest) = addr.strip_prefix('[') {
        let closing = rest
            .find(']')
            .ok_or("invalid rigctld address: missing closing ']' for IPv6 host")?;
        let host = &rest[..closing];
        let remainder = &rest[closing + 1..];
        if host.is_empty() {
            return Err("invalid rigctld address: host is empty".into());
        }
        let port = if remainder.is_empty() {
            DEFAULT_RIGCTLD_PORT
        } else if let Some(port_str) = remainder.strip_prefix(':') {
            parse_port(port_str)?
        } else {
            return Err("invalid rigctld address: expected ':<port>' after ']'".into());
        };
        return Ok(RigctldEndpoint::new(host, port));
    }

    match addr.matches(':').count() {
        0 => Ok(RigctldEndpoint::new(addr, DEFAULT_RIGCTLD_PORT)),
        1 => {
            let (host, port_str) = addr
                .rsplit_once(':')
                .ok_or("invalid rigctld address: expected host:port")?;
            if host.is_empty() {
                return Err("invalid rigctld address: host is empty".into());
            }
            Ok(RigctldEndpoint::new(host, parse_port(port_str)?))
        }
        _ => Err("invalid rigctld address: IPv6 host must be bracketed like [::1]:4532".into()),
    }
}

fn parse_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str
        .parse()
        .map_err(|_| format!("invalid rigctld port: '{port_str}'"))?;
    if port == 0 {
        return Err("invalid rigctld port: 0".into());
    }
    Ok(port)
}
