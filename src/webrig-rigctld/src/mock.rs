// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Fake rigctld daemons for tests.

use std::collections::HashMap;

use tokio::io::{
    duplex, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Spawn a daemon on one end of an in-memory pipe and return the other end.
///
/// `handler` receives each request line without its terminator and returns
/// the reply lines, or `None` to hang up.
pub(crate) fn spawn_daemon<F>(handler: F) -> DuplexStream
where
    F: FnMut(&str) -> Option<Vec<String>> + Send + 'static,
{
    let (client, daemon) = duplex(64 * 1024);
    tokio::spawn(serve(daemon, handler));
    client
}

/// Accept TCP connections forever, each backed by a fresh [`FakeRig`].
pub(crate) fn serve_tcp(listener: TcpListener) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let mut rig = FakeRig::default();
            tokio::spawn(serve(stream, move |line| Some(rig.handle(line))));
        }
    })
}

async fn serve<S, F>(stream: S, mut handler: F)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
    F: FnMut(&str) -> Option<Vec<String>> + Send + 'static,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some(replies) = handler(line.trim()) else {
            break;
        };
        for reply in replies {
            if writer.write_all(format!("{reply}\n").as_bytes()).await.is_err() {
                return;
            }
        }
    }
}

/// Reply with a fixed sequence of lines, one per request line, regardless
/// of what is asked. Hangs up when the script runs out.
pub(crate) fn scripted(lines: &[&str]) -> DuplexStream {
    let mut script: Vec<String> = lines.iter().rev().map(|s| s.to_string()).collect();
    spawn_daemon(move |request| {
        let reply = script.pop()?;
        if request == "m" {
            let width = script.pop()?;
            return Some(vec![reply, width]);
        }
        Some(vec![reply])
    })
}

/// Small stateful radio model answering the command subset the client uses.
pub(crate) struct FakeRig {
    pub freq: u64,
    pub mode: String,
    pub width: u32,
    pub levels: HashMap<String, String>,
    pub funcs: HashMap<String, bool>,
    pub parms: HashMap<String, i32>,
    pub rit: i32,
    /// Command letters answered with `RPRT -11`.
    pub refused: Vec<&'static str>,
}

impl Default for FakeRig {
    fn default() -> Self {
        let levels = [("STRENGTH", "-65"), ("RFGAIN", "0.800000"), ("RFPOWER", "0.500000")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            freq: 14_074_000,
            mode: "USB".into(),
            width: 2400,
            levels,
            funcs: HashMap::new(),
            parms: HashMap::new(),
            rit: 0,
            refused: Vec::new(),
        }
    }
}

impl FakeRig {
    pub fn handle(&mut self, line: &str) -> Vec<String> {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        if self.refused.iter().any(|r| *r == cmd) {
            return vec!["RPRT -11".into()];
        }
        let ok = || vec!["RPRT 0".to_string()];
        let einval = || vec!["RPRT -1".to_string()];
        match (cmd, args.as_slice()) {
            ("f", []) => vec![self.freq.to_string()],
            ("F", [hz]) => match hz.parse() {
                Ok(hz) => {
                    self.freq = hz;
                    ok()
                }
                Err(_) => einval(),
            },
            ("m", []) => vec![self.mode.clone(), self.width.to_string()],
            ("M", [mode, width]) => {
                self.mode = mode.to_string();
                match width.parse::<u32>() {
                    Ok(0) => {}
                    Ok(w) => self.width = w,
                    Err(_) => return einval(),
                }
                ok()
            }
            ("l", [name]) => match self.levels.get(*name) {
                Some(value) => vec![value.clone()],
                None => vec!["RPRT -11".into()],
            },
            ("L", [name, value]) => {
                self.levels.insert(name.to_string(), value.to_string());
                ok()
            }
            ("u", [name]) => {
                let on = self.funcs.get(*name).copied().unwrap_or(false);
                vec![if on { "1" } else { "0" }.into()]
            }
            ("U", [name, value]) => {
                self.funcs.insert(name.to_string(), *value == "1");
                ok()
            }
            ("p", [name]) => vec![self.parms.get(*name).copied().unwrap_or(0).to_string()],
            ("P", [name, value]) => match value.parse() {
                Ok(v) => {
                    self.parms.insert(name.to_string(), v);
                    ok()
                }
                Err(_) => einval(),
            },
            ("j", []) => vec![self.rit.to_string()],
            ("J", [offset]) => match offset.parse() {
                Ok(v) => {
                    self.rit = v;
                    ok()
                }
                Err(_) => einval(),
            },
            _ => vec!["RPRT -4".into()],
        }
    }

    pub fn spawn(mut self) -> DuplexStream {
        spawn_daemon(move |line| Some(self.handle(line)))
    }
}
