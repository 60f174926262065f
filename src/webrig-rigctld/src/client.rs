// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Serialized access to the rigctld connection.
//!
//! rigctld answers strictly in request order and carries no request ids, so
//! one write and all of its reply lines form an indivisible exchange. The
//! session lock is held for the whole exchange; tokio's mutex queues waiters
//! in arrival order.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{watch, Mutex, Notify};
use tracing::{debug, info, warn};

use webrig_core::{AgcMode, Func, Level, Parm, RadioSnapshot, RigError, RigMode, RigResult};

use crate::codec::{self, Command, CommandStatus};
use crate::transport::{RigctldEndpoint, Session};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RigctldClient {
    endpoint: RigctldEndpoint,
    connect_timeout: Duration,
    session: Mutex<Option<Session>>,
    connected_tx: watch::Sender<bool>,
    teardown: Notify,
}

impl RigctldClient {
    pub fn new(endpoint: RigctldEndpoint, connect_timeout: Duration) -> Self {
        let (connected_tx, _) = watch::channel(false);
        Self {
            endpoint,
            connect_timeout,
            session: Mutex::new(None),
            connected_tx,
            teardown: Notify::new(),
        }
    }

    pub fn endpoint(&self) -> &RigctldEndpoint {
        &self.endpoint
    }

    pub fn connected(&self) -> bool {
        *self.connected_tx.borrow()
    }

    /// Watch the connected flag. It flips to false as soon as an exchange
    /// observes a broken session.
    pub fn subscribe_link(&self) -> watch::Receiver<bool> {
        self.connected_tx.subscribe()
    }

    /// Open a fresh session to the configured endpoint, replacing any
    /// existing one.
    pub async fn connect(&self) -> RigResult<()> {
        let session = Session::connect(&self.endpoint, self.connect_timeout).await?;
        self.install(session).await;
        info!("Connected to rigctld at {}", self.endpoint);
        Ok(())
    }

    /// Use an already established stream as the session.
    pub async fn attach<S>(&self, stream: S)
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        self.install(Session::new(stream, self.endpoint.connect_addr()))
            .await;
    }

    async fn install(&self, session: Session) {
        let mut guard = self.session.lock().await;
        debug!("rigctld session to {} installed", session.peer());
        if let Some(mut old) = guard.replace(session) {
            old.shutdown().await;
        }
        self.connected_tx.send_replace(true);
    }

    /// Close the session. Safe to call repeatedly and while an exchange is
    /// in flight; that exchange fails with a connection error.
    pub async fn disconnect(&self) {
        let was_connected = self.connected_tx.send_replace(false);
        self.teardown.notify_waiters();
        let mut guard = self.session.lock().await;
        if let Some(mut session) = guard.take() {
            session.shutdown().await;
        }
        // A reconnect queued ahead of us may have installed a session and
        // raised the flag again.
        self.connected_tx.send_replace(false);
        drop(guard);
        if was_connected {
            info!("Disconnected from rigctld at {}", self.endpoint);
        }
    }

    /// Send one command and collect its reply lines under the session lock.
    async fn exchange(&self, command: &Command) -> RigResult<Vec<String>> {
        if !self.connected() {
            return Err(RigError::NotConnected);
        }
        let mut guard = self.session.lock().await;

        let teardown = self.teardown.notified();
        tokio::pin!(teardown);
        teardown.as_mut().enable();
        // disconnect() may have run while this caller waited for the lock.
        if !self.connected() {
            return Err(RigError::NotConnected);
        }
        let Some(session) = guard.as_mut() else {
            self.connected_tx.send_replace(false);
            return Err(RigError::NotConnected);
        };

        let result = tokio::select! {
            result = round_trip(session, command) => result,
            _ = &mut teardown => Err(RigError::connection("session closed during exchange")),
        };

        if let Err(err) = &result {
            if err.is_connection() {
                if let Some(mut session) = guard.take() {
                    warn!(
                        "rigctld exchange '{}' with {} failed: {}",
                        command,
                        session.peer(),
                        err
                    );
                    session.shutdown().await;
                }
                self.connected_tx.send_replace(false);
            }
        }
        result
    }

    async fn query_line(&self, command: &Command) -> RigResult<String> {
        let lines = self.exchange(command).await?;
        Ok(lines.into_iter().next().unwrap_or_default())
    }

    async fn set(&self, command: Command) -> RigResult<CommandStatus> {
        let status = codec::decode_status(&self.query_line(&command).await?);
        if let CommandStatus::Rejected(reply) = &status {
            warn!("rigctld declined '{}': {}", command, reply);
        }
        Ok(status)
    }

    pub async fn get_freq(&self) -> RigResult<u64> {
        let command = Command::GetFreq;
        codec::decode_int(&command, &self.query_line(&command).await?)
    }

    /// Current mode and passband width in Hz.
    pub async fn get_mode(&self) -> RigResult<(RigMode, u32)> {
        let command = Command::GetMode;
        codec::decode_mode(&command, &self.exchange(&command).await?)
    }

    /// S-meter reading in dB relative to S9.
    pub async fn get_signal_strength(&self) -> RigResult<i32> {
        let command = Command::GetLevel(Level::Strength);
        codec::decode_int(&command, &self.query_line(&command).await?)
    }

    pub async fn get_level(&self, level: Level) -> RigResult<f64> {
        let command = Command::GetLevel(level);
        codec::decode_float(&command, &self.query_line(&command).await?)
    }

    pub async fn get_level_percent(&self, level: Level) -> RigResult<u8> {
        self.get_level(level).await.map(codec::level_to_percent)
    }

    pub async fn get_func(&self, func: Func) -> RigResult<bool> {
        let command = Command::GetFunc(func);
        codec::decode_flag(&command, &self.query_line(&command).await?)
    }

    pub async fn get_parm(&self, parm: Parm) -> RigResult<i32> {
        let command = Command::GetParm(parm);
        codec::decode_int(&command, &self.query_line(&command).await?)
    }

    pub async fn get_agc(&self) -> RigResult<AgcMode> {
        let command = Command::GetParm(Parm::Agc);
        codec::decode_agc(&command, &self.query_line(&command).await?)
    }

    /// RIT offset in Hz.
    pub async fn get_rit(&self) -> RigResult<i32> {
        let command = Command::GetRit;
        codec::decode_int(&command, &self.query_line(&command).await?)
    }

    pub async fn set_freq(&self, hz: u64) -> RigResult<CommandStatus> {
        if hz == 0 {
            return Err(RigError::invalid("frequency must be positive"));
        }
        self.set(Command::SetFreq(hz)).await
    }

    /// Passband 0 keeps the radio's default width for the mode.
    pub async fn set_mode(&self, mode: RigMode, passband: u32) -> RigResult<CommandStatus> {
        let name = mode.as_str();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RigError::invalid(format!("invalid mode name '{name}'")));
        }
        self.set(Command::SetMode { mode, passband }).await
    }

    pub async fn set_level(&self, level: Level, value: f64) -> RigResult<CommandStatus> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(RigError::invalid(format!(
                "{level} level {value} out of range 0.0-1.0"
            )));
        }
        self.set(Command::SetLevel(level, value)).await
    }

    pub async fn set_level_percent(&self, level: Level, percent: u8) -> RigResult<CommandStatus> {
        let value = codec::percent_to_level(percent)?;
        self.set(Command::SetLevel(level, value)).await
    }

    pub async fn set_func(&self, func: Func, on: bool) -> RigResult<CommandStatus> {
        self.set(Command::SetFunc(func, on)).await
    }

    pub async fn set_parm(&self, parm: Parm, value: i32) -> RigResult<CommandStatus> {
        self.set(Command::SetParm(parm, value)).await
    }

    pub async fn set_agc(&self, agc: AgcMode) -> RigResult<CommandStatus> {
        self.set(Command::SetParm(Parm::Agc, agc.code())).await
    }

    pub async fn set_rit(&self, offset: i32) -> RigResult<CommandStatus> {
        self.set(Command::SetRit(offset)).await
    }

    /// Read every snapshot field with one exchange each.
    ///
    /// The lock is released between exchanges, so other callers may
    /// interleave and fields can come from slightly different instants.
    /// Fields the radio refuses or garbles fall back to their defaults;
    /// a connection failure aborts the whole read.
    pub async fn get_state(&self) -> RigResult<RadioSnapshot> {
        let defaults = RadioSnapshot::default();

        let freq = or_default("freq", self.get_freq().await, defaults.freq)?;
        let (mode, filter_width) = or_default(
            "mode",
            self.get_mode().await,
            (defaults.mode, defaults.filter_width),
        )?;
        let smeter = or_default("smeter", self.get_signal_strength().await, defaults.smeter)?;
        let rf_gain = or_default(
            "rf_gain",
            self.get_level_percent(Level::RfGain).await,
            defaults.rf_gain,
        )?;
        let power = or_default(
            "power",
            self.get_level_percent(Level::RfPower).await,
            defaults.power,
        )?;
        let spot = or_default("spot", self.get_func(Func::Spot).await, defaults.spot)?;
        let agc = or_default("agc", self.get_agc().await, defaults.agc)?;
        let break_in = or_default(
            "break_in",
            self.get_func(Func::BreakIn).await,
            defaults.break_in,
        )?;
        let rit = or_default("rit", self.get_rit().await, defaults.rit)?;

        Ok(RadioSnapshot {
            freq,
            mode,
            filter_width,
            smeter,
            rf_gain,
            power,
            spot,
            agc,
            break_in,
            rit,
        })
    }
}

async fn round_trip(session: &mut Session, command: &Command) -> RigResult<Vec<String>> {
    session.write_line(&command.encode()).await?;
    let expected = command.reply_lines();
    let mut lines = Vec::with_capacity(expected);
    while lines.len() < expected {
        let line = session.read_line().await?;
        // A refused query gets a single status line instead of its reply.
        let refused = codec::is_error_status(&line);
        lines.push(line);
        if refused {
            break;
        }
    }
    Ok(lines)
}

fn or_default<T>(field: &str, result: RigResult<T>, default: T) -> RigResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_connection() => Err(err),
        Err(err) => {
            debug!("state field '{}' unavailable: {}", field, err);
            Ok(default)
        }
    }
}
