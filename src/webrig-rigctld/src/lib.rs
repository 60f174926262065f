// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! rigctld protocol client.
//!
//! rigctld speaks a half-duplex ASCII protocol over TCP: one command per
//! line, exactly one reply per command on the same connection, and no
//! request identifiers. [`RigctldClient`] owns the single connection and
//! keeps every write paired with its own reply, [`Supervisor`] re-establishes
//! the connection and [`run_poller`] republishes the radio state.

pub mod client;
pub mod codec;
pub mod poller;
pub mod supervisor;
pub mod transport;

#[cfg(test)]
mod mock;

pub use client::{RigctldClient, DEFAULT_CONNECT_TIMEOUT};
pub use codec::{Command, CommandStatus};
pub use poller::{run_poller, DEFAULT_POLL_INTERVAL};
pub use supervisor::{ReconnectPolicy, Supervisor};
pub use transport::{parse_endpoint, RigctldEndpoint, Session, DEFAULT_RIGCTLD_PORT};
