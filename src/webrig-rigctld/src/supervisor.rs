// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{info, warn};

use webrig_core::LinkState;

use crate::client::RigctldClient;

/// Retry schedule for establishing the rigctld link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Connection attempts made by [`Supervisor::startup`].
    pub startup_attempts: u32,
    /// Pause between startup attempts.
    pub startup_spacing: Duration,
    /// Pause between attempts after the link is lost. Constant, no cap on
    /// the number of attempts.
    pub reconnect_interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            startup_attempts: 3,
            startup_spacing: Duration::from_secs(2),
            reconnect_interval: Duration::from_secs(5),
        }
    }
}

/// Owns the connect/reconnect lifecycle of a [`RigctldClient`].
///
/// The supervisor is the only component that retries. It learns about a
/// lost link from the client's connected flag, which the client clears as
/// soon as an exchange hits a transport failure.
pub struct Supervisor {
    client: Arc<RigctldClient>,
    policy: ReconnectPolicy,
    state_tx: watch::Sender<LinkState>,
}

impl Supervisor {
    pub fn new(client: Arc<RigctldClient>, policy: ReconnectPolicy) -> Self {
        let (state_tx, _) = watch::channel(LinkState::Disconnected);
        Self {
            client,
            policy,
            state_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LinkState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> LinkState {
        *self.state_tx.borrow()
    }

    fn set_state(&self, state: LinkState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            info!("rigctld link: {} -> {}", previous, state);
        }
    }

    /// Make the bounded startup attempts.
    ///
    /// Returns the resulting state instead of failing; an unreachable daemon
    /// leaves the process running in [`LinkState::Disconnected`].
    pub async fn startup(&self) -> LinkState {
        let attempts = self.policy.startup_attempts.max(1);
        self.set_state(LinkState::Connecting);
        for attempt in 1..=attempts {
            match self.client.connect().await {
                Ok(()) => {
                    self.set_state(LinkState::Connected);
                    return LinkState::Connected;
                }
                Err(e) => warn!(
                    "rigctld connect attempt {}/{} to {} failed: {}",
                    attempt,
                    attempts,
                    self.client.endpoint(),
                    e
                ),
            }
            if attempt < attempts {
                time::sleep(self.policy.startup_spacing).await;
            }
        }
        warn!(
            "rigctld at {} unreachable after {} attempts, continuing disconnected",
            self.client.endpoint(),
            attempts
        );
        self.set_state(LinkState::Disconnected);
        LinkState::Disconnected
    }

    /// Watch the link and reconnect whenever it is down, until shutdown.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut link_rx = self.client.subscribe_link();
        loop {
            if *shutdown_rx.borrow() {
                info!("Supervisor shutting down");
                return;
            }

            if *link_rx.borrow_and_update() {
                self.set_state(LinkState::Connected);
                tokio::select! {
                    changed = link_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }
                continue;
            }

            match self.state() {
                LinkState::Connected | LinkState::Connecting => {
                    warn!("rigctld link to {} lost", self.client.endpoint());
                    self.set_state(LinkState::Reconnecting);
                }
                LinkState::Reconnecting | LinkState::Disconnected => {}
            }

            match self.client.connect().await {
                Ok(()) => {
                    self.set_state(LinkState::Connected);
                    continue;
                }
                Err(e) => warn!("rigctld reconnect to {} failed: {}", self.client.endpoint(), e),
            }

            tokio::select! {
                _ = time::sleep(self.policy.reconnect_interval) => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }
}
