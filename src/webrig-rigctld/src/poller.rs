// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

use webrig_core::RadioSnapshot;

use crate::client::RigctldClient;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Periodically read the radio state and publish it on `state_tx`.
///
/// Ticks are skipped while the link is down. A connection failure is
/// expected during link loss and only warned about; the client has already
/// cleared its connected flag, which wakes the supervisor. Any other failure
/// is logged as a fault. Neither stops the loop.
pub async fn run_poller(
    client: Arc<RigctldClient>,
    interval: Duration,
    state_tx: watch::Sender<Option<RadioSnapshot>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("State poller started ({:?} interval)", interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown_rx.changed() => {
                match changed {
                    Ok(()) if *shutdown_rx.borrow() => break,
                    Ok(()) => continue,
                    Err(_) => break,
                }
            }
        }

        if !client.connected() {
            continue;
        }

        match client.get_state().await {
            Ok(snapshot) => {
                state_tx.send_replace(Some(snapshot));
            }
            Err(e) if e.is_connection() => warn!("State poll failed: {}", e),
            Err(e) => error!("State poll fault: {}", e),
        }
    }
    info!("State poller stopped");
}
