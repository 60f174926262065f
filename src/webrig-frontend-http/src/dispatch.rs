// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Translation of UI commands into rigctld requests.

use tracing::{debug, warn};

use webrig_core::{
    AgcMode, Func, Level, RadioSnapshot, RigError, RigMode, RigResult, UiCommand, UiMessage,
};
use webrig_rigctld::{CommandStatus, RigctldClient};

enum Outcome {
    Status(CommandStatus),
    State(RadioSnapshot),
}

/// Parse one text frame from a browser session.
pub fn parse_command(text: &str) -> Result<UiCommand, UiMessage> {
    serde_json::from_str(text).map_err(|e| {
        debug!("Rejected UI frame {:?}: {}", text, e);
        UiMessage::error(&RigError::invalid(format!("malformed command: {e}")))
    })
}

/// Run a command and build the reply for the session that sent it.
pub async fn execute(client: &RigctldClient, command: UiCommand) -> UiMessage {
    let name = command.name();
    match run(client, command).await {
        Ok(Outcome::Status(status)) => UiMessage::Ack {
            cmd: name.to_string(),
            success: status.is_accepted(),
        },
        Ok(Outcome::State(snapshot)) => UiMessage::State(snapshot),
        Err(e) => {
            if !e.is_connection() {
                warn!("UI command {} failed: {}", name, e);
            }
            UiMessage::error(&e)
        }
    }
}

async fn run(client: &RigctldClient, command: UiCommand) -> RigResult<Outcome> {
    let status = match command {
        UiCommand::SetFreq { value } => client.set_freq(value).await?,
        UiCommand::SetMode { value, width } => {
            client
                .set_mode(RigMode::parse(&value), width.unwrap_or(0))
                .await?
        }
        UiCommand::SetFilterWidth { value, mode } => {
            let mode = match mode {
                Some(mode) => RigMode::parse(&mode),
                None => client.get_mode().await?.0,
            };
            client.set_mode(mode, value).await?
        }
        UiCommand::SetSpot { value } => client.set_func(Func::Spot, value).await?,
        UiCommand::SetAgc { value } => client.set_agc(value.parse::<AgcMode>()?).await?,
        UiCommand::SetRfGain { value } => client.set_level_percent(Level::RfGain, value).await?,
        UiCommand::SetPower { value } => client.set_level_percent(Level::RfPower, value).await?,
        UiCommand::SetBreakIn { value } => client.set_func(Func::BreakIn, value).await?,
        UiCommand::SetRit { value } => client.set_rit(value).await?,
        UiCommand::AdjustRit { value } => {
            // Read-modify-write over two exchanges; another writer may slip in
            // between them.
            let current = client.get_rit().await?;
            let target = current
                .checked_add(value)
                .ok_or_else(|| RigError::invalid(format!("RIT offset {current}{value:+} overflows")))?;
            client.set_rit(target).await?
        }
        UiCommand::GetState => return client.get_state().await.map(Outcome::State),
    };
    Ok(Outcome::Status(status))
}
