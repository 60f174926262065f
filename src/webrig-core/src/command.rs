// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! JSON messages exchanged with browser sessions.

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::link::LinkState;
use crate::snapshot::RadioSnapshot;

/// Command received from a UI session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum UiCommand {
    SetFreq {
        value: u64,
    },
    SetMode {
        value: String,
        #[serde(default)]
        width: Option<u32>,
    },
    SetFilterWidth {
        value: u32,
        #[serde(default)]
        mode: Option<String>,
    },
    SetSpot {
        value: bool,
    },
    SetAgc {
        value: String,
    },
    SetRfGain {
        value: u8,
    },
    SetPower {
        value: u8,
    },
    SetBreakIn {
        value: bool,
    },
    SetRit {
        value: i32,
    },
    AdjustRit {
        value: i32,
    },
    GetState,
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetFreq { .. } => "set_freq",
            Self::SetMode { .. } => "set_mode",
            Self::SetFilterWidth { .. } => "set_filter_width",
            Self::SetSpot { .. } => "set_spot",
            Self::SetAgc { .. } => "set_agc",
            Self::SetRfGain { .. } => "set_rf_gain",
            Self::SetPower { .. } => "set_power",
            Self::SetBreakIn { .. } => "set_break_in",
            Self::SetRit { .. } => "set_rit",
            Self::AdjustRit { .. } => "adjust_rit",
            Self::GetState => "get_state",
        }
    }
}

/// Message pushed to a UI session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiMessage {
    State(RadioSnapshot),
    Link {
        state: LinkState,
    },
    /// The exchange completed; `success` is false when the radio declined.
    Ack {
        cmd: String,
        success: bool,
    },
    Error {
        kind: String,
        message: String,
    },
}

impl UiMessage {
    pub fn error(err: &RigError) -> Self {
        Self::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}
