// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use serde::{Deserialize, Serialize};

use crate::radio::{AgcMode, RigMode};

/// Point-in-time view of the tracked radio attributes.
///
/// Built from several sequential exchanges, so fields may come from slightly
/// different instants. Consumers only need approximate display consistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioSnapshot {
    /// VFO frequency in Hz.
    pub freq: u64,
    pub mode: RigMode,
    /// Passband width in Hz.
    pub filter_width: u32,
    /// Signal strength as reported by the STRENGTH level.
    pub smeter: i32,
    /// RF gain, percent.
    pub rf_gain: u8,
    /// Transmit power, percent.
    pub power: u8,
    pub spot: bool,
    pub agc: AgcMode,
    pub break_in: bool,
    /// RIT offset in Hz.
    pub rit: i32,
}

impl Default for RadioSnapshot {
    /// Values reported for attributes the radio does not answer.
    fn default() -> Self {
        Self {
            freq: 0,
            mode: RigMode::USB,
            filter_width: 2400,
            smeter: -100,
            rf_gain: 80,
            power: 50,
            spot: false,
            agc: AgcMode::Med,
            break_in: false,
            rit: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_keys() {
        let snapshot = RadioSnapshot {
            freq: 14_074_000,
            mode: RigMode::USB,
            filter_width: 2400,
            smeter: -65,
            rf_gain: 80,
            power: 50,
            spot: true,
            agc: AgcMode::Med,
            break_in: false,
            rit: 100,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["freq"], 14_074_000);
        assert_eq!(value["mode"], "USB");
        assert_eq!(value["filter_width"], 2400);
        assert_eq!(value["smeter"], -65);
        assert_eq!(value["agc"], "MED");
        assert_eq!(value["spot"], true);
        assert_eq!(value["rit"], 100);
    }
}
