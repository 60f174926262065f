// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Radio vocabulary shared between the rigctld client and the frontends.
//!
//! Level, function and parameter names are closed sets. Anything outside
//! them is rejected at the boundary instead of being forwarded to the
//! daemon as a raw string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// Operating mode as reported by rigctld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RigMode {
    LSB,
    USB,
    CW,
    CWR,
    AM,
    FM,
    WFM,
    RTTY,
    RTTYR,
    PKTLSB,
    PKTUSB,
    PKTFM,
    Other(String),
}

impl RigMode {
    /// Parse a mode name. Unknown names are kept verbatim as `Other` since
    /// the daemon may report backend-specific modes.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "LSB" => Self::LSB,
            "USB" => Self::USB,
            "CW" => Self::CW,
            "CWR" => Self::CWR,
            "AM" => Self::AM,
            "FM" => Self::FM,
            "WFM" => Self::WFM,
            "RTTY" => Self::RTTY,
            "RTTYR" => Self::RTTYR,
            "PKTLSB" => Self::PKTLSB,
            "PKTUSB" | "DATA" => Self::PKTUSB,
            "PKTFM" => Self::PKTFM,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::LSB => "LSB",
            Self::USB => "USB",
            Self::CW => "CW",
            Self::CWR => "CWR",
            Self::AM => "AM",
            Self::FM => "FM",
            Self::WFM => "WFM",
            Self::RTTY => "RTTY",
            Self::RTTYR => "RTTYR",
            Self::PKTLSB => "PKTLSB",
            Self::PKTUSB => "PKTUSB",
            Self::PKTFM => "PKTFM",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for RigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RigMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RigMode> for String {
    fn from(value: RigMode) -> Self {
        value.as_str().to_string()
    }
}

/// Declares a closed enum of rigctld names with `FromStr`/`Display`.
macro_rules! rig_names {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name as spelled on the rigctld wire.
            pub fn wire_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.wire_name())
            }
        }

        impl FromStr for $name {
            type Err = RigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_uppercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.wire_name() == wanted)
                    .ok_or_else(|| RigError::UnknownName {
                        kind: $kind,
                        name: s.trim().to_string(),
                    })
            }
        }
    };
}

rig_names!(
    /// Named level (`l` / `L`). Values are fractions in 0.0..=1.0 except
    /// STRENGTH, which the daemon reports as a signed integer.
    Level, "level", {
        Strength => "STRENGTH",
        RfGain => "RFGAIN",
        RfPower => "RFPOWER",
        Af => "AF",
        Sql => "SQL",
    }
);

rig_names!(
    /// Named boolean function (`u` / `U`).
    Func, "function", {
        Spot => "SPOT",
        BreakIn => "BKIN",
        Nb => "NB",
        Nr => "NR",
        Anf => "ANF",
        Vox => "VOX",
    }
);

rig_names!(
    /// Named integer parameter (`p` / `P`).
    Parm, "parameter", {
        Agc => "AGC",
        Beep => "BEEP",
        Backlight => "BACKLIGHT",
        Apo => "APO",
    }
);

/// Automatic gain control setting carried by the AGC parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgcMode {
    Off,
    Slow,
    #[default]
    Med,
    Fast,
}

impl AgcMode {
    /// Map a daemon code to a setting. Codes outside the enumerated range are
    /// device specific and fall back to the default instead of failing.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Off,
            1 => Self::Slow,
            2 => Self::Med,
            3 => Self::Fast,
            _ => Self::default(),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Off => 0,
            Self::Slow => 1,
            Self::Med => 2,
            Self::Fast => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Slow => "SLOW",
            Self::Med => "MED",
            Self::Fast => "FAST",
        }
    }
}

impl fmt::Display for AgcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgcMode {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OFF" => Ok(Self::Off),
            "SLOW" => Ok(Self::Slow),
            "MED" | "MEDIUM" => Ok(Self::Med),
            "FAST" => Ok(Self::Fast),
            other => Err(RigError::invalid(format!("unknown AGC setting '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_standard_modes() {
        assert_eq!(RigMode::parse("USB"), RigMode::USB);
        assert_eq!(RigMode::parse("lsb"), RigMode::LSB);
        assert_eq!(RigMode::parse("CWR"), RigMode::CWR);
        assert_eq!(RigMode::parse("PKTUSB"), RigMode::PKTUSB);
    }

    #[test]
    fn test_parse_mode_data_alias() {
        assert_eq!(RigMode::parse("DATA"), RigMode::PKTUSB);
    }

    #[test]
    fn test_parse_mode_unknown_kept() {
        assert_eq!(RigMode::parse("ECSSUSB"), RigMode::Other("ECSSUSB".into()));
        assert_eq!(RigMode::parse("ECSSUSB").to_string(), "ECSSUSB");
    }

    #[test]
    fn test_mode_serializes_as_string() {
        let json = serde_json::to_string(&RigMode::CW).unwrap();
        assert_eq!(json, "\"CW\"");
        let back: RigMode = serde_json::from_str("\"fm\"").unwrap();
        assert_eq!(back, RigMode::FM);
    }

    #[test]
    fn test_level_names() {
        assert_eq!("RFGAIN".parse::<Level>().unwrap(), Level::RfGain);
        assert_eq!("rfpower".parse::<Level>().unwrap(), Level::RfPower);
        assert_eq!(Level::Strength.to_string(), "STRENGTH");
    }

    #[test]
    fn test_unknown_names_rejected() {
        let err = "RFGAN".parse::<Level>().unwrap_err();
        assert_eq!(
            err,
            RigError::UnknownName {
                kind: "level",
                name: "RFGAN".into()
            }
        );
        assert!("QSK".parse::<Func>().is_err());
        assert!("AGCX".parse::<Parm>().is_err());
    }

    #[test]
    fn test_func_and_parm_names() {
        assert_eq!("BKIN".parse::<Func>().unwrap(), Func::BreakIn);
        assert_eq!(Func::Spot.wire_name(), "SPOT");
        assert_eq!("agc".parse::<Parm>().unwrap(), Parm::Agc);
    }

    #[test]
    fn test_agc_codes() {
        assert_eq!(AgcMode::from_code(0), AgcMode::Off);
        assert_eq!(AgcMode::from_code(1), AgcMode::Slow);
        assert_eq!(AgcMode::from_code(2), AgcMode::Med);
        assert_eq!(AgcMode::from_code(3), AgcMode::Fast);
        for agc in [AgcMode::Off, AgcMode::Slow, AgcMode::Med, AgcMode::Fast] {
            assert_eq!(AgcMode::from_code(agc.code()), agc);
        }
    }

    #[test]
    fn test_agc_unknown_code_falls_back() {
        assert_eq!(AgcMode::from_code(6), AgcMode::Med);
        assert_eq!(AgcMode::from_code(-1), AgcMode::Med);
    }

    #[test]
    fn test_agc_names() {
        assert_eq!("fast".parse::<AgcMode>().unwrap(), AgcMode::Fast);
        assert!("TURBO".parse::<AgcMode>().is_err());
        assert_eq!(serde_json::to_string(&AgcMode::Med).unwrap(), "\"MED\"");
    }
}
