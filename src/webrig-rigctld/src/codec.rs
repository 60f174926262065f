// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Encoding of rigctld commands and decoding of their replies.
//!
//! Lowercase commands query, uppercase commands set. Queries answer with the
//! bare value (two lines for `m`), setters answer with a status line where
//! `RPRT 0` means success and `RPRT -n` is a daemon error code.

use std::fmt;
use std::str::FromStr;

use webrig_core::{AgcMode, Func, Level, Parm, RigError, RigMode, RigResult};

/// Status line sent by rigctld for a successful set command.
pub const STATUS_OK: &str = "RPRT 0";

/// A single rigctld request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GetFreq,
    SetFreq(u64),
    GetMode,
    /// Passband 0 lets the daemon pick the default width for the mode.
    SetMode { mode: RigMode, passband: u32 },
    GetLevel(Level),
    SetLevel(Level, f64),
    GetFunc(Func),
    SetFunc(Func, bool),
    GetParm(Parm),
    SetParm(Parm, i32),
    GetRit,
    SetRit(i32),
}

impl Command {
    /// Request as sent on the wire, newline terminated.
    pub fn encode(&self) -> String {
        format!("{self}\n")
    }

    /// Number of reply lines the daemon sends on success.
    pub fn reply_lines(&self) -> usize {
        match self {
            Self::GetMode => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetFreq => write!(f, "f"),
            Self::SetFreq(hz) => write!(f, "F {hz}"),
            Self::GetMode => write!(f, "m"),
            Self::SetMode { mode, passband } => write!(f, "M {mode} {passband}"),
            Self::GetLevel(level) => write!(f, "l {level}"),
            Self::SetLevel(level, value) => write!(f, "L {level} {value:.2}"),
            Self::GetFunc(func) => write!(f, "u {func}"),
            Self::SetFunc(func, on) => write!(f, "U {func} {}", u8::from(*on)),
            Self::GetParm(parm) => write!(f, "p {parm}"),
            Self::SetParm(parm, value) => write!(f, "P {parm} {value}"),
            Self::GetRit => write!(f, "j"),
            Self::SetRit(offset) => write!(f, "J {offset}"),
        }
    }
}

/// Outcome of a set command whose exchange completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Accepted,
    /// The radio declined the request; carries the raw status line.
    Rejected(String),
}

impl CommandStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

pub fn decode_status(line: &str) -> CommandStatus {
    if line.trim() == STATUS_OK {
        CommandStatus::Accepted
    } else {
        CommandStatus::Rejected(line.trim().to_string())
    }
}

/// True when a line is a non-zero `RPRT` code, i.e. the daemon refused a
/// query instead of answering it.
pub fn is_error_status(line: &str) -> bool {
    line.trim()
        .strip_prefix("RPRT ")
        .is_some_and(|code| code.trim() != "0")
}

pub fn decode_int<T: FromStr>(command: &Command, line: &str) -> RigResult<T> {
    line.trim()
        .parse::<T>()
        .map_err(|_| RigError::decode(command.to_string(), line))
}

pub fn decode_float(command: &Command, line: &str) -> RigResult<f64> {
    match line.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RigError::decode(command.to_string(), line)),
    }
}

pub fn decode_flag(command: &Command, line: &str) -> RigResult<bool> {
    match line.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(RigError::decode(command.to_string(), line)),
    }
}

/// Decode the two-line `m` reply: mode name, then passband width in Hz.
pub fn decode_mode(command: &Command, lines: &[String]) -> RigResult<(RigMode, u32)> {
    let [mode, width] = lines else {
        return Err(RigError::decode(command.to_string(), lines.join("\\n")));
    };
    let mode = mode.trim();
    if mode.is_empty() || is_error_status(mode) {
        return Err(RigError::decode(command.to_string(), mode));
    }
    let width = decode_int::<u32>(command, width)?;
    Ok((RigMode::parse(mode), width))
}

/// Convert a daemon level fraction (0.0..=1.0) to whole percent.
pub fn level_to_percent(value: f64) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn percent_to_level(percent: u8) -> RigResult<f64> {
    if percent > 100 {
        return Err(RigError::invalid(format!(
            "percentage {percent} out of range 0-100"
        )));
    }
    Ok(f64::from(percent) / 100.0)
}

pub fn decode_agc(command: &Command, line: &str) -> RigResult<AgcMode> {
    decode_int::<i32>(command, line).map(AgcMode::from_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_queries() {
        assert_eq!(Command::GetFreq.encode(), "f\n");
        assert_eq!(Command::GetMode.encode(), "m\n");
        assert_eq!(Command::GetLevel(Level::Strength).encode(), "l STRENGTH\n");
        assert_eq!(Command::GetFunc(Func::BreakIn).encode(), "u BKIN\n");
        assert_eq!(Command::GetParm(Parm::Agc).encode(), "p AGC\n");
        assert_eq!(Command::GetRit.encode(), "j\n");
    }

    #[test]
    fn test_encode_setters() {
        assert_eq!(Command::SetFreq(7_074_000).encode(), "F 7074000\n");
        assert_eq!(
            Command::SetMode {
                mode: RigMode::CW,
                passband: 500
            }
            .encode(),
            "M CW 500\n"
        );
        assert_eq!(
            Command::SetLevel(Level::RfPower, 0.5).encode(),
            "L RFPOWER 0.50\n"
        );
        assert_eq!(Command::SetFunc(Func::Spot, true).encode(), "U SPOT 1\n");
        assert_eq!(Command::SetFunc(Func::Spot, false).encode(), "U SPOT 0\n");
        assert_eq!(Command::SetParm(Parm::Agc, 3).encode(), "P AGC 3\n");
        assert_eq!(Command::SetRit(-150).encode(), "J -150\n");
    }

    #[test]
    fn test_single_line_per_request() {
        let cmd = Command::SetMode {
            mode: RigMode::USB,
            passband: 0,
        };
        let line = cmd.encode();
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.is_ascii());
    }

    #[test]
    fn test_reply_lines() {
        assert_eq!(Command::GetMode.reply_lines(), 2);
        assert_eq!(Command::GetFreq.reply_lines(), 1);
        assert_eq!(Command::SetFreq(1).reply_lines(), 1);
    }

    #[test]
    fn test_set_freq_status_round_trip() {
        let cmd = Command::SetFreq(7_074_000);
        assert_eq!(cmd.encode(), "F 7074000\n");
        assert!(decode_status("RPRT 0").is_accepted());
        assert_eq!(
            decode_status("RPRT -1"),
            CommandStatus::Rejected("RPRT -1".into())
        );
        assert!(!decode_status("14074000").is_accepted());
        assert!(!decode_status("").is_accepted());
    }

    #[test]
    fn test_error_status_detection() {
        assert!(is_error_status("RPRT -11"));
        assert!(!is_error_status("RPRT 0"));
        assert!(!is_error_status("14074000"));
        assert!(!is_error_status("USB"));
    }

    #[test]
    fn test_decode_int() {
        assert_eq!(
            decode_int::<u64>(&Command::GetFreq, "14074000").unwrap(),
            14_074_000
        );
        assert_eq!(decode_int::<i32>(&Command::GetRit, "-100").unwrap(), -100);
        let err = decode_int::<u64>(&Command::GetFreq, "fourteen").unwrap_err();
        assert_eq!(err, RigError::decode("f", "fourteen"));
    }

    #[test]
    fn test_decode_float() {
        let cmd = Command::GetLevel(Level::RfGain);
        assert_eq!(decode_float(&cmd, "0.8").unwrap(), 0.8);
        assert!(decode_float(&cmd, "NaN").is_err());
        assert!(decode_float(&cmd, "RPRT -11").is_err());
    }

    #[test]
    fn test_decode_flag() {
        let cmd = Command::GetFunc(Func::Spot);
        assert!(decode_flag(&cmd, "1").unwrap());
        assert!(!decode_flag(&cmd, "0").unwrap());
        assert!(decode_flag(&cmd, "yes").is_err());
    }

    #[test]
    fn test_decode_mode() {
        let lines = vec!["USB".to_string(), "2400".to_string()];
        assert_eq!(
            decode_mode(&Command::GetMode, &lines).unwrap(),
            (RigMode::USB, 2400)
        );
        let refused = vec!["RPRT -11".to_string()];
        assert!(decode_mode(&Command::GetMode, &refused).is_err());
        let bad_width = vec!["CW".to_string(), "wide".to_string()];
        assert!(decode_mode(&Command::GetMode, &bad_width).is_err());
    }

    #[test]
    fn test_level_percent_boundaries() {
        assert_eq!(level_to_percent(1.0), 100);
        assert_eq!(level_to_percent(0.0), 0);
        assert_eq!(level_to_percent(0.8), 80);
        assert_eq!(level_to_percent(0.29), 29);
        assert_eq!(level_to_percent(1.7), 100);
        assert_eq!(level_to_percent(-0.2), 0);
    }

    #[test]
    fn test_percent_to_level() {
        assert_eq!(percent_to_level(50).unwrap(), 0.5);
        assert_eq!(percent_to_level(100).unwrap(), 1.0);
        assert!(percent_to_level(101).is_err());
    }

    #[test]
    fn test_decode_agc() {
        let cmd = Command::GetParm(Parm::Agc);
        assert_eq!(decode_agc(&cmd, "2").unwrap(), AgcMode::Med);
        assert_eq!(decode_agc(&cmd, "0").unwrap(), AgcMode::Off);
        assert_eq!(decode_agc(&cmd, "42").unwrap(), AgcMode::Med);
        assert!(decode_agc(&cmd, "slow").is_err());
    }
}
