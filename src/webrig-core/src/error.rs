// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use thiserror::Error;

/// Error type returned by rigctld requests.
///
/// Connection failures are always safe to retry once the link is back.
/// Decode failures mean the daemon answered something this client does not
/// understand for the command it issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RigError {
    #[error("not connected to rigctld")]
    NotConnected,

    #[error("rigctld connection failed: {0}")]
    Connection(String),

    #[error("unexpected reply to '{command}': {reply:?}")]
    Decode { command: String, reply: String },

    #[error("unknown {kind} name '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

pub type RigResult<T> = Result<T, RigError>;

impl RigError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn decode(command: impl Into<String>, reply: impl Into<String>) -> Self {
        Self::Decode {
            command: command.into(),
            reply: reply.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    /// True for errors that mean "radio unreachable" rather than "radio
    /// misbehaved" or "caller sent garbage".
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::NotConnected | Self::Connection(_))
    }

    /// Short machine-readable category used by frontends.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConnected | Self::Connection(_) => "connection",
            Self::Decode { .. } => "decode",
            Self::UnknownName { .. } | Self::InvalidValue(_) => "invalid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_classification() {
        assert!(RigError::NotConnected.is_connection());
        assert!(RigError::connection("reset by peer").is_connection());
        assert!(!RigError::decode("f", "abc").is_connection());
        assert!(!RigError::invalid("x").is_connection());
    }

    #[test]
    fn test_kind() {
        assert_eq!(RigError::NotConnected.kind(), "connection");
        assert_eq!(RigError::decode("m", "").kind(), "decode");
        assert_eq!(
            RigError::UnknownName {
                kind: "level",
                name: "RFGAN".into()
            }
            .kind(),
            "invalid"
        );
    }

    #[test]
    fn test_display() {
        let err = RigError::decode("l RFGAIN", "RPRT -11");
        assert_eq!(
            err.to_string(),
            "unexpected reply to 'l RFGAIN': \"RPRT -11\""
        );
    }
}
