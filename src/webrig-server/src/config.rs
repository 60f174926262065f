// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for webrig-server.
//!
//! Settings live in the `[webrig-server]` section of `webrig.toml`, searched in:
//! 1. Path specified via `--config` CLI argument
//! 2. `./webrig.toml` (current directory)
//! 3. `~/.config/webrig/webrig.toml` (XDG config)
//! 4. `/etc/webrig/webrig.toml` (system-wide)

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use webrig_app::{parse_level, ConfigError, ConfigFile};
use webrig_rigctld::{ReconnectPolicy, RigctldEndpoint};

/// Top-level server configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub general: GeneralConfig,
    pub rigctld: RigctldConfig,
    pub polling: PollingConfig,
    pub http: HttpConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// rigctld connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RigctldConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout_ms: u64,
    /// Connection attempts made at startup before running disconnected.
    pub startup_attempts: u32,
    pub startup_retry_ms: u64,
    /// Pause between attempts after the link is lost.
    pub reconnect_interval_ms: u64,
}

impl Default for RigctldConfig {
    fn default() -> Self {
        let policy = ReconnectPolicy::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 4532,
            connect_timeout_ms: 5000,
            startup_attempts: policy.startup_attempts,
            startup_retry_ms: policy.startup_spacing.as_millis() as u64,
            reconnect_interval_ms: policy.reconnect_interval.as_millis() as u64,
        }
    }
}

impl RigctldConfig {
    pub fn endpoint(&self) -> RigctldEndpoint {
        RigctldEndpoint::new(self.host.clone(), self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            startup_attempts: self.startup_attempts,
            startup_spacing: Duration::from_millis(self.startup_retry_ms),
            reconnect_interval: Duration::from_millis(self.reconnect_interval_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// State poll interval in milliseconds.
    pub interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 200 }
    }
}

/// HTTP frontend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listen address
    pub listen: IpAddr,
    /// Listen port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
        }
    }
}

/// Credentials for the web UI. The password has no default and must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())?;

        if self.rigctld.host.trim().is_empty() {
            return Err("[rigctld].host must not be empty".to_string());
        }
        if self.rigctld.port == 0 {
            return Err("[rigctld].port must be > 0".to_string());
        }
        if self.rigctld.connect_timeout_ms == 0 {
            return Err("[rigctld].connect_timeout_ms must be > 0".to_string());
        }
        if self.rigctld.startup_attempts == 0 {
            return Err("[rigctld].startup_attempts must be > 0".to_string());
        }
        if self.rigctld.reconnect_interval_ms == 0 {
            return Err("[rigctld].reconnect_interval_ms must be > 0".to_string());
        }
        if self.polling.interval_ms == 0 {
            return Err("[polling].interval_ms must be > 0".to_string());
        }
        if self.http.port == 0 {
            return Err("[http].port must be > 0".to_string());
        }
        if self.auth.username.trim().is_empty() {
            return Err("[auth].username must not be empty".to_string());
        }
        if self.auth.username.contains(':') {
            return Err("[auth].username must not contain ':'".to_string());
        }
        if self.auth.password.is_empty() {
            return Err("[auth].password must be set".to_string());
        }

        Ok(())
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        <Self as ConfigFile>::load_from_file(path)
    }

    /// Load configuration from the default search paths.
    /// Returns default config if no config file is found.
    pub fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        <Self as ConfigFile>::load_from_default_paths()
    }

    /// Generate an example configuration file as a TOML string.
    pub fn example_toml() -> String {
        #[derive(Serialize)]
        struct ExampleFile {
            #[serde(rename = "webrig-server")]
            server: ServerConfig,
        }

        let example = ExampleFile {
            server: ServerConfig {
                general: GeneralConfig {
                    log_level: Some("info".to_string()),
                },
                rigctld: RigctldConfig::default(),
                polling: PollingConfig::default(),
                http: HttpConfig {
                    listen: IpAddr::from([0, 0, 0, 0]),
                    port: 8080,
                },
                auth: AuthConfig {
                    username: "admin".to_string(),
                    password: "change-me".to_string(),
                },
            },
        };

        toml::to_string_pretty(&example).unwrap_or_default()
    }
}

fn validate_log_level(level: Option<&str>) -> Result<(), String> {
    if let Some(level) = level {
        if parse_level(level).is_none() {
            return Err(format!(
                "[general].log_level '{}' is invalid (expected one of: trace, debug, info, warn, error)",
                level
            ));
        }
    }
    Ok(())
}

impl ConfigFile for ServerConfig {
    fn section_key() -> &'static str {
        "webrig-server"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.auth.password = "pw".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.rigctld.host, "127.0.0.1");
        assert_eq!(config.rigctld.port, 4532);
        assert_eq!(config.rigctld.startup_attempts, 3);
        assert_eq!(config.rigctld.startup_retry_ms, 2000);
        assert_eq!(config.rigctld.reconnect_interval_ms, 5000);
        assert_eq!(config.polling.interval_ms, 200);
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.auth.username, "admin");
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_parse_server_toml() {
        let toml_str = r#"
[general]
log_level = "debug"

[rigctld]
host = "10.0.0.5"
port = 4533

[polling]
interval_ms = 500

[auth]
username = "op"
password = "secret"
"#;

        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("debug"));
        assert_eq!(config.rigctld.endpoint(), RigctldEndpoint::new("10.0.0.5", 4533));
        assert_eq!(config.rigctld.reconnect_interval_ms, 5000);
        assert_eq!(config.polling.interval_ms, 500);
        assert_eq!(config.auth.username, "op");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reconnect_policy_from_config() {
        let mut config = RigctldConfig::default();
        config.startup_attempts = 5;
        config.startup_retry_ms = 100;
        let policy = config.reconnect_policy();
        assert_eq!(policy.startup_attempts, 5);
        assert_eq!(policy.startup_spacing, Duration::from_millis(100));
        assert_eq!(policy.reconnect_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_example_toml_loads_as_section() {
        let example = ServerConfig::example_toml();
        let table: toml::Table = toml::from_str(&example).unwrap();
        let section = table.get("webrig-server").unwrap().clone();
        let config: ServerConfig = section.try_into().unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_password() {
        assert!(ServerConfig::default().validate().is_err());
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = valid();
        config.polling.interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.rigctld.port = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.http.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = valid();
        config.general.log_level = Some("chatty".to_string());
        assert!(config.validate().is_err());
    }
}
