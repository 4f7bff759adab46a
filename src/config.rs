//! Configuration loading and validation.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use sibyl_proto::ChannelExt;
use thiserror::Error;

/// Configuration errors. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required field was missing or empty.
    #[error("missing required field: {0}")]
    Missing(&'static str),

    /// A field had an unusable value.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server hostname to connect to.
    pub hostname: String,
    /// Server port.
    pub port: u16,
    /// The bot's nickname. Also used for self-filtering inbound lines.
    pub nick: String,
    /// Username for registration; defaults to the nick.
    #[serde(default)]
    pub username: Option<String>,
    /// Realname for registration.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Server name argument of the USER registration line.
    #[serde(default = "default_servername")]
    pub servername: String,
    /// Connection password, sent via PASS before registration.
    #[serde(default)]
    pub password: Option<String>,
    /// Channels to join after registration.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Nicks allowed to use admin-gated handlers.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Write pacing between and after outgoing batches.
    #[serde(default)]
    pub unflood: UnfloodConfig,
    /// Per-plugin configuration sections, keyed by plugin name.
    #[serde(default)]
    pub plugins: HashMap<String, toml::Value>,
}

/// Outgoing write pacing. Zero disables a delay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnfloodConfig {
    /// Milliseconds to wait between individual outgoing lines.
    #[serde(default)]
    pub interval_ms: u64,
    /// Milliseconds to wait after each response batch.
    #[serde(default)]
    pub delay_ms: u64,
}

fn default_realname() -> String {
    "sibyl".to_string()
}

fn default_servername() -> String {
    "*".to_string()
}

impl Config {
    /// Minimal configuration for the given server and nick.
    pub fn new(hostname: impl Into<String>, port: u16, nick: impl Into<String>) -> Self {
        Config {
            hostname: hostname.into(),
            port,
            nick: nick.into(),
            username: None,
            realname: default_realname(),
            servername: default_servername(),
            password: None,
            channels: Vec::new(),
            admins: Vec::new(),
            unflood: UnfloodConfig::default(),
            plugins: HashMap::new(),
        }
    }

    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a session cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::Missing("hostname"));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.nick.trim().is_empty() {
            return Err(ConfigError::Missing("nick"));
        }
        for channel in &self.channels {
            if !channel.is_channel_name() {
                return Err(ConfigError::Invalid {
                    field: "channels",
                    reason: format!("{channel:?} is not a channel name"),
                });
            }
        }
        Ok(())
    }

    /// Username to register with: explicit, or the nick.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nick)
    }
}
