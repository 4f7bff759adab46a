//! Error types for the bot framework.
//!
//! Per-line failures (parse errors, handler errors) are recovered inside
//! the session loop; per-session failures (connect, write during
//! authentication) surface as [`BotError`] from [`crate::Bot::run`].

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal, session-level errors.
#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration was missing or invalid. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transport could not be opened. Fatal at startup; retry policy
    /// belongs to the caller.
    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        /// Host we tried to reach.
        host: String,
        /// Port we tried to reach.
        port: u16,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The transport failed while the session depended on it (writes,
    /// or a broken read stream).
    #[error("transport error: {0}")]
    Transport(#[from] sibyl_proto::ProtocolError),

    /// A built-in handler pattern failed to compile.
    #[error("invalid handler pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Error returned by a handler callback.
///
/// Handler errors are recovered per action: the router logs them,
/// discards the failing action's responses, and keeps dispatching.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler could not produce its response.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    /// Build a [`HandlerError::Failed`] from any message.
    pub fn failed(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::Failed(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::Failed(message.to_string())
    }
}

/// Result type for handler callbacks.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_from_str() {
        let err: HandlerError = "lookup failed".into();
        assert_eq!(err.to_string(), "lookup failed");
    }

    #[test]
    fn test_config_error_wraps() {
        let err: BotError = ConfigError::Missing("nick").into();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().contains("nick"));
    }
}
