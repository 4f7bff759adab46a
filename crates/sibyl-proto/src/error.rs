//! Error types for the wire-protocol layer.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 bytes in an inbound line.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// The raw line as bytes, before UTF-8 validation failed.
        raw_line: Vec<u8>,
        /// Byte position where validation failed.
        byte_pos: usize,
        /// Detailed error message from the UTF-8 decoder.
        details: String,
    },

    /// Line exceeded the maximum allowed length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Actual line length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Failed to parse an inbound protocol line.
    ///
    /// Carries the offending raw line so recovery code can log it.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The raw line that failed to parse.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Errors encountered when parsing a protocol line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty after stripping CR/LF.
    #[error("empty message")]
    EmptyMessage,

    /// No valid command token (letters or a 3-digit code) could be extracted.
    #[error("invalid command: {0:?}")]
    InvalidCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::LineTooLong {
            actual: 1024,
            limit: 512,
        };
        assert_eq!(format!("{}", err), "line too long: 1024 bytes (limit: 512)");

        let err = MessageParseError::InvalidCommand("@@@".into());
        assert_eq!(format!("{}", err), "invalid command: \"@@@\"");
    }

    #[test]
    fn test_error_source_chaining() {
        let cause = MessageParseError::EmptyMessage;
        let err = ProtocolError::InvalidMessage {
            string: String::new(),
            cause: cause.clone(),
        };

        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), cause.to_string());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: ProtocolError = io_err.into();
        assert!(matches!(err, ProtocolError::Io(_)));
    }
}
