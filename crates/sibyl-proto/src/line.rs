//! Line-based codec for tokio.
//!
//! Decodes newline-terminated lines into `String`s with CR/LF stripped,
//! and encodes outgoing lines with CR-LF appended. Lines are limited to
//! 512 bytes on the wire, the protocol standard.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};

/// Maximum wire line length in bytes, terminator included.
pub const MAX_LINE_LEN: usize = 512;

/// Newline-delimited line codec.
pub struct LineCodec {
    /// Index of the next byte to check for a newline.
    next_index: usize,
    /// Maximum line length.
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the standard 512-byte line limit.
    pub fn new() -> Self {
        Self {
            next_index: 0,
            max_len: MAX_LINE_LEN,
        }
    }

    /// Create a codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(ProtocolError::LineTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            let line_vec = line.to_vec();
            let data =
                String::from_utf8(line_vec.clone()).map_err(|e| ProtocolError::InvalidUtf8 {
                    raw_line: line_vec,
                    byte_pos: e.utf8_error().valid_up_to(),
                    details: e.utf8_error().to_string(),
                })?;

            Ok(Some(data.trim_end_matches(['\r', '\n']).to_string()))
        } else {
            // No complete line yet; remember where we stopped scanning.
            self.next_index = src.len();

            if src.len() > self.max_len {
                return Err(ProtocolError::LineTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }

            Ok(None)
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(line.trim_end_matches(['\r', '\n']).as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}
