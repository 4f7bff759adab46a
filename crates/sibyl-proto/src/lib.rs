//! # sibyl-proto
//!
//! Wire-protocol support for the sibyl IRC bot framework: parsing raw
//! protocol lines into structured requests, building outgoing responses,
//! and (optionally, behind the `tokio` feature) framing them over a
//! line-oriented transport.
//!
//! ## Parsing
//!
//! ```rust
//! use sibyl_proto::Request;
//!
//! let req: Request = ":nick!user@host PRIVMSG #chan :Hello!".parse().unwrap();
//! assert_eq!(req.command(), "PRIVMSG");
//! assert_eq!(req.channel(), Some("#chan"));
//! assert_eq!(req.message(), "Hello!");
//! ```
//!
//! ## Building responses
//!
//! ```rust
//! use sibyl_proto::Response;
//!
//! let out = Response::msg("#chan", "Hello!");
//! assert_eq!(out.to_string(), "PRIVMSG #chan :Hello!");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod error;
pub mod origin;
mod parser;
pub mod request;
pub mod response;

pub use self::chan::ChannelExt;
pub use self::error::{MessageParseError, ProtocolError};
pub use self::origin::Origin;
pub use self::request::Request;
pub use self::response::Response;

#[cfg(feature = "tokio")]
pub mod line;
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};

#[cfg(feature = "tokio")]
pub mod transport;
#[cfg(feature = "tokio")]
pub use self::transport::{LineTransport, Transport};
