//! Structured inbound requests.

use std::str::FromStr;

use crate::chan::ChannelExt;
use crate::error::ProtocolError;
use crate::origin::Origin;
use crate::parser;

/// One inbound protocol line, parsed.
///
/// Immutable once constructed; the session loop builds one `Request` per
/// line, dispatches it, and discards it.
///
/// # Example
///
/// ```
/// use sibyl_proto::Request;
///
/// let req: Request = ":nick!user@host PRIVMSG #chan p1 p2 :trailing text"
///     .parse()
///     .unwrap();
/// assert_eq!(req.command(), "PRIVMSG");
/// assert_eq!(req.channel(), Some("#chan"));
/// assert_eq!(req.params(), &["p1".to_string(), "p2".to_string()]);
/// assert_eq!(req.message(), "trailing text");
/// assert_eq!(req.sending_user(), Some("nick"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    raw: String,
    origin: Option<Origin>,
    command: String,
    channel: Option<String>,
    params: Vec<String>,
    message: String,
}

impl Request {
    /// Parse a raw line into a `Request`.
    ///
    /// Equivalent to [`str::parse`]; trailing CR/LF is stripped first.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        raw.parse()
    }

    /// The raw line this request was parsed from, CR/LF stripped.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed origin, if the line carried a prefix.
    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// The command token as it appeared on the wire.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The channel this request targets, if its first parameter was a
    /// channel name.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// The middle parameters, channel excluded.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The trailing message body; empty when the line had none.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The nick of the sending user, if the line came from a user.
    pub fn sending_user(&self) -> Option<&str> {
        self.origin.as_ref().and_then(Origin::nick)
    }

    /// The sending server, if the line came from a server.
    ///
    /// A line without any prefix also counts as server-originated, but
    /// has no server name to report.
    pub fn server(&self) -> Option<&str> {
        self.origin.as_ref().and_then(Origin::server)
    }

    /// Where a reply to this request should go: the channel name, or the
    /// sender's nick for a private message.
    pub fn source(&self) -> Option<&str> {
        if self.is_private_message() {
            self.sending_user()
        } else {
            self.channel()
        }
    }

    /// True if this request has no channel target.
    pub fn is_private_message(&self) -> bool {
        self.channel.is_none()
    }

    /// True if the line came from a user (full `nick!user@host` prefix).
    pub fn is_from_user(&self) -> bool {
        self.origin.as_ref().is_some_and(Origin::is_user)
    }

    /// True if the line came from a server. Exactly one of
    /// [`is_from_user`](Self::is_from_user) and `is_from_server` holds.
    pub fn is_from_server(&self) -> bool {
        !self.is_from_user()
    }
}

impl FromStr for Request {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_end_matches(['\r', '\n']);

        let parts = parser::parse_line(line).map_err(|cause| ProtocolError::InvalidMessage {
            string: s.to_owned(),
            cause,
        })?;

        let origin = parts.prefix.map(Origin::parse);

        let mut middle = parts.middle.into_iter();
        let mut channel = None;
        let mut params: Vec<String> = Vec::new();
        if let Some(first) = middle.next() {
            if first.is_channel_name() {
                channel = Some(first.to_string());
            } else {
                params.push(first.to_string());
            }
        }
        params.extend(middle.map(str::to_string));

        Ok(Request {
            raw: line.to_string(),
            origin,
            command: parts.command.to_string(),
            channel,
            params,
            message: parts.trailing.unwrap_or_default().to_string(),
        })
    }
}
