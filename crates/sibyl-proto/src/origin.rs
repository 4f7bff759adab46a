//! Message origin: who sent an inbound protocol line.
//!
//! The prefix of a protocol line identifies its origin. A full
//! `nick!user@host` mask is a user; anything else (a server name, a bare
//! word, a partial mask) is treated as a server, which keeps the
//! user/server distinction a strict two-way split.

/// The parsed origin of an inbound line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Server origin, e.g. `irc.example.org`. Also covers prefixes that
    /// are not a complete `nick!user@host` mask.
    Server(String),
    /// User origin parsed from a `nick!user@host` mask.
    User {
        /// The sender's nickname.
        nick: String,
        /// The sender's username (ident), with any `~`, `n=`, or `i=`
        /// marker stripped.
        user: String,
        /// The sender's hostname.
        host: String,
    },
}

impl Origin {
    /// Parse a prefix string (without the leading `:`).
    ///
    /// Lenient: never fails. Only a complete `nick!user@host` mask with
    /// all three parts non-empty produces [`Origin::User`].
    pub fn parse(s: &str) -> Self {
        if let Some((head, host)) = s.split_once('@') {
            if let Some((nick, user)) = head.split_once('!') {
                if !nick.is_empty() && !user.is_empty() && !host.is_empty() {
                    return Origin::User {
                        nick: nick.to_string(),
                        user: strip_ident_marker(user).to_string(),
                        host: host.to_string(),
                    };
                }
            }
        }

        Origin::Server(s.to_string())
    }

    /// The sender's nickname, if this is a user origin.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Origin::User { nick, .. } => Some(nick),
            Origin::Server(_) => None,
        }
    }

    /// The sender's username, if this is a user origin.
    pub fn user(&self) -> Option<&str> {
        match self {
            Origin::User { user, .. } => Some(user),
            Origin::Server(_) => None,
        }
    }

    /// The sender's hostname, if this is a user origin.
    pub fn host(&self) -> Option<&str> {
        match self {
            Origin::User { host, .. } => Some(host),
            Origin::Server(_) => None,
        }
    }

    /// The server name, if this is a server origin.
    pub fn server(&self) -> Option<&str> {
        match self {
            Origin::Server(name) => Some(name),
            Origin::User { .. } => None,
        }
    }

    /// True if this origin is a user.
    pub fn is_user(&self) -> bool {
        matches!(self, Origin::User { .. })
    }

    /// True if this origin is a server.
    pub fn is_server(&self) -> bool {
        matches!(self, Origin::Server(_))
    }
}

/// Strip the ident marker some networks prepend to the username.
fn strip_ident_marker(user: &str) -> &str {
    user.strip_prefix("n=")
        .or_else(|| user.strip_prefix("i="))
        .or_else(|| user.strip_prefix('~'))
        .unwrap_or(user)
}
