//! Outgoing response construction and serialization.
//!
//! A [`Response`] is a structured outgoing line: an uppercased verb, zero
//! or more leading arguments, and an optional trailing argument that
//! serializes with a leading `:`. The named constructors encode the
//! conventional argument layout for each verb; [`Response::new`] is the
//! generic fallback, which always treats the final argument as trailing.

use std::fmt::{self, Display, Formatter};

/// A structured outgoing protocol line.
///
/// Immutable; serialized on demand via [`Display`]. The serialized form
/// carries no line terminator; framing appends CR-LF.
///
/// # Example
///
/// ```
/// use sibyl_proto::Response;
///
/// assert_eq!(Response::msg("#chan", "hello").to_string(), "PRIVMSG #chan :hello");
/// assert_eq!(Response::pass("secret").to_string(), "PASS secret");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    verb: String,
    args: Vec<String>,
    trailing: Option<String>,
}

impl Response {
    /// Generic constructor: uppercase the verb, trim every argument, and
    /// treat the final argument as the trailing parameter.
    pub fn new(verb: impl Into<String>, args: Vec<String>) -> Self {
        let mut args: Vec<String> = args.into_iter().map(|a| a.trim().to_string()).collect();
        let trailing = args.pop();

        Response {
            verb: verb.into().to_uppercase(),
            args,
            trailing,
        }
    }

    fn plain(verb: &str, args: Vec<String>) -> Self {
        Response {
            verb: verb.to_string(),
            args,
            trailing: None,
        }
    }

    fn with_trailing(verb: &str, args: Vec<String>, trailing: impl Into<String>) -> Self {
        Response {
            verb: verb.to_string(),
            args,
            trailing: Some(trailing.into()),
        }
    }

    /// `NICK :nick`
    pub fn nick(nick: impl Into<String>) -> Self {
        Self::with_trailing("NICK", vec![], nick)
    }

    /// `USER nick host server :realname`
    pub fn user(
        nick: impl Into<String>,
        host: impl Into<String>,
        server: impl Into<String>,
        realname: impl Into<String>,
    ) -> Self {
        Self::with_trailing(
            "USER",
            vec![nick.into(), host.into(), server.into()],
            realname,
        )
    }

    /// `PASS password`, with no trailing marker.
    pub fn pass(password: impl Into<String>) -> Self {
        Self::plain("PASS", vec![password.into()])
    }

    /// `JOIN channels`
    pub fn join(channels: impl Into<String>) -> Self {
        Self::plain("JOIN", vec![channels.into()])
    }

    /// `PART channels`
    pub fn part(channels: impl Into<String>) -> Self {
        Self::plain("PART", vec![channels.into()])
    }

    /// Alias for [`part`](Self::part), kept for callers that think in
    /// terms of leaving.
    pub fn leave(channels: impl Into<String>) -> Self {
        Self::part(channels)
    }

    /// `PRIVMSG target :text`
    pub fn msg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_trailing("PRIVMSG", vec![target.into()], text)
    }

    /// `NOTICE target :text`
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_trailing("NOTICE", vec![target.into()], text)
    }

    /// A CTCP ACTION: `PRIVMSG target :\x01ACTION text\x01`.
    ///
    /// ACTION is a client-side convention rather than part of the
    /// protocol proper; the body is a privmsg wrapped in 0x01 bytes.
    pub fn action(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::msg(target, format!("\u{1}ACTION {}\u{1}", text.into()))
    }

    /// `PONG :host`
    pub fn pong(host: impl Into<String>) -> Self {
        Self::with_trailing("PONG", vec![], host)
    }

    /// `QUIT :message`
    pub fn quit(message: impl Into<String>) -> Self {
        Self::with_trailing("QUIT", vec![], message)
    }

    /// `KICK channel nick :reason`
    pub fn kick(
        nick: impl Into<String>,
        channel: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::with_trailing("KICK", vec![channel.into(), nick.into()], reason)
    }

    /// `MODE channel mode [args]`, no trailing marker; an empty args
    /// string is elided.
    pub fn mode(
        channel: impl Into<String>,
        mode: impl Into<String>,
        args: impl Into<String>,
    ) -> Self {
        let mut all = vec![channel.into(), mode.into()];
        let extra = args.into();
        if !extra.trim().is_empty() {
            all.push(extra);
        }
        Self::plain("MODE", all)
    }

    /// `TOPIC channel :topic`
    pub fn topic(channel: impl Into<String>, topic: impl Into<String>) -> Self {
        Self::with_trailing("TOPIC", vec![channel.into()], topic)
    }

    /// `INVITE nick channel`
    pub fn invite(nick: impl Into<String>, channel: impl Into<String>) -> Self {
        Self::plain("INVITE", vec![nick.into(), channel.into()])
    }

    /// The uppercased verb.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// The leading (non-trailing) arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The trailing argument, if this response has one.
    pub fn trailing(&self) -> Option<&str> {
        self.trailing.as_deref()
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;

        for arg in &self.args {
            write!(f, " {}", arg.trim())?;
        }

        if let Some(ref trailing) = self.trailing {
            write!(f, " :{}", trailing.trim())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg() {
        assert_eq!(
            Response::msg("#chan", "hello").to_string(),
            "PRIVMSG #chan :hello"
        );
    }

    #[test]
    fn test_action_wraps_in_ctcp_bytes() {
        assert_eq!(
            Response::action("#chan", "waves").to_string(),
            "PRIVMSG #chan :\u{1}ACTION waves\u{1}"
        );
    }

    #[test]
    fn test_nick_has_trailing_colon() {
        assert_eq!(Response::nick("bob").to_string(), "NICK :bob");
    }

    #[test]
    fn test_pass_has_no_trailing_colon() {
        assert_eq!(Response::pass("secret").to_string(), "PASS secret");
    }

    #[test]
    fn test_user_layout() {
        assert_eq!(
            Response::user("bot", "irc.example.org", "*", "A Robot").to_string(),
            "USER bot irc.example.org * :A Robot"
        );
    }

    #[test]
    fn test_join_part_plain() {
        assert_eq!(Response::join("#a,#b").to_string(), "JOIN #a,#b");
        assert_eq!(Response::part("#a").to_string(), "PART #a");
        assert_eq!(Response::leave("#a").to_string(), "PART #a");
    }

    #[test]
    fn test_pong_and_quit() {
        assert_eq!(Response::pong("host123").to_string(), "PONG :host123");
        assert_eq!(Response::quit("bye").to_string(), "QUIT :bye");
    }

    #[test]
    fn test_kick_argument_order() {
        assert_eq!(
            Response::kick("baduser", "#chan", "spam").to_string(),
            "KICK #chan baduser :spam"
        );
    }

    #[test]
    fn test_mode_elides_empty_args() {
        assert_eq!(
            Response::mode("#chan", "+o", "nick").to_string(),
            "MODE #chan +o nick"
        );
        assert_eq!(Response::mode("#chan", "+m", "").to_string(), "MODE #chan +m");
    }

    #[test]
    fn test_topic_and_invite() {
        assert_eq!(
            Response::topic("#chan", "new topic").to_string(),
            "TOPIC #chan :new topic"
        );
        assert_eq!(
            Response::invite("bob", "#chan").to_string(),
            "INVITE bob #chan"
        );
    }

    #[test]
    fn test_generic_constructor_uppercases_and_colonizes() {
        let r = Response::new("privmsg", vec!["#chan".into(), " hi ".into()]);
        assert_eq!(r.verb(), "PRIVMSG");
        assert_eq!(r.to_string(), "PRIVMSG #chan :hi");
    }

    #[test]
    fn test_generic_constructor_single_arg() {
        let r = Response::new("lusers", vec![]);
        assert_eq!(r.to_string(), "LUSERS");

        let r = Response::new("pong", vec!["host".into()]);
        assert_eq!(r.to_string(), "PONG :host");
    }

    #[test]
    fn test_accessors() {
        let r = Response::kick("bob", "#chan", "spam");
        assert_eq!(r.verb(), "KICK");
        assert_eq!(r.args(), &["#chan".to_string(), "bob".to_string()]);
        assert_eq!(r.trailing(), Some("spam"));
    }
}
