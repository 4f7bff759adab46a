//! Nom-based protocol line parser.
//!
//! Splits one raw line (CR/LF already stripped) into prefix, command,
//! middle parameters, and the trailing parameter. Interpretation of the
//! pieces (origin classification, channel extraction) happens in
//! [`crate::request`].

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::opt,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::error::MessageParseError;

/// Maximum number of middle parameters, per RFC 2812.
const MAX_PARAMS: usize = 15;

/// A raw line split into its syntactic pieces, borrowed from the input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawParts<'a> {
    /// Prefix string without the leading `:`, if present.
    pub prefix: Option<&'a str>,
    /// The command token (letters, or a 3-digit numeric code).
    pub command: &'a str,
    /// Middle parameters, in order.
    pub middle: SmallVec<[&'a str; MAX_PARAMS]>,
    /// The trailing parameter without its leading `:`, if present.
    pub trailing: Option<&'a str>,
}

/// Parse the prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command token (1*letter or 3digit, per RFC 2812).
fn parse_command(input: &str) -> IResult<&str, &str> {
    let (rest, cmd) = take_while1(|c: char| c.is_ascii_alphanumeric())(input)?;

    let is_word = cmd.chars().all(|c| c.is_ascii_alphabetic());
    let is_numeric = cmd.len() == 3 && cmd.chars().all(|c| c.is_ascii_digit());

    if is_word || is_numeric {
        Ok((rest, cmd))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::AlphaNumeric,
        )))
    }
}

/// Parse the parameter list after the command.
///
/// Middle parameters are whitespace-separated tokens that do not start
/// with `:`; runs of spaces collapse to a single separator. The first
/// token starting with a standalone `:` begins the trailing parameter,
/// which runs to the end of the line.
fn parse_params(input: &str) -> (SmallVec<[&str; MAX_PARAMS]>, Option<&str>) {
    let mut middle: SmallVec<[&str; MAX_PARAMS]> = SmallVec::new();
    let mut rest = input;

    loop {
        while rest.as_bytes().first() == Some(&b' ') {
            rest = &rest[1..];
        }

        if rest.is_empty() {
            return (middle, None);
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            return (middle, Some(trailing));
        }

        if middle.len() >= MAX_PARAMS {
            return (middle, None);
        }

        let end = rest.find(' ').unwrap_or(rest.len());
        middle.push(&rest[..end]);
        rest = &rest[end..];
    }
}

fn parse_message(input: &str) -> IResult<&str, RawParts<'_>> {
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;
    let (input, command) = parse_command(input)?;
    let (middle, trailing) = parse_params(input);

    Ok((
        "",
        RawParts {
            prefix,
            command,
            middle,
            trailing,
        },
    ))
}

/// Parse one line into [`RawParts`].
///
/// The input must already have its CR/LF stripped.
pub(crate) fn parse_line(input: &str) -> Result<RawParts<'_>, MessageParseError> {
    if input.is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }

    match parse_message(input) {
        Ok((_, parts)) => Ok(parts),
        Err(_) => {
            // The only fallible piece after the optional prefix is the
            // command token; report what stood where one was expected.
            let after_prefix = input
                .strip_prefix(':')
                .and_then(|s| s.find(' ').map(|i| s[i..].trim_start()))
                .unwrap_or(input);
            let token = after_prefix
                .split(' ')
                .next()
                .unwrap_or_default()
                .to_string();
            Err(MessageParseError::InvalidCommand(token))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_command() {
        let parts = parse_line("QUIT").unwrap();
        assert_eq!(parts.command, "QUIT");
        assert!(parts.prefix.is_none());
        assert!(parts.middle.is_empty());
        assert!(parts.trailing.is_none());
    }

    #[test]
    fn test_command_with_trailing() {
        let parts = parse_line("PING :irc.example.org").unwrap();
        assert_eq!(parts.command, "PING");
        assert_eq!(parts.trailing, Some("irc.example.org"));
    }

    #[test]
    fn test_full_line() {
        let parts = parse_line(":nick!user@host PRIVMSG #chan p1 p2 :hello world").unwrap();
        assert_eq!(parts.prefix, Some("nick!user@host"));
        assert_eq!(parts.command, "PRIVMSG");
        assert_eq!(parts.middle.as_slice(), &["#chan", "p1", "p2"]);
        assert_eq!(parts.trailing, Some("hello world"));
    }

    #[test]
    fn test_numeric_command() {
        let parts = parse_line(":irc.example.org 001 sibyl :Welcome").unwrap();
        assert_eq!(parts.command, "001");
        assert_eq!(parts.middle.as_slice(), &["sibyl"]);
    }

    #[test]
    fn test_trailing_may_contain_colons() {
        let parts = parse_line("PRIVMSG #chan :a:b:c").unwrap();
        assert_eq!(parts.trailing, Some("a:b:c"));
    }

    #[test]
    fn test_collapses_spaces_between_params() {
        let parts = parse_line("MODE  #chan   +o  nick").unwrap();
        assert_eq!(parts.middle.as_slice(), &["#chan", "+o", "nick"]);
    }

    #[test]
    fn test_empty_trailing() {
        let parts = parse_line("TOPIC #chan :").unwrap();
        assert_eq!(parts.trailing, Some(""));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(parse_line(""), Err(MessageParseError::EmptyMessage));
    }

    #[test]
    fn test_rejects_missing_command() {
        assert!(matches!(
            parse_line(":prefix.only"),
            Err(MessageParseError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_command() {
        // Two digits is neither a word nor a 3-digit numeric.
        assert!(matches!(
            parse_line(":server 42 oops"),
            Err(MessageParseError::InvalidCommand(_))
        ));
    }
}
