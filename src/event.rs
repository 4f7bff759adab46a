//! Event classification and the per-line dispatch context.

use sibyl_proto::{Request, Response};

/// The router's dispatch key for an inbound request.
///
/// A closed set of classes plus a generic variant for any other server
/// command, carrying the lowercased command name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// PRIVMSG addressed to a channel.
    ChannelMessage,
    /// PRIVMSG addressed to the bot directly.
    PrivateMessage,
    /// JOIN.
    Join,
    /// PART.
    Part,
    /// ERROR.
    Error,
    /// NOTICE.
    Notice,
    /// PING.
    Ping,
    /// Any other server command, lowercased (e.g. `"mode"`, `"001"`).
    Server(String),
}

impl EventClass {
    /// Classify an inbound request.
    ///
    /// Case-insensitive on the command; PRIVMSG splits on whether the
    /// request targets a channel.
    pub fn classify(request: &Request) -> Self {
        let command = request.command().to_ascii_lowercase();

        if command == "privmsg" {
            if request.is_private_message() {
                EventClass::PrivateMessage
            } else {
                EventClass::ChannelMessage
            }
        } else {
            EventClass::server(&command)
        }
    }

    /// The class a server command name maps to.
    pub fn server(command: &str) -> Self {
        match command.to_ascii_lowercase().as_str() {
            "join" => EventClass::Join,
            "part" => EventClass::Part,
            "error" => EventClass::Error,
            "notice" => EventClass::Notice,
            "ping" => EventClass::Ping,
            other => EventClass::Server(other.to_string()),
        }
    }
}

/// Dispatch context for one inbound line.
///
/// Carries the request, the capture groups of the action currently
/// executing, and the accumulating batch of outgoing responses.
pub struct Event<'a> {
    request: &'a Request,
    matches: Vec<String>,
    responses: Vec<Response>,
}

impl<'a> Event<'a> {
    /// Create an event for a request, with no matches and no responses.
    pub fn new(request: &'a Request) -> Self {
        Event {
            request,
            matches: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// The request being dispatched.
    ///
    /// The returned reference borrows the request itself, not the event,
    /// so callbacks can keep it while adding responses.
    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// Capture groups from the current action's pattern, whole-match
    /// excluded. Empty for pattern-less actions.
    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    /// Replace the capture groups. The router calls this before each
    /// action's callback runs.
    pub fn set_matches(&mut self, matches: Vec<String>) {
        self.matches = matches;
    }

    /// Append a response to this line's outgoing batch.
    pub fn add_response(&mut self, response: Response) {
        self.responses.push(response);
    }

    /// The batch accumulated so far.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Drop responses past `len`. Used to roll back a failed action's
    /// contribution.
    pub(crate) fn truncate_responses(&mut self, len: usize) {
        self.responses.truncate(len);
    }

    /// Consume the event, yielding the outgoing batch.
    pub fn into_responses(self) -> Vec<Response> {
        self.responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(line: &str) -> Request {
        line.parse().unwrap()
    }

    #[test]
    fn test_classify_privmsg_channel() {
        let req = request(":alice!a@h PRIVMSG #chan :hi");
        assert_eq!(EventClass::classify(&req), EventClass::ChannelMessage);
    }

    #[test]
    fn test_classify_privmsg_private() {
        let req = request(":alice!a@h PRIVMSG sibyl :hi");
        assert_eq!(EventClass::classify(&req), EventClass::PrivateMessage);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let req = request(":alice!a@h privmsg #chan :hi");
        assert_eq!(EventClass::classify(&req), EventClass::ChannelMessage);

        let req = request("Ping :host");
        assert_eq!(EventClass::classify(&req), EventClass::Ping);
    }

    #[test]
    fn test_classify_bare_classes() {
        assert_eq!(
            EventClass::classify(&request(":a!a@h JOIN #chan")),
            EventClass::Join
        );
        assert_eq!(
            EventClass::classify(&request(":a!a@h PART #chan")),
            EventClass::Part
        );
        assert_eq!(
            EventClass::classify(&request("ERROR :Closing Link")),
            EventClass::Error
        );
        assert_eq!(
            EventClass::classify(&request(":a!a@h NOTICE #chan :psst")),
            EventClass::Notice
        );
    }

    #[test]
    fn test_classify_unknown_commands_generically() {
        assert_eq!(
            EventClass::classify(&request(":server.name MODE #chan +m")),
            EventClass::Server("mode".to_string())
        );
        assert_eq!(
            EventClass::classify(&request(":server.name 001 sibyl :Welcome")),
            EventClass::Server("001".to_string())
        );
    }

    #[test]
    fn test_event_accumulates_responses() {
        let req = request("PING :host");
        let mut event = Event::new(&req);
        event.add_response(Response::pong("host"));
        event.add_response(Response::msg("#chan", "hi"));

        assert_eq!(event.responses().len(), 2);
        let batch = event.into_responses();
        assert_eq!(batch[0].verb(), "PONG");
        assert_eq!(batch[1].verb(), "PRIVMSG");
    }

    #[test]
    fn test_truncate_rolls_back() {
        let req = request("PING :host");
        let mut event = Event::new(&req);
        event.add_response(Response::pong("host"));
        let mark = event.responses().len();
        event.add_response(Response::msg("#chan", "partial"));
        event.truncate_responses(mark);
        assert_eq!(event.responses().len(), 1);
    }
}
