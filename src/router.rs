//! Event routing: classify inbound requests and run registered actions.

use std::collections::HashMap;

use sibyl_proto::{Request, Response};
use tracing::{debug, warn};

use crate::action::Action;
use crate::event::{Event, EventClass};

/// The dispatch engine.
///
/// Owns the registry mapping event class to an ordered list of actions.
/// Register everything before the session loop starts; the loop only
/// reads. A `Router` is a plain value owned by its [`crate::Bot`]; there
/// is no ambient shared instance.
pub struct Router {
    nick: String,
    registry: HashMap<EventClass, Vec<Action>>,
}

impl Router {
    /// Create a router for a bot with the given nick.
    ///
    /// Every router starts with two default registrations: PING is
    /// answered with a matching PONG, and ERROR lines are logged without
    /// a response.
    pub fn new(nick: impl Into<String>) -> Self {
        let mut router = Router {
            nick: nick.into(),
            registry: HashMap::new(),
        };
        router.add_default_handlers();
        router
    }

    /// The nick used for self-filtering.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Append an action to an event class's list. Order of registration
    /// is the order of execution.
    pub fn register(&mut self, class: EventClass, action: Action) {
        self.registry.entry(class).or_default().push(action);
    }

    /// Dispatch one inbound request, returning the outgoing batch.
    ///
    /// Self-originated requests (sender nick equals the bot's nick) are
    /// discarded without running any handler. Classes with no registered
    /// actions yield an empty batch. Otherwise every matching action
    /// runs, in registration order; all of their responses are collected
    /// into one batch, in that same order. An action whose callback
    /// fails is logged and contributes nothing.
    pub fn dispatch(&self, request: &Request) -> Vec<Response> {
        let class = EventClass::classify(request);

        if request.sending_user() == Some(self.nick.as_str()) {
            debug!(command = request.command(), "ignoring own message");
            return Vec::new();
        }

        let Some(actions) = self.registry.get(&class) else {
            return Vec::new();
        };

        let mut event = Event::new(request);
        for action in actions {
            let Some(matches) = action.captures(request.message()) else {
                continue;
            };

            event.set_matches(matches);
            let mark = event.responses().len();
            if let Err(e) = action.call(&mut event) {
                warn!(
                    command = request.command(),
                    error = %e,
                    "handler failed; dropping its responses"
                );
                event.truncate_responses(mark);
            }
        }

        event.into_responses()
    }

    fn add_default_handlers(&mut self) {
        self.register(
            EventClass::Ping,
            Action::new(None, |event| {
                let host = event.request().message().to_string();
                event.add_response(Response::pong(host));
                Ok(())
            }),
        );

        self.register(
            EventClass::Error,
            Action::new(None, |event| {
                debug!(message = %event.request().message(), "server error");
                Ok(())
            }),
        );
    }
}
