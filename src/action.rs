//! Pattern actions: a matching predicate paired with a handler callback.

use std::sync::Arc;

use regex::Regex;

use crate::error::HandlerResult;
use crate::event::Event;

/// A handler callback, shared so one callback can be registered under
/// several event classes.
pub type Callback = Arc<dyn Fn(&mut Event<'_>) -> HandlerResult + Send + Sync>;

/// A registered (pattern, handler) pair.
///
/// No pattern means the action always matches. Matching is pure: capture
/// groups are returned as a value, never stored on the action, so an
/// `Action` can be tested concurrently without synchronization.
pub struct Action {
    pattern: Option<Regex>,
    callback: Callback,
}

impl Action {
    /// Create an action from a pattern and a callback.
    pub fn new<F>(pattern: Option<Regex>, callback: F) -> Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        Action {
            pattern,
            callback: Arc::new(callback),
        }
    }

    /// Create an action around an already-shared callback.
    pub fn shared(pattern: Option<Regex>, callback: Callback) -> Self {
        Action { pattern, callback }
    }

    /// Test the subject against this action's pattern.
    ///
    /// Returns the capture groups (whole-match excluded) when the
    /// pattern matches, an empty list when there is no pattern, and
    /// `None` when the pattern does not match. Unmatched optional groups
    /// come back as empty strings to keep positions stable.
    pub fn captures(&self, subject: &str) -> Option<Vec<String>> {
        match &self.pattern {
            None => Some(Vec::new()),
            Some(pattern) => pattern.captures(subject).map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                    .collect()
            }),
        }
    }

    /// Run the handler callback against the event.
    pub fn call(&self, event: &mut Event<'_>) -> HandlerResult {
        (self.callback)(event)
    }
}
