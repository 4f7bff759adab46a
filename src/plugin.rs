//! Plugin glue.
//!
//! A plugin is a named bundle of handler registrations. Loading runs
//! `init`, which registers the plugin's handlers on the bot; `boot` runs
//! once at session start with the plugin's config section; `help`
//! contributes to the built-in `!help` reply.

use crate::bot::Bot;
use crate::event::Event;

/// A loadable bundle of handlers.
pub trait Plugin: Send + Sync {
    /// The plugin's name, used to look up its config section.
    fn name(&self) -> &str;

    /// Register this plugin's handlers on the bot.
    fn init(&self, bot: &mut Bot);

    /// Called once before the session loop starts, with the
    /// `[plugins.<name>]` config section if one exists.
    fn boot(&self, _config: Option<&toml::Value>) {}

    /// Add this plugin's help output to a `!help` event.
    fn help(&self, _event: &mut Event<'_>) {}
}
