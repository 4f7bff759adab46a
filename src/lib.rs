//! sibyl - a pattern-routing IRC bot framework.
//!
//! Sibyl connects to one IRC server, parses each inbound line into a
//! structured request, routes it through registered pattern/callback
//! handlers, and writes the handlers' responses back onto the wire.
//!
//! ```no_run
//! use regex::Regex;
//! use sibyl::{Bot, Config, Response};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), sibyl::BotError> {
//! let mut config = Config::new("irc.example.org", 6667, "sibyl");
//! config.channels.push("#test".to_string());
//!
//! let mut bot = Bot::new(config)?;
//! bot.on_channel(Regex::new(r"^!hello$").unwrap(), |event| {
//!     let channel = event.request().channel().unwrap_or_default().to_string();
//!     event.add_response(Response::msg(channel, "hi there"));
//!     Ok(())
//! });
//!
//! bot.run().await
//! # }
//! ```

mod action;
mod bot;
mod config;
mod error;
mod event;
mod plugin;
mod router;

pub use crate::action::{Action, Callback};
pub use crate::bot::{Bot, StopHandle};
pub use crate::config::{Config, ConfigError, UnfloodConfig};
pub use crate::error::{BotError, HandlerError, HandlerResult};
pub use crate::event::{Event, EventClass};
pub use crate::plugin::Plugin;
pub use crate::router::Router;

pub use sibyl_proto as proto;
pub use sibyl_proto::{Origin, Request, Response};
