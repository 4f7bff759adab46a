//! A small demonstration bot: echoes, greets, and takes admin orders.
//!
//! Run with a config file path, defaulting to `demos/config.toml`:
//!
//! ```text
//! cargo run --example echo_bot -- demos/config.toml
//! ```

use regex::Regex;
use sibyl::{Bot, Config, Response};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/config.toml".to_string());
    let config = Config::load(&config_path)?;

    let admins = config.admins.clone();
    let mut bot = Bot::new(config)?;
    let stop = bot.stop_handle();

    bot.on_messages(Regex::new(r"^!echo\s+(.+)$")?, |event| {
        let text = event.matches()[0].clone();
        if let Some(target) = event.request().source() {
            let target = target.to_string();
            event.add_response(Response::msg(target, text));
        }
        Ok(())
    });

    bot.on_channel(Regex::new(r"^!slap\s+(\S+)$")?, |event| {
        let victim = event.matches()[0].clone();
        let channel = event.request().channel().unwrap_or_default().to_string();
        event.add_response(Response::action(
            channel,
            format!("slaps {victim} around a bit with a large trout"),
        ));
        Ok(())
    });

    bot.on_join(|event| {
        if let (Some(nick), Some(channel)) =
            (event.request().sending_user(), event.request().channel())
        {
            info!(nick = %nick, channel = %channel, "join seen");
        }
        Ok(())
    });

    // Only configured admins may shut the bot down from IRC.
    bot.on_private_message(Regex::new(r"^!shutdown$")?, move |event| {
        let sender = event.request().sending_user().unwrap_or_default();
        if admins.iter().any(|a| a == sender) {
            event.add_response(Response::quit("shutting down"));
            stop.stop();
        }
        Ok(())
    });

    bot.run().await?;
    Ok(())
}
