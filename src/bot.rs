//! The session driver: connect, authenticate, join, listen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use sibyl_proto::{LineTransport, ProtocolError, Request, Response, Transport};
use tracing::{debug, info, warn};

use crate::action::{Action, Callback};
use crate::config::Config;
use crate::error::{BotError, HandlerResult};
use crate::event::{Event, EventClass};
use crate::plugin::Plugin;
use crate::router::Router;

/// Cooperative stop signal for a running bot.
///
/// The session loop checks the flag once per iteration; in-flight
/// handler execution is never preempted.
#[derive(Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the session loop to exit at its next iteration.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// An IRC bot: configuration, router, plugins, and the session loop.
///
/// Register handlers and load plugins first, then call [`run`](Bot::run).
/// Registration during an active session is not supported.
pub struct Bot {
    config: Config,
    router: Router,
    plugins: Vec<Arc<dyn Plugin>>,
    stop: Arc<AtomicBool>,
    help_registered: bool,
}

impl Bot {
    /// Create a bot from a validated configuration.
    pub fn new(config: Config) -> Result<Self, BotError> {
        config.validate()?;
        let router = Router::new(config.nick.clone());

        Ok(Bot {
            config,
            router,
            plugins: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
            help_registered: false,
        })
    }

    /// The bot's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The bot's router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// True if `nick` is on the configured admin allow-list.
    pub fn is_admin(&self, nick: &str) -> bool {
        self.config.admins.iter().any(|admin| admin == nick)
    }

    /// A handle that can stop the session loop from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stop))
    }

    /// Register a handler for an event class, with an optional pattern
    /// over the message body.
    pub fn register<F>(&mut self, class: EventClass, pattern: Option<Regex>, callback: F)
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.router.register(class, Action::new(pattern, callback));
    }

    /// Handler for messages spoken in a channel.
    pub fn on_channel<F>(&mut self, pattern: Regex, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(EventClass::ChannelMessage, Some(pattern), callback);
        self
    }

    /// Handler for private messages to the bot.
    pub fn on_private_message<F>(&mut self, pattern: Regex, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(EventClass::PrivateMessage, Some(pattern), callback);
        self
    }

    /// Handler for both channel and private messages.
    pub fn on_messages<F>(&mut self, pattern: Regex, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(callback);
        self.router.register(
            EventClass::ChannelMessage,
            Action::shared(Some(pattern.clone()), Arc::clone(&callback)),
        );
        self.router.register(
            EventClass::PrivateMessage,
            Action::shared(Some(pattern), callback),
        );
        self
    }

    /// Handler for JOIN lines.
    pub fn on_join<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_server("join", callback)
    }

    /// Handler for PART lines.
    pub fn on_part<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_server("part", callback)
    }

    /// Handler for ERROR lines.
    pub fn on_error<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_server("error", callback)
    }

    /// Handler for NOTICE lines.
    pub fn on_notice<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_server("notice", callback)
    }

    /// Handler for an arbitrary server command, by name.
    pub fn on_server<F>(&mut self, command: &str, callback: F) -> &mut Self
    where
        F: Fn(&mut Event<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(EventClass::server(command), None, callback);
        self
    }

    /// Load a plugin: runs its `init` and keeps it for boot and help.
    pub fn load_plugin(&mut self, plugin: Arc<dyn Plugin>) -> &mut Self {
        debug!(plugin = plugin.name(), "loading plugin");
        plugin.init(self);
        self.plugins.push(plugin);
        self
    }

    /// Load several plugins in order.
    pub fn load_plugins(&mut self, plugins: Vec<Arc<dyn Plugin>>) -> &mut Self {
        for plugin in plugins {
            self.load_plugin(plugin);
        }
        self
    }

    /// Look up a loaded plugin by name.
    pub fn plugin(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.iter().find(|p| p.name() == name)
    }

    /// Connect to the configured server and drive the session to
    /// completion. Connection failure is fatal; there are no retries at
    /// this layer.
    pub async fn run(&mut self) -> Result<(), BotError> {
        let host = self.config.hostname.clone();
        let port = self.config.port;

        info!(host = %host, port, nick = %self.config.nick, "connecting");
        let mut transport =
            Transport::connect(&host, port)
                .await
                .map_err(|source| BotError::Connect {
                    host,
                    port,
                    source,
                })?;

        self.run_with_transport(&mut transport).await
    }

    /// Drive a full session over a caller-supplied transport.
    ///
    /// Authenticates, joins the configured channels, boots plugins, and
    /// listens until EOF or a stop request.
    pub async fn run_with_transport<T>(&mut self, transport: &mut T) -> Result<(), BotError>
    where
        T: LineTransport + ?Sized,
    {
        self.register_help_handler()?;

        self.authenticate(transport).await?;
        self.join_channels(transport).await?;
        self.boot_plugins();
        self.listen(transport).await
    }

    /// Register the built-in `!help` responder once plugins exist.
    fn register_help_handler(&mut self) -> Result<(), BotError> {
        if self.help_registered || self.plugins.is_empty() {
            return Ok(());
        }

        let plugins = self.plugins.clone();
        let callback: Callback = Arc::new(move |event: &mut Event<'_>| {
            for plugin in &plugins {
                plugin.help(event);
            }
            Ok(())
        });

        let pattern = Regex::new(r"^!help$")?;
        self.router.register(
            EventClass::ChannelMessage,
            Action::shared(Some(pattern.clone()), Arc::clone(&callback)),
        );
        self.router
            .register(EventClass::PrivateMessage, Action::shared(Some(pattern), callback));
        self.help_registered = true;
        Ok(())
    }

    async fn authenticate<T>(&self, transport: &mut T) -> Result<(), BotError>
    where
        T: LineTransport + ?Sized,
    {
        if let Some(password) = &self.config.password {
            self.send(transport, &Response::pass(password.clone())).await?;
        }

        self.send(transport, &Response::nick(self.config.nick.clone()))
            .await?;
        self.send(
            transport,
            &Response::user(
                self.config.username().to_string(),
                self.config.hostname.clone(),
                self.config.servername.clone(),
                self.config.realname.clone(),
            ),
        )
        .await?;

        info!(nick = %self.config.nick, "authenticated");
        Ok(())
    }

    async fn join_channels<T>(&self, transport: &mut T) -> Result<(), BotError>
    where
        T: LineTransport + ?Sized,
    {
        for channel in &self.config.channels {
            self.send(transport, &Response::join(channel.clone())).await?;
            info!(channel = %channel, "joining");
        }
        Ok(())
    }

    fn boot_plugins(&self) {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "booting plugin");
            plugin.boot(self.config.plugins.get(plugin.name()));
        }
    }

    /// The read/dispatch/write loop.
    ///
    /// A line that fails to parse is dropped and logged; the loop
    /// continues. The stop flag is checked once per iteration.
    async fn listen<T>(&self, transport: &mut T) -> Result<(), BotError>
    where
        T: LineTransport + ?Sized,
    {
        info!("listening");

        loop {
            if self.stop.load(Ordering::SeqCst) {
                info!("stop requested; closing session");
                break;
            }

            let line = match transport.read_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("connection closed by peer");
                    break;
                }
                Err(ProtocolError::Io(e)) => return Err(ProtocolError::Io(e).into()),
                Err(e) => {
                    warn!(error = %e, "dropping unreadable line");
                    continue;
                }
            };

            if line.is_empty() {
                continue;
            }
            debug!(line = %line, "recv");

            let request = match line.parse::<Request>() {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "dropping unparseable line");
                    continue;
                }
            };

            let batch = self.router.dispatch(&request);
            if !batch.is_empty() {
                self.send_batch(transport, &batch).await?;
            }
        }

        Ok(())
    }

    async fn send<T>(&self, transport: &mut T, response: &Response) -> Result<(), BotError>
    where
        T: LineTransport + ?Sized,
    {
        let line = response.to_string();
        debug!(line = %line, "send");
        transport.write_line(&line).await?;

        let interval = self.config.unflood.interval_ms;
        if interval > 0 {
            tokio::time::sleep(Duration::from_millis(interval)).await;
        }

        Ok(())
    }

    async fn send_batch<T>(&self, transport: &mut T, batch: &[Response]) -> Result<(), BotError>
    where
        T: LineTransport + ?Sized,
    {
        for response in batch {
            self.send(transport, response).await?;
        }

        let delay = self.config.unflood.delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        Ok(())
    }
}
