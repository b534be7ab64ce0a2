//! Bot lifecycle wiring.
//!
//! [`Bot`] runs the whole bootstrap sequence once per process: load the
//! settings snapshot, connect the database pool (degrading to none on
//! failure), open the gateway connection through poise/serenity (fail-fast on
//! error), register slash commands, then run until a stop is triggered from
//! the console or a [`Shutdown`] handle. There is no reconnect modeling here;
//! gateway-level reconnection is serenity's job.

use crate::console::{self, ConsoleHandler};
use crate::db;
use crate::embed::{Embed, EmbedDefaults};
use crate::errors::{Error, Result};
use crate::settings::{FileSettings, Settings};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{error, info};

/// Shared data available to every command invocation.
pub struct BotData {
    /// Snapshot of the settings file.
    pub file: Arc<FileSettings>,
    /// Default values applied to embeds built through this bot.
    pub embed_defaults: EmbedDefaults,
    /// Database pool, when the settings file names one and it was reachable
    /// at startup.
    pub database: Option<DatabaseConnection>,
    /// Handle for triggering shutdown from command code.
    pub shutdown: Shutdown,
}

impl BotData {
    /// Whether the given user ID is a configured owner.
    #[must_use]
    pub fn is_owner(&self, id: u64) -> bool {
        self.file.is_owner(id)
    }
}

/// Context alias for commands written against this library.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// A cloneable handle that stops the bot when triggered.
#[derive(Debug, Clone)]
pub struct Shutdown(UnboundedSender<()>);

impl Shutdown {
    /// Requests shutdown. Idempotent; later calls are no-ops once the bot is
    /// stopping.
    pub fn trigger(&self) {
        let _ = self.0.send(());
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            let embed = Embed::unexpected_error(error.to_string()).build(&ctx.data().embed_defaults);
            let reply = poise::CreateReply::default().embed(embed).ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// The assembled bot, ready to run.
///
/// ```no_run
/// use botkit::{Bot, FileSettings, Settings};
///
/// # async fn example() -> botkit::Result<()> {
/// let file = FileSettings::load("config.toml")?;
/// Bot::new(file, Settings::new()).run().await
/// # }
/// ```
#[derive(Debug)]
pub struct Bot {
    file: FileSettings,
    settings: Settings,
}

impl Bot {
    /// Assembles the bot from an already-loaded settings snapshot.
    #[must_use]
    pub fn new(file: FileSettings, settings: Settings) -> Self {
        Self { file, settings }
    }

    /// Loads the settings file from `path` and assembles the bot.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>, settings: Settings) -> Result<Self> {
        Ok(Self::new(FileSettings::load(path)?, settings))
    }

    /// Runs the bot until shutdown.
    ///
    /// Blocks the calling task for the lifetime of the gateway connection.
    /// Returns `Ok(())` after a clean stop (console stop command or
    /// [`Shutdown::trigger`]).
    ///
    /// # Errors
    /// Fails fast when the token is missing, the client cannot be built, or
    /// the gateway connection errors out. A database connection or setup
    /// hook failure is *not* fatal; it is logged and commands see no pool.
    pub async fn run(self) -> Result<()> {
        let Self { file, mut settings } = self;

        // Environment first so the token fallback can see .env values
        dotenvy::dotenv().ok();
        let token = file.resolve_token()?;

        let database = match file.database.as_deref() {
            Some(url) => db::try_connect_and_setup(url, settings.on_database.take()).await,
            None => None,
        };

        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown(stop_tx.clone());

        let file = Arc::new(file);
        let owners = file.owner_ids();
        let commands = std::mem::take(&mut settings.commands);
        let command_count = commands.len();
        let embed_defaults = settings.embed_defaults.clone();
        let activities = settings.activities.clone();
        let activity_period = settings.activity_period;

        let setup_file = Arc::clone(&file);
        let setup_shutdown = shutdown.clone();
        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands,
                owners,
                on_error: |error| Box::pin(on_error(error)),
                ..Default::default()
            })
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Logged in as {}", ready.user.name);
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Registered {command_count} commands globally");
                    if !activities.is_empty() {
                        spawn_activity_rotation(ctx.clone(), activities, activity_period);
                    }
                    Ok(BotData {
                        file: setup_file,
                        embed_defaults,
                        database,
                        shutdown: setup_shutdown,
                    })
                })
            })
            .build();

        info!("Connecting to the gateway...");
        let mut client = serenity::ClientBuilder::new(&token, settings.intents)
            .cache_settings(settings.cache_settings)
            .framework(framework)
            .await?;

        // Console reader: stop keyword (when enabled) plus registered handlers
        let handlers: Vec<ConsoleHandler> = std::mem::take(&mut settings.console_handlers);
        let stop_keyword = settings
            .stop_command
            .then(|| settings.stop_keyword.clone());
        let _console_thread = console::spawn_reader(handlers, stop_keyword, stop_tx);

        // Turn a stop signal into a gateway shutdown; client.start() then
        // returns and run() completes cleanly.
        let shard_manager = Arc::clone(&client.shard_manager);
        let on_stop = settings.on_stop.take();
        tokio::spawn(async move {
            if stop_rx.recv().await.is_some() {
                info!("Shutdown requested; stopping gateway shards");
                if let Some(hook) = on_stop {
                    hook();
                }
                shard_manager.shutdown_all().await;
            }
        });

        info!("Starting bot client...");
        client.start().await?;
        info!("Bot stopped");
        Ok(())
    }
}

/// One rotation timer per process; the list is fixed at startup, so there is
/// nothing to cancel or restart.
fn spawn_activity_rotation(
    ctx: serenity::Context,
    activities: Vec<serenity::ActivityData>,
    period: std::time::Duration,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        let mut index = 0usize;
        loop {
            interval.tick().await;
            ctx.set_activity(Some(activities[index % activities.len()].clone()));
            index = index.wrapping_add(1);
        }
    });
}
