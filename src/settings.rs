//! Bot configuration: the on-disk settings file and the pre-start
//! programmatic settings.

use crate::bot::BotData;
use crate::console::ConsoleHandler;
use crate::db::DatabaseHook;
use crate::embed::EmbedDefaults;
use crate::errors::{Error, Result};
use poise::serenity_prelude::{ActivityData, GatewayIntents, Settings as CacheSettings, UserId};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use std::{env, fs};

/// Environment variable consulted when the settings file has no `token` key.
pub const TOKEN_ENV_VAR: &str = "DISCORD_BOT_TOKEN";

/// Read-only snapshot of the settings file, loaded once at startup.
///
/// Recognized keys: `token` (string secret), `database` (connection URL),
/// `owners.primary` (user ID), `owners.other` (list of user IDs). Missing
/// optional keys resolve to absent/empty, not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSettings {
    /// Bot token. May be omitted in favor of the `DISCORD_BOT_TOKEN`
    /// environment variable (keep secrets out of checked-in config).
    pub token: Option<String>,
    /// Database connection URL; when absent the bot runs without a pool.
    pub database: Option<String>,
    /// Owner configuration; defaults to no owners.
    #[serde(default)]
    pub owners: Owners,
}

/// The `owners` section of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owners {
    /// The primary owner's user ID.
    pub primary: Option<u64>,
    /// Additional owner user IDs.
    #[serde(default)]
    pub other: Vec<u64>,
}

impl FileSettings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!("Loading settings from: {:?}", path_ref);
        let contents = fs::read_to_string(path_ref).map_err(|e| {
            Error::Config(format!("Failed to read settings file {path_ref:?}: {e}"))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the string is not valid TOML or does
    /// not match the settings schema.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(format!("Failed to parse settings: {e}")))
    }

    /// Resolves the bot token from the file or, failing that, from the
    /// `DISCORD_BOT_TOKEN` environment variable (loaded from `.env` by
    /// `dotenvy` during [`crate::Bot::run`]).
    ///
    /// # Errors
    /// Returns [`Error::Config`] when neither source provides a token.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        env::var(TOKEN_ENV_VAR).map_err(|_| {
            Error::Config(format!(
                "No token in settings file and {TOKEN_ENV_VAR} is not set"
            ))
        })
    }

    /// Whether the given user ID is the primary owner or one of the other
    /// owners.
    #[must_use]
    pub fn is_owner(&self, id: u64) -> bool {
        self.owners.primary == Some(id) || self.owners.other.contains(&id)
    }

    /// The full owner set as serenity IDs, for poise's owner checks.
    #[must_use]
    pub fn owner_ids(&self) -> HashSet<UserId> {
        self.owners
            .primary
            .into_iter()
            .chain(self.owners.other.iter().copied())
            .filter(|id| *id != 0)
            .map(UserId::new)
            .collect()
    }
}

/// Mutable pre-start configuration, populated before the gateway connection
/// is opened and read-only afterwards.
///
/// Every setter returns `Self` for chaining:
///
/// ```no_run
/// use botkit::{EmbedDefaults, Settings};
/// use poise::serenity_prelude::{ActivityData, GatewayIntents};
///
/// let settings = Settings::new()
///     .intents(GatewayIntents::non_privileged() | GatewayIntents::GUILD_MEMBERS)
///     .activity(ActivityData::playing("with envelopes"))
///     .embed_defaults(EmbedDefaults::new().color(0x00_ff_00))
///     .on_console(|command| println!("got console command: {}", command.name()));
/// ```
pub struct Settings {
    /// Gateway intents to connect with.
    pub intents: GatewayIntents,
    /// Serenity cache behavior (max messages, TTLs, ...).
    pub cache_settings: CacheSettings,
    /// Whether the built-in console stop command is active.
    pub stop_command: bool,
    /// The console line that triggers shutdown when [`Self::stop_command`]
    /// is enabled.
    pub stop_keyword: String,
    /// Default values applied to embeds built through this bot.
    pub embed_defaults: EmbedDefaults,
    /// Activities rotated through at a fixed period after startup. Empty
    /// disables rotation.
    pub activities: Vec<ActivityData>,
    /// Period of the activity rotation timer.
    pub activity_period: Duration,
    pub(crate) commands: Vec<poise::Command<BotData, Error>>,
    pub(crate) console_handlers: Vec<ConsoleHandler>,
    pub(crate) on_database: Option<DatabaseHook>,
    pub(crate) on_stop: Option<Box<dyn FnOnce() + Send>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intents: GatewayIntents::non_privileged(),
            cache_settings: CacheSettings::default(),
            stop_command: true,
            stop_keyword: "stop".to_string(),
            embed_defaults: EmbedDefaults::new(),
            activities: Vec::new(),
            activity_period: Duration::from_secs(180),
            commands: Vec::new(),
            console_handlers: Vec::new(),
            on_database: None,
            on_stop: None,
        }
    }
}

impl Settings {
    /// Settings with the defaults described on each field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds gateway intents on top of the non-privileged baseline.
    #[must_use]
    pub fn intents(mut self, intents: GatewayIntents) -> Self {
        self.intents |= intents;
        self
    }

    /// Replaces the serenity cache settings.
    #[must_use]
    pub fn cache_settings(mut self, cache_settings: CacheSettings) -> Self {
        self.cache_settings = cache_settings;
        self
    }

    /// Enables or disables the built-in console stop command.
    #[must_use]
    pub fn stop_command(mut self, enabled: bool) -> Self {
        self.stop_command = enabled;
        self
    }

    /// Changes the console line that triggers shutdown.
    #[must_use]
    pub fn stop_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.stop_keyword = keyword.into();
        self
    }

    /// Sets the default values applied to embeds built through this bot.
    #[must_use]
    pub fn embed_defaults(mut self, defaults: EmbedDefaults) -> Self {
        self.embed_defaults = defaults;
        self
    }

    /// Adds an activity to the rotation.
    #[must_use]
    pub fn activity(mut self, activity: ActivityData) -> Self {
        self.activities.push(activity);
        self
    }

    /// Adds several activities to the rotation.
    #[must_use]
    pub fn activities(mut self, activities: impl IntoIterator<Item = ActivityData>) -> Self {
        self.activities.extend(activities);
        self
    }

    /// Changes the rotation period (three minutes by default).
    #[must_use]
    pub fn activity_period(mut self, period: Duration) -> Self {
        self.activity_period = period;
        self
    }

    /// Registers a slash command. Commands receive the shared [`BotData`]
    /// (settings snapshot, embed defaults, optional database connection)
    /// through the poise context.
    #[must_use]
    pub fn command(mut self, command: poise::Command<BotData, Error>) -> Self {
        self.commands.push(command);
        self
    }

    /// Registers several slash commands.
    #[must_use]
    pub fn commands(
        mut self,
        commands: impl IntoIterator<Item = poise::Command<BotData, Error>>,
    ) -> Self {
        self.commands.extend(commands);
        self
    }

    /// Registers a console command handler. Handlers run in registration
    /// order on the console reader thread.
    #[must_use]
    pub fn on_console(
        mut self,
        handler: impl Fn(&crate::console::ConsoleCommand) + Send + Sync + 'static,
    ) -> Self {
        self.console_handlers.push(Box::new(handler));
        self
    }

    /// Registers a one-shot database setup hook, run right after the pool
    /// connects and before the gateway opens. Schema creation and migrations
    /// go here:
    ///
    /// ```no_run
    /// use botkit::Settings;
    /// use sea_orm::{ConnectionTrait, Schema};
    ///
    /// let settings = Settings::new().on_database(|db| {
    ///     Box::pin(async move {
    ///         let schema = Schema::new(db.get_database_backend());
    ///         // build and execute create-table statements here
    ///         let _ = schema;
    ///         Ok(())
    ///     })
    /// });
    /// ```
    ///
    /// A hook failure is logged and the bot starts without a database, the
    /// same as a failed connection.
    #[must_use]
    pub fn on_database(
        mut self,
        hook: impl FnOnce(DatabaseConnection) -> poise::BoxFuture<'static, Result<()>> + Send + 'static,
    ) -> Self {
        self.on_database = Some(Box::new(hook));
        self
    }

    /// Registers a hook that runs once when shutdown is triggered, before
    /// the gateway shards are stopped.
    #[must_use]
    pub fn on_stop(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_stop = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("intents", &self.intents)
            .field("stop_command", &self.stop_command)
            .field("stop_keyword", &self.stop_keyword)
            .field("activities", &self.activities.len())
            .field("activity_period", &self.activity_period)
            .field("commands", &self.commands.len())
            .field("console_handlers", &self.console_handlers.len())
            .finish_non_exhaustive()
    }
}
