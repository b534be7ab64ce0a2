//! `botkit` - scaffolding for poise/serenity Discord bots
//!
//! This crate wires together the boilerplate every bot repeats: settings-file
//! loading with token/owner resolution, gateway intent and cache
//! configuration, database pool wiring, slash command registration, a console
//! command loop with a stop command, and activity rotation. Around that it
//! provides small helper types: an embed builder with placeholder replacement
//! and per-application defaults, a free-text duration parser, best-effort
//! value mapping, fuzzy-match sorting for autocomplete, custom emoji
//! wrappers, and lazy channel/role lookups.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Performance
    clippy::inefficient_to_string,
    clippy::needless_pass_by_value,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::must_use_candidate,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Errors sections added where they say something
    clippy::missing_panics_doc,
)]

/// Bot lifecycle: bootstrap, gateway connection, shutdown
pub mod bot;
/// Console command parsing and dispatch
pub mod console;
/// Database pool wiring
pub mod db;
/// Free-text duration parsing
pub mod duration;
/// Embed building with replacements and defaults
pub mod embed;
/// Application custom emoji
pub mod emoji;
/// Unified error types and result handling
pub mod errors;
/// Fuzzy-match sorting for autocomplete
pub mod fuzzy;
/// Lazy channel/role lookups for ID-configured objects
pub mod lookup;
/// Best-effort string conversions
pub mod mapper;
/// Settings file snapshot and pre-start configuration
pub mod settings;

pub use bot::{Bot, BotData, Context, Shutdown};
pub use console::ConsoleCommand;
pub use db::DatabaseHook;
pub use embed::{Embed, EmbedDefaults, EmbedField, EmbedKey};
pub use emoji::Emoji;
pub use errors::{Error, Result};
pub use lookup::{ChannelRef, RoleRef};
pub use settings::{FileSettings, Settings};

use tracing_subscriber::EnvFilter;

/// Initializes a `tracing` subscriber for bots that don't bring their own:
/// formatted output with `RUST_LOG` filtering, defaulting to `info`.
///
/// Call once, as early as possible. Library code itself never installs a
/// subscriber.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
