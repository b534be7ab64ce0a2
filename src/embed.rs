//! Embed building with placeholder replacement and per-application defaults.
//!
//! [`Embed`] is a fluent builder over the scalar slots of a Discord embed plus
//! an ordered field list. On top of the plain setters it supports:
//!
//! - **replacements**: literal `token -> value` substitutions applied to every
//!   text slot and every field name/value when the embed is built, in the
//!   order they were registered;
//! - **defaults**: a per-application [`EmbedDefaults`] set (usually stored in
//!   [`crate::Settings`]) whose values fill any slot still unset at build
//!   time, unless that slot was disabled for this instance;
//! - **grid layout**: rows of inline fields padded to multiples of three so
//!   they render as aligned columns.
//!
//! Building is non-destructive: [`Embed::build`] works on a snapshot copy, so
//! the same builder can be built repeatedly (with different replacement maps
//! via [`Embed::clone`], for instance).

use crate::emoji::Emoji;
use crate::errors::Result;
use poise::serenity_prelude::{
    CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Background color of the Discord embed pane; an embed with this color
/// renders without a visible accent strip.
pub const BLEND_COLOR: u32 = 0x24_24_29;

const ERROR_COLOR: u32 = 0xff_00_00;

/// A single embed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// The defaultable slots of an [`Embed`], used to disable or re-enable
/// individual [`EmbedDefaults`] entries per embed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedKey {
    Color,
    AuthorName,
    AuthorUrl,
    AuthorIcon,
    TitleText,
    TitleUrl,
    Description,
    Thumbnail,
    Image,
    FooterText,
    FooterIcon,
    Timestamp,
}

impl EmbedKey {
    /// All defaultable slots.
    pub const ALL: [Self; 12] = [
        Self::Color,
        Self::AuthorName,
        Self::AuthorUrl,
        Self::AuthorIcon,
        Self::TitleText,
        Self::TitleUrl,
        Self::Description,
        Self::Thumbnail,
        Self::Image,
        Self::FooterText,
        Self::FooterIcon,
        Self::Timestamp,
    ];
}

/// Per-application default values for embed slots.
///
/// A default is applied only to a slot that is still unset after replacements
/// have run, and never to a slot disabled via [`Embed::disable_defaults`].
/// Explicitly set values always win.
#[derive(Debug, Clone, Default)]
pub struct EmbedDefaults {
    color: Option<u32>,
    author_name: Option<String>,
    author_url: Option<String>,
    author_icon: Option<String>,
    title_text: Option<String>,
    title_url: Option<String>,
    description: Option<String>,
    thumbnail: Option<String>,
    image: Option<String>,
    footer_text: Option<String>,
    footer_icon: Option<String>,
    timestamp: Option<i64>,
}

impl EmbedDefaults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn color(mut self, rgb: u32) -> Self {
        self.color = Some(rgb);
        self
    }

    #[must_use]
    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn author_url(mut self, url: impl Into<String>) -> Self {
        self.author_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn author_icon(mut self, url: impl Into<String>) -> Self {
        self.author_icon = Some(url.into());
        self
    }

    #[must_use]
    pub fn title_text(mut self, text: impl Into<String>) -> Self {
        self.title_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn title_url(mut self, url: impl Into<String>) -> Self {
        self.title_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    #[must_use]
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    #[must_use]
    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn footer_icon(mut self, url: impl Into<String>) -> Self {
        self.footer_icon = Some(url.into());
        self
    }

    /// Default timestamp in epoch milliseconds.
    #[must_use]
    pub fn timestamp(mut self, epoch_ms: i64) -> Self {
        self.timestamp = Some(epoch_ms);
        self
    }

    /// Fills every enabled, still-unset slot of `embed` from this set.
    fn apply(&self, embed: &mut Embed) {
        let enabled = |key: EmbedKey| !embed.disabled_defaults.contains(&key);
        if embed.color.is_none() && enabled(EmbedKey::Color) {
            embed.color = self.color;
        }
        if embed.author_name.is_none() && enabled(EmbedKey::AuthorName) {
            embed.author_name.clone_from(&self.author_name);
        }
        if embed.author_url.is_none() && enabled(EmbedKey::AuthorUrl) {
            embed.author_url.clone_from(&self.author_url);
        }
        if embed.author_icon.is_none() && enabled(EmbedKey::AuthorIcon) {
            embed.author_icon.clone_from(&self.author_icon);
        }
        if embed.title_text.is_none() && enabled(EmbedKey::TitleText) {
            embed.title_text.clone_from(&self.title_text);
        }
        if embed.title_url.is_none() && enabled(EmbedKey::TitleUrl) {
            embed.title_url.clone_from(&self.title_url);
        }
        if embed.description.is_none() && enabled(EmbedKey::Description) {
            embed.description.clone_from(&self.description);
        }
        if embed.thumbnail.is_none() && enabled(EmbedKey::Thumbnail) {
            embed.thumbnail.clone_from(&self.thumbnail);
        }
        if embed.image.is_none() && enabled(EmbedKey::Image) {
            embed.image.clone_from(&self.image);
        }
        if embed.footer_text.is_none() && enabled(EmbedKey::FooterText) {
            embed.footer_text.clone_from(&self.footer_text);
        }
        if embed.footer_icon.is_none() && enabled(EmbedKey::FooterIcon) {
            embed.footer_icon.clone_from(&self.footer_icon);
        }
        if embed.timestamp.is_none() && enabled(EmbedKey::Timestamp) {
            embed.timestamp = self.timestamp;
        }
    }
}

/// Wire representation of an embed, matching the JSON schema Discord clients
/// produce for message embeds.
#[derive(Debug, Default, Serialize, Deserialize)]
struct EmbedWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<AuthorWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<UrlWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<UrlWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<FooterWire>,
    /// Epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AuthorWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FieldWire {
    name: Option<String>,
    value: Option<String>,
    #[serde(default)]
    inline: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct UrlWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FooterWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

/// A fluent embed builder with replacement and default-value support.
#[derive(Debug, Clone, Default)]
pub struct Embed {
    color: Option<u32>,
    author_name: Option<String>,
    author_url: Option<String>,
    author_icon: Option<String>,
    title_text: Option<String>,
    title_url: Option<String>,
    description: Option<String>,
    thumbnail: Option<String>,
    image: Option<String>,
    fields: Vec<EmbedField>,
    footer_text: Option<String>,
    footer_icon: Option<String>,
    /// Epoch milliseconds.
    timestamp: Option<i64>,
    /// Literal substitutions applied at build time, in registration order.
    replacements: Vec<(String, String)>,
    /// Slots excluded from default application for this instance.
    disabled_defaults: HashSet<EmbedKey>,
}

impl Embed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pre-built embed for unexpected command errors.
    #[must_use]
    pub fn unexpected_error(error: impl Into<String>) -> Self {
        Self::new()
            .set_color(ERROR_COLOR)
            .set_title(format!("{} Unexpected error!", Emoji::WarningClear))
            .set_description(
                "An unexpected error occurred, please try again!\n*If the issue persists, please contact support*",
            )
            .add_field("Error", error, true)
    }

    /// A pre-built embed for a user lacking permission to do something.
    ///
    /// `requirement` is what they were missing (a role mention, for example).
    #[must_use]
    pub fn no_permission(requirement: impl Into<String>) -> Self {
        Self::new()
            .set_color(ERROR_COLOR)
            .set_title(format!("{} No permission!", Emoji::NoClear))
            .set_description(format!("You must have {} to do that!", requirement.into()))
    }

    /// A pre-built embed for an invalid command argument.
    #[must_use]
    pub fn invalid_argument(argument: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new()
            .set_color(ERROR_COLOR)
            .set_title(format!("{} Invalid argument!", Emoji::NoClear))
            .add_field(argument, value, true)
    }

    /// A completely blank rectangle: blends with the embed background and has
    /// all default slots disabled. Pairs well with [`Embed::grid_fields`].
    #[must_use]
    pub fn empty() -> Self {
        Self::new()
            .set_color(BLEND_COLOR)
            .disable_defaults(EmbedKey::ALL)
    }

    /// Parses an embed from its JSON wire form.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] when the input is not a JSON object in
    /// the expected schema, so malformed input is surfaced instead of
    /// producing a silently empty embed.
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: EmbedWire = serde_json::from_str(json)?;
        Ok(Self::from_wire(wire))
    }

    /// Parses an embed from a generic JSON value tree, e.g. a config section
    /// deserialized with `serde_json`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] when the value does not match the
    /// embed schema.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let wire: EmbedWire = serde_json::from_value(value)?;
        Ok(Self::from_wire(wire))
    }

    /// Serializes this embed to its JSON wire form.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_wire()).map_err(Into::into)
    }

    /// Serializes this embed to a generic JSON value tree.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_wire()).map_err(Into::into)
    }

    fn from_wire(wire: EmbedWire) -> Self {
        let mut embed = Self::new();
        if let Some(color) = wire.color {
            embed = embed.set_color(color);
        }
        if let Some(author) = wire.author {
            if let Some(name) = author.name {
                embed = embed.set_author_full(name, author.url, author.icon_url);
            }
        }
        if let Some(title) = wire.title {
            embed = embed.set_title_url(title, wire.url);
        }
        if let Some(description) = wire.description {
            embed = embed.set_description(description);
        }
        for field in wire.fields {
            // A field only materializes when both name and value are present
            if let (Some(name), Some(value)) = (field.name, field.value) {
                embed = embed.add_field(name, value, field.inline);
            }
        }
        if let Some(url) = wire.thumbnail.and_then(|thumbnail| thumbnail.url) {
            embed = embed.set_thumbnail(url);
        }
        if let Some(url) = wire.image.and_then(|image| image.url) {
            embed = embed.set_image(url);
        }
        if let Some(footer) = wire.footer {
            if let Some(text) = footer.text {
                embed = embed.set_footer_icon(text, footer.icon_url);
            }
        }
        if let Some(timestamp) = wire.timestamp {
            embed = embed.set_timestamp(timestamp);
        }
        embed
    }

    fn to_wire(&self) -> EmbedWire {
        EmbedWire {
            color: self.color,
            author: self.author_name.clone().map(|name| AuthorWire {
                name: Some(name),
                url: self.author_url.clone(),
                icon_url: self.author_icon.clone(),
            }),
            title: self.title_text.clone(),
            url: self.title_url.clone(),
            description: self.description.clone(),
            fields: self
                .fields
                .iter()
                .map(|field| FieldWire {
                    name: Some(field.name.clone()),
                    value: Some(field.value.clone()),
                    inline: field.inline,
                })
                .collect(),
            thumbnail: self.thumbnail.clone().map(|url| UrlWire { url: Some(url) }),
            image: self.image.clone().map(|url| UrlWire { url: Some(url) }),
            footer: self.footer_text.clone().map(|text| FooterWire {
                text: Some(text),
                icon_url: self.footer_icon.clone(),
            }),
            timestamp: self.timestamp,
        }
    }

    // --- setters -----------------------------------------------------------

    #[must_use]
    pub fn set_color(mut self, rgb: u32) -> Self {
        self.color = Some(rgb);
        self
    }

    #[must_use]
    pub fn set_author(self, name: impl Into<String>) -> Self {
        self.set_author_full(name, None, None)
    }

    #[must_use]
    pub fn set_author_full(
        mut self,
        name: impl Into<String>,
        url: Option<String>,
        icon_url: Option<String>,
    ) -> Self {
        self.author_name = Some(name.into());
        self.author_url = url;
        self.author_icon = icon_url;
        self
    }

    #[must_use]
    pub fn set_title(self, text: impl Into<String>) -> Self {
        self.set_title_url(text, None)
    }

    #[must_use]
    pub fn set_title_url(mut self, text: impl Into<String>, url: Option<String>) -> Self {
        self.title_text = Some(text.into());
        self.title_url = url;
        self
    }

    /// Sets the description. An empty string unsets it, so a replaced-away
    /// description does not render as a blank paragraph.
    #[must_use]
    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    #[must_use]
    pub fn set_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    #[must_use]
    pub fn set_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    #[must_use]
    pub fn set_footer(self, text: impl Into<String>) -> Self {
        self.set_footer_icon(text, None)
    }

    #[must_use]
    pub fn set_footer_icon(mut self, text: impl Into<String>, icon_url: Option<String>) -> Self {
        self.footer_text = Some(text.into());
        self.footer_icon = icon_url;
        self
    }

    /// Sets the timestamp in epoch milliseconds.
    #[must_use]
    pub fn set_timestamp(mut self, epoch_ms: i64) -> Self {
        self.timestamp = Some(epoch_ms);
        self
    }

    /// Sets the timestamp to the current time.
    #[must_use]
    pub fn set_timestamp_now(self) -> Self {
        self.set_timestamp(chrono::Utc::now().timestamp_millis())
    }

    #[must_use]
    pub fn add_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    #[must_use]
    pub fn add_fields(mut self, fields: impl IntoIterator<Item = EmbedField>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Adds a field with an empty name and value, rendered as a blank cell.
    #[must_use]
    pub fn add_empty_field(self, inline: bool) -> Self {
        self.add_field("", "", inline)
    }

    #[must_use]
    pub fn add_empty_fields(mut self, amount: usize, inline: bool) -> Self {
        for _ in 0..amount {
            self = self.add_empty_field(inline);
        }
        self
    }

    /// Lays out rows of named values as a three-column grid.
    ///
    /// Each row adds one inline field per non-empty value, then pads with
    /// empty inline fields to the next multiple of three so the row renders
    /// as aligned columns in clients that place three inline fields per line.
    #[must_use]
    pub fn grid_fields<'a, R>(mut self, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for row in rows {
            let mut added = 0usize;
            for (name, value) in row {
                if value.is_empty() {
                    continue;
                }
                self = self.add_field(name, value, true);
                added += 1;
            }
            let remainder = added % 3;
            if remainder != 0 {
                self = self.add_empty_fields(3 - remainder, true);
            }
        }
        self
    }

    #[must_use]
    pub fn clear_fields(mut self) -> Self {
        self.fields.clear();
        self
    }

    /// Registers a literal token replacement, applied at build time in
    /// registration order to author name, title text, description, footer
    /// text, and every field name and value.
    #[must_use]
    pub fn replace(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacements.push((token.into(), value.into()));
        self
    }

    /// Registers multiple literal token replacements.
    #[must_use]
    pub fn replace_all<I, K, V>(mut self, replacements: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (token, value) in replacements {
            self = self.replace(token, value);
        }
        self
    }

    /// Excludes slots from default application for this instance.
    #[must_use]
    pub fn disable_defaults(mut self, keys: impl IntoIterator<Item = EmbedKey>) -> Self {
        self.disabled_defaults.extend(keys);
        self
    }

    /// Re-enables slots for default application (all are enabled initially).
    #[must_use]
    pub fn enable_defaults(mut self, keys: impl IntoIterator<Item = EmbedKey>) -> Self {
        for key in keys {
            self.disabled_defaults.remove(&key);
        }
        self
    }

    // --- getters -----------------------------------------------------------

    #[must_use]
    pub fn color(&self) -> Option<u32> {
        self.color
    }

    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    #[must_use]
    pub fn author_url(&self) -> Option<&str> {
        self.author_url.as_deref()
    }

    #[must_use]
    pub fn author_icon(&self) -> Option<&str> {
        self.author_icon.as_deref()
    }

    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title_text.as_deref()
    }

    #[must_use]
    pub fn title_url(&self) -> Option<&str> {
        self.title_url.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &[EmbedField] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Looks up a field's value by name.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|field| field.value.as_str())
    }

    #[must_use]
    pub fn footer_text(&self) -> Option<&str> {
        self.footer_text.as_deref()
    }

    #[must_use]
    pub fn footer_icon(&self) -> Option<&str> {
        self.footer_icon.as_deref()
    }

    /// Timestamp in epoch milliseconds, if set.
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    // --- building ----------------------------------------------------------

    /// Returns a snapshot of this embed with replacements and defaults
    /// applied. The original builder is left untouched.
    #[must_use]
    pub fn resolved(&self, defaults: &EmbedDefaults) -> Self {
        let mut snapshot = self.clone();
        if !snapshot.replacements.is_empty() {
            let replacements = std::mem::take(&mut snapshot.replacements);
            apply_replacements(&mut snapshot.author_name, &replacements);
            apply_replacements(&mut snapshot.title_text, &replacements);
            apply_replacements(&mut snapshot.description, &replacements);
            apply_replacements(&mut snapshot.footer_text, &replacements);
            for field in &mut snapshot.fields {
                for (token, value) in &replacements {
                    field.name = field.name.replace(token, value);
                    field.value = field.value.replace(token, value);
                }
            }
        }
        defaults.apply(&mut snapshot);
        snapshot
    }

    /// Builds the final [`CreateEmbed`], applying replacements and then
    /// defaults to a snapshot copy. Safe to call repeatedly.
    #[must_use]
    pub fn build(&self, defaults: &EmbedDefaults) -> CreateEmbed {
        self.resolved(defaults).into_create_embed()
    }

    fn into_create_embed(self) -> CreateEmbed {
        let mut builder = CreateEmbed::new();
        if let Some(color) = self.color {
            builder = builder.color(color);
        }
        if let Some(name) = self.author_name {
            let mut author = CreateEmbedAuthor::new(name);
            if let Some(url) = self.author_url {
                author = author.url(url);
            }
            if let Some(icon) = self.author_icon {
                author = author.icon_url(icon);
            }
            builder = builder.author(author);
        }
        if let Some(text) = self.title_text {
            builder = builder.title(text);
        }
        if let Some(url) = self.title_url {
            builder = builder.url(url);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        for field in self.fields {
            builder = builder.field(field.name, field.value, field.inline);
        }
        if let Some(url) = self.thumbnail {
            builder = builder.thumbnail(url);
        }
        if let Some(url) = self.image {
            builder = builder.image(url);
        }
        if let Some(text) = self.footer_text {
            let mut footer = CreateEmbedFooter::new(text);
            if let Some(icon) = self.footer_icon {
                footer = footer.icon_url(icon);
            }
            builder = builder.footer(footer);
        }
        if let Some(epoch_ms) = self.timestamp {
            if let Ok(timestamp) = Timestamp::from_millis(epoch_ms) {
                builder = builder.timestamp(timestamp);
            }
        }
        builder
    }
}

fn apply_replacements(slot: &mut Option<String>, replacements: &[(String, String)]) {
    if let Some(text) = slot {
        for (token, value) in replacements {
            *text = text.replace(token, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_never_overwrite_explicit_values() {
        let defaults = EmbedDefaults::new()
            .color(0x00_ff_00)
            .footer_text("default footer");
        let embed = Embed::new().set_color(0xff_00_ff).set_title("hi");
        let resolved = embed.resolved(&defaults);
        assert_eq!(resolved.color(), Some(0xff_00_ff));
        assert_eq!(resolved.footer_text(), Some("default footer"));
        assert_eq!(resolved.title_text(), Some("hi"));
    }

    #[test]
    fn disabled_defaults_leave_slot_unset() {
        let defaults = EmbedDefaults::new()
            .footer_text("default footer")
            .color(0x12_34_56);
        let embed = Embed::new().disable_defaults([EmbedKey::FooterText]);
        let resolved = embed.resolved(&defaults);
        assert_eq!(resolved.footer_text(), None);
        // Other slots still receive defaults
        assert_eq!(resolved.color(), Some(0x12_34_56));
    }

    #[test]
    fn reenabled_defaults_apply_again() {
        let defaults = EmbedDefaults::new().description("fallback");
        let embed = Embed::new()
            .disable_defaults([EmbedKey::Description])
            .enable_defaults([EmbedKey::Description]);
        assert_eq!(embed.resolved(&defaults).description(), Some("fallback"));
    }

    #[test]
    fn replacements_cover_all_text_slots_and_fields() {
        let embed = Embed::new()
            .set_author("%who%'s report")
            .set_title("Report for %who%")
            .set_description("%who% spent %amount%")
            .set_footer("requested by %who%")
            .add_field("%who%", "%amount% and %amount%", false)
            .replace("%who%", "srnyx")
            .replace("%amount%", "$5");
        let resolved = embed.resolved(&EmbedDefaults::new());
        assert_eq!(resolved.author_name(), Some("srnyx's report"));
        assert_eq!(resolved.title_text(), Some("Report for srnyx"));
        assert_eq!(resolved.description(), Some("srnyx spent $5"));
        assert_eq!(resolved.footer_text(), Some("requested by srnyx"));
        assert_eq!(resolved.fields()[0].name, "srnyx");
        assert_eq!(resolved.fields()[0].value, "$5 and $5");
    }

    #[test]
    fn replacements_do_not_touch_unregistered_slots() {
        let embed = Embed::new()
            .set_thumbnail("https://example.com/%who%.png")
            .set_title("%who%")
            .replace("%who%", "srnyx");
        let resolved = embed.resolved(&EmbedDefaults::new());
        // URL slots are not replacement targets
        assert_eq!(resolved.thumbnail(), Some("https://example.com/%who%.png"));
        assert_eq!(resolved.title_text(), Some("srnyx"));
    }

    #[test]
    fn replacements_apply_in_registration_order() {
        let embed = Embed::new()
            .set_title("%a%")
            .replace("%a%", "%b%")
            .replace("%b%", "done");
        assert_eq!(
            embed.resolved(&EmbedDefaults::new()).title_text(),
            Some("done")
        );
    }

    #[test]
    fn build_is_non_destructive() {
        let defaults = EmbedDefaults::new().footer_text("footer");
        let embed = Embed::new().set_title("%n%").replace("%n%", "one");
        let first = embed.resolved(&defaults);
        let second = embed.resolved(&defaults);
        assert_eq!(first.title_text(), second.title_text());
        // The original still holds the unsubstituted text
        assert_eq!(embed.title_text(), Some("%n%"));
        let _ = embed.build(&defaults);
        let _ = embed.build(&defaults);
    }

    #[test]
    fn grid_rows_pad_to_multiples_of_three() {
        let embed = Embed::new().grid_fields([
            vec![("a", "1")],
            vec![("a", "1"), ("b", "2"), ("c", "3")],
            vec![("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")],
        ]);
        // N=1 -> 3, N=3 -> 3, N=4 -> 6
        assert_eq!(embed.fields().len(), 3 + 3 + 6);
        assert!(embed.fields().iter().all(|field| field.inline));
        assert_eq!(embed.fields()[1].name, "");
        assert_eq!(embed.fields()[1].value, "");
    }

    #[test]
    fn grid_skips_empty_values() {
        let embed = Embed::new().grid_fields([vec![("a", "1"), ("b", ""), ("c", "3")]]);
        // Two real fields plus one pad cell
        assert_eq!(embed.fields().len(), 3);
        assert_eq!(embed.fields()[0].name, "a");
        assert_eq!(embed.fields()[1].name, "c");
        assert_eq!(embed.fields()[2].name, "");
    }

    #[test]
    fn json_round_trip() {
        let embed = Embed::new()
            .set_color(0xab_cd_ef)
            .set_author_full(
                "author",
                Some("https://example.com".into()),
                Some("https://example.com/icon.png".into()),
            )
            .set_title_url("title", Some("https://example.com/t".into()))
            .set_description("description")
            .add_field("name", "value", true)
            .set_thumbnail("https://example.com/thumb.png")
            .set_image("https://example.com/image.png")
            .set_footer_icon("footer", Some("https://example.com/f.png".into()))
            .set_timestamp(1_700_000_000_000);
        let json = embed.to_json().unwrap();
        let parsed = Embed::from_json(&json).unwrap();
        assert_eq!(parsed.color(), Some(0xab_cd_ef));
        assert_eq!(parsed.author_name(), Some("author"));
        assert_eq!(parsed.author_icon(), Some("https://example.com/icon.png"));
        assert_eq!(parsed.title_url(), Some("https://example.com/t"));
        assert_eq!(parsed.fields(), embed.fields());
        assert_eq!(parsed.footer_text(), Some("footer"));
        assert_eq!(parsed.timestamp(), Some(1_700_000_000_000));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Embed::from_json("not json at all").is_err());
        assert!(Embed::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn json_field_without_value_is_dropped() {
        let embed =
            Embed::from_json(r#"{"fields": [{"name": "only name"}, {"name": "a", "value": "b"}]}"#)
                .unwrap();
        assert_eq!(embed.fields().len(), 1);
        assert_eq!(embed.fields()[0].name, "a");
    }

    #[test]
    fn empty_string_description_unsets() {
        let embed = Embed::new().set_description("");
        assert_eq!(embed.description(), None);
    }

    #[test]
    fn field_lookup() {
        let embed = Embed::new()
            .add_field("Balance", "$10", true)
            .add_field("Spent", "$2", true);
        assert_eq!(embed.field_value("Spent"), Some("$2"));
        assert_eq!(embed.field_value("Missing"), None);
    }

    #[test]
    fn empty_embed_disables_everything() {
        let defaults = EmbedDefaults::new()
            .title_text("default title")
            .footer_text("default footer")
            .timestamp(1);
        let resolved = Embed::empty().resolved(&defaults);
        assert_eq!(resolved.color(), Some(BLEND_COLOR));
        assert_eq!(resolved.title_text(), None);
        assert_eq!(resolved.footer_text(), None);
        assert_eq!(resolved.timestamp(), None);
    }
}
