//! Lazy lookups for channels and roles configured by ID.
//!
//! Config files refer to guild objects by raw snowflake; these wrappers pair
//! the ID with its guild and resolve against the serenity cache on demand,
//! so a missing or deleted object is just `None` instead of a startup error.

use poise::serenity_prelude::{Cache, ChannelId, GuildChannel, GuildId, Member, Role, RoleId};

/// A channel configured by ID, resolved lazily from the cached guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRef {
    pub guild: GuildId,
    pub id: ChannelId,
}

impl ChannelRef {
    #[must_use]
    pub fn new(guild: GuildId, id: u64) -> Self {
        Self {
            guild,
            id: ChannelId::new(id),
        }
    }

    /// The channel mention, `<#id>`.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }

    /// Resolves the channel from the cached guild, `None` when the guild is
    /// not cached or the channel no longer exists.
    #[must_use]
    pub fn resolve(&self, cache: &Cache) -> Option<GuildChannel> {
        cache.guild(self.guild)?.channels.get(&self.id).cloned()
    }
}

/// A role configured by ID, resolved lazily from the cached guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRef {
    pub guild: GuildId,
    pub id: RoleId,
}

impl RoleRef {
    #[must_use]
    pub fn new(guild: GuildId, id: u64) -> Self {
        Self {
            guild,
            id: RoleId::new(id),
        }
    }

    /// The role mention, `<@&id>`.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }

    /// Resolves the role from the cached guild, `None` when the guild is not
    /// cached or the role no longer exists.
    #[must_use]
    pub fn resolve(&self, cache: &Cache) -> Option<Role> {
        cache.guild(self.guild)?.roles.get(&self.id).cloned()
    }

    /// Whether the member carries this role.
    #[must_use]
    pub fn member_has_role(&self, member: &Member) -> bool {
        member.roles.contains(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_mention() {
        let channel = ChannelRef::new(GuildId::new(1), 42);
        assert_eq!(channel.mention(), "<#42>");
    }

    #[test]
    fn role_mention() {
        let role = RoleRef::new(GuildId::new(1), 99);
        assert_eq!(role.mention(), "<@&99>");
    }

    #[test]
    fn unknown_guild_resolves_to_none() {
        let cache = Cache::new();
        let channel = ChannelRef::new(GuildId::new(1), 42);
        assert!(channel.resolve(&cache).is_none());
        let role = RoleRef::new(GuildId::new(1), 99);
        assert!(role.resolve(&cache).is_none());
    }
}
