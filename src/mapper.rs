//! Best-effort string conversions.
//!
//! Every function here swallows parse failures into `None` so that callers
//! handling user-supplied text (command arguments, config values, autocomplete
//! input) can chain conversions without error plumbing.

use poise::serenity_prelude::{ChannelId, RoleId, UserId};

/// Parses a string into a `u64`, returning `None` on failure.
#[must_use]
pub fn to_u64(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

/// Parses a string into an `i64`, returning `None` on failure.
#[must_use]
pub fn to_i64(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Parses a string into an `f64`, returning `None` on failure.
#[must_use]
pub fn to_f64(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Parses a snowflake string into a [`UserId`].
///
/// Zero is not a valid snowflake and maps to `None`.
#[must_use]
pub fn to_user_id(value: &str) -> Option<UserId> {
    to_snowflake(value).map(UserId::new)
}

/// Parses a snowflake string into a [`ChannelId`].
#[must_use]
pub fn to_channel_id(value: &str) -> Option<ChannelId> {
    to_snowflake(value).map(ChannelId::new)
}

/// Parses a snowflake string into a [`RoleId`].
#[must_use]
pub fn to_role_id(value: &str) -> Option<RoleId> {
    to_snowflake(value).map(RoleId::new)
}

fn to_snowflake(value: &str) -> Option<u64> {
    to_u64(value).filter(|id| *id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_conversions_succeed() {
        assert_eq!(to_u64("42"), Some(42));
        assert_eq!(to_u64(" 42 "), Some(42));
        assert_eq!(to_i64("-7"), Some(-7));
        assert_eq!(to_f64("2.5"), Some(2.5));
    }

    #[test]
    fn numeric_conversions_swallow_failures() {
        assert_eq!(to_u64("banana"), None);
        assert_eq!(to_u64("-1"), None);
        assert_eq!(to_i64("1.5"), None);
        assert_eq!(to_f64(""), None);
    }

    #[test]
    fn snowflake_conversions() {
        assert_eq!(to_user_id("1095912430443450469"), Some(UserId::new(1095912430443450469)));
        assert_eq!(to_user_id("0"), None);
        assert_eq!(to_channel_id("not a number"), None);
        assert_eq!(to_role_id("123"), Some(RoleId::new(123)));
    }
}
