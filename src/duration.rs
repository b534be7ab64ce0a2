//! Free-text duration parsing.
//!
//! Turns strings like `"1d 2h30m"` or `"2 weeks, 3 days"` into a
//! [`std::time::Duration`]. Seven units are recognized in fixed order (years,
//! months, weeks, days, hours, minutes, seconds), each with a small set of
//! case-insensitive spellings. Years and months use fixed nominal lengths
//! (the average Gregorian year of 365.2425 days and one twelfth of it), not
//! calendar arithmetic.

use crate::mapper;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Unit suffix spellings, longest-duration unit first. Group order in the
/// compiled pattern matches this order.
const UNIT_PATTERNS: [&str; 7] = [
    "y(?:ear)?s?",
    "mo(?:nth)?s?",
    "w(?:eek)?s?",
    "d(?:ay)?s?",
    "h(?:our|r)?s?",
    "m(?:inute|in)?s?",
    "s(?:econd|ec)?s?",
];

/// Nominal length of each unit in seconds, aligned with [`UNIT_PATTERNS`].
const UNIT_SECONDS: [u64; 7] = [31_556_952, 2_629_746, 604_800, 86_400, 3_600, 60, 1];

#[allow(clippy::expect_used)]
static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut pattern = String::from(r"(?i)^\s*");
    for unit in UNIT_PATTERNS {
        pattern.push_str(r"(?:(\d+)\s*");
        pattern.push_str(unit);
        pattern.push_str(r"[,\s]*)?");
    }
    pattern.push('$');
    Regex::new(&pattern).expect("duration pattern is valid")
});

/// Parses a duration from free text.
///
/// Returns `None` when the input does not match the grammar at all. An input
/// that matches with zero unit groups present (such as the empty string or
/// pure whitespace) is valid and yields a zero duration; callers that need to
/// distinguish "explicitly zero" from "nothing entered" must check the input
/// themselves. A matched count that fails integer parsing (only possible via
/// overflow, since the capture is digit-only) contributes nothing instead of
/// failing the parse.
///
/// ```
/// use std::time::Duration;
/// assert_eq!(botkit::duration::parse("2h30m"), Some(Duration::from_secs(9_000)));
/// assert_eq!(botkit::duration::parse("banana"), None);
/// ```
#[must_use]
pub fn parse(input: &str) -> Option<Duration> {
    let captures = PATTERN.captures(input)?;
    let mut total = Duration::ZERO;
    for (index, unit_seconds) in UNIT_SECONDS.iter().enumerate() {
        let Some(group) = captures.get(index + 1) else {
            continue;
        };
        if let Some(count) = mapper::to_u64(group.as_str()) {
            total = total.saturating_add(Duration::from_secs(count.saturating_mul(*unit_seconds)));
        }
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: u64 = 3_600;
    const DAY: u64 = 86_400;

    #[test]
    fn single_units() {
        assert_eq!(parse("1s"), Some(Duration::from_secs(1)));
        assert_eq!(parse("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse("2h"), Some(Duration::from_secs(2 * HOUR)));
        assert_eq!(parse("3d"), Some(Duration::from_secs(3 * DAY)));
        assert_eq!(parse("1w"), Some(Duration::from_secs(604_800)));
        assert_eq!(parse("1mo"), Some(Duration::from_secs(2_629_746)));
        assert_eq!(parse("1y"), Some(Duration::from_secs(31_556_952)));
    }

    #[test]
    fn spelling_variants_and_case() {
        assert_eq!(parse("2 hours"), Some(Duration::from_secs(2 * HOUR)));
        assert_eq!(parse("2HR"), Some(Duration::from_secs(2 * HOUR)));
        assert_eq!(parse("10 MINUTES"), Some(Duration::from_secs(600)));
        assert_eq!(parse("4 secs"), Some(Duration::from_secs(4)));
        assert_eq!(parse("1 Week"), Some(Duration::from_secs(604_800)));
    }

    #[test]
    fn combined_units_in_canonical_order() {
        assert_eq!(parse("2h30m"), Some(Duration::from_secs(2 * HOUR + 30 * 60)));
        assert_eq!(
            parse("1d 2h30m"),
            Some(Duration::from_secs(DAY + 2 * HOUR + 30 * 60))
        );
        assert_eq!(
            parse("1 year, 2 months, 3 weeks"),
            Some(Duration::from_secs(31_556_952 + 2 * 2_629_746 + 3 * 604_800))
        );
    }

    #[test]
    fn empty_and_whitespace_are_zero() {
        assert_eq!(parse(""), Some(Duration::ZERO));
        assert_eq!(parse("   "), Some(Duration::ZERO));
    }

    #[test]
    fn non_matching_input_is_absent() {
        assert_eq!(parse("banana"), None);
        assert_eq!(parse("h2"), None);
        // Units out of canonical order do not match the anchored pattern
        assert_eq!(parse("30m 2h"), None);
        assert_eq!(parse("2x"), None);
    }

    #[test]
    fn overflowing_count_contributes_nothing() {
        // 39 digits overflows u64; the group still matched, so the overall
        // parse succeeds with that unit skipped.
        assert_eq!(
            parse("999999999999999999999999999999999999999s"),
            Some(Duration::ZERO)
        );
    }
}
