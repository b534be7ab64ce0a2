//! Fuzzy-match sorting for autocomplete suggestions.

/// Discord caps autocomplete responses at 25 choices.
pub const AUTOCOMPLETE_LIMIT: usize = 25;

/// Match quality, best first. Prefix matches rank above substring matches,
/// which rank above in-order subsequence matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Prefix,
    Substring,
    Subsequence,
}

fn rank(needle: &str, haystack: &str) -> Option<Rank> {
    if haystack.starts_with(needle) {
        Some(Rank::Prefix)
    } else if haystack.contains(needle) {
        Some(Rank::Substring)
    } else if is_subsequence(needle, haystack) {
        Some(Rank::Subsequence)
    } else {
        None
    }
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = haystack.chars();
    needle.chars().all(|c| chars.any(|h| h == c))
}

/// Ranks candidate names against a partially typed autocomplete input.
///
/// Matching is case-insensitive. Candidates that don't match at all are
/// dropped; the rest are ordered by match quality, ties broken
/// alphabetically, and capped at the Discord autocomplete limit. An empty
/// input matches everything (as a prefix), yielding an alphabetical listing.
#[must_use]
pub fn sort_choices(partial: &str, candidates: impl IntoIterator<Item = String>) -> Vec<String> {
    let needle = partial.trim().to_lowercase();
    let mut scored: Vec<(Rank, String, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let lower = candidate.to_lowercase();
            rank(&needle, &lower).map(|quality| (quality, lower, candidate))
        })
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    scored
        .into_iter()
        .map(|(_, _, candidate)| candidate)
        .take(AUTOCOMPLETE_LIMIT)
        .collect()
}
