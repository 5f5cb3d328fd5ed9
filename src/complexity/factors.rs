//! Pure factor counters. Each function counts one factor from already
//! lowercased ticket text or attribute lists; clamping happens in the scorer.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ACCEPTANCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:given|when|then|acceptance)\b|\[[ x]\]").unwrap()
});

static ROLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(user|admin|operator|customer|developer)s?\b").unwrap()
});

/// Split free text into lowercase word tokens. Hyphens and underscores stay
/// inside tokens so `read-replica` is one token.
pub fn text_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// B: distinct substrings matched by any bespoke pattern.
pub fn count_bespoke(text: &str, patterns: &[Regex]) -> u32 {
    let distinct: HashSet<&str> = patterns
        .iter()
        .flat_map(|pattern| pattern.find_iter(text).map(|m| m.as_str()))
        .collect();
    distinct.len() as u32
}

/// Distinct items (case-insensitive) containing any of `tokens`.
pub fn count_items_containing<'a>(
    items: impl IntoIterator<Item = &'a str>,
    tokens: &[String],
) -> u32 {
    let tokens: Vec<String> = tokens
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return 0;
    }

    let distinct: HashSet<String> = items
        .into_iter()
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .filter(|item| tokens.iter().any(|token| item.contains(token.as_str())))
        .collect();
    distinct.len() as u32
}

/// T: distinct labels/components mentioning a technology token.
pub fn count_technology(labels: &[String], components: &[String], tokens: &[String]) -> u32 {
    count_items_containing(labels.iter().chain(components).map(String::as_str), tokens)
}

/// S: distinct labels/components/text tokens mentioning a systems token.
pub fn count_systems(
    labels: &[String],
    components: &[String],
    text: &str,
    tokens: &[String],
) -> u32 {
    let words: Vec<String> = text_tokens(text).collect();
    count_items_containing(
        labels
            .iter()
            .chain(components)
            .map(String::as_str)
            .chain(words.iter().map(String::as_str)),
        tokens,
    )
}

/// A: every acceptance-criteria marker (given/when/then, checklist boxes,
/// the word "acceptance"). Repeats count.
pub fn count_acceptance(text: &str) -> u32 {
    ACCEPTANCE_PATTERN.find_iter(text).count() as u32
}

/// U: distinct actor roles mentioned, singular and plural folded together.
pub fn count_user_journeys(text: &str) -> u32 {
    let roles: HashSet<String> = ROLE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect();
    roles.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bespoke_counts_distinct_matches() {
        let patterns = vec![
            Regex::new(r"\blegacy\b").unwrap(),
            Regex::new(r"\bcustom\b").unwrap(),
        ];
        let text = "custom export for the legacy ledger, legacy format, custom header";
        assert_eq!(count_bespoke(text, &patterns), 2);
        assert_eq!(count_bespoke(text, &[]), 0);
    }

    #[test]
    fn technology_counts_distinct_items() {
        let labels = strings(&["React", "react", "payments"]);
        let components = strings(&["graphql-gateway"]);
        let tokens = strings(&["react", "graphql"]);
        assert_eq!(count_technology(&labels, &components, &tokens), 2);
    }

    #[test]
    fn systems_include_text_tokens() {
        let labels = strings(&["billing"]);
        let text = "sync the billing api with the search cache";
        let tokens = strings(&["billing", "api", "search", "cache"]);
        // "billing" appears as label and word but counts once
        assert_eq!(count_systems(&labels, &[], text, &tokens), 4);
    }

    #[test]
    fn blank_tokens_match_nothing() {
        let labels = strings(&["anything"]);
        assert_eq!(count_technology(&labels, &[], &strings(&["", "  "])), 0);
    }

    #[test]
    fn acceptance_counts_every_marker() {
        let text = "acceptance criteria:\n- [ ] given a cart\n- [x] when paid then receipt";
        assert_eq!(count_acceptance(text), 6);
        assert_eq!(count_acceptance("no markers here"), 0);
    }

    #[test]
    fn acceptance_ignores_embedded_words() {
        assert_eq!(count_acceptance("whenever thenceforth"), 0);
    }

    #[test]
    fn user_journeys_fold_plurals() {
        assert_eq!(count_user_journeys("admins invite users; a user and an admin"), 2);
        assert_eq!(count_user_journeys("operator, customer, developer"), 3);
        assert_eq!(count_user_journeys("username field"), 0);
    }

    #[test]
    fn text_tokens_keep_hyphenated_words() {
        let tokens: Vec<String> = text_tokens("Add read-replica, then DB_sync!").collect();
        assert_eq!(tokens, vec!["add", "read-replica", "then", "db_sync"]);
    }
}
