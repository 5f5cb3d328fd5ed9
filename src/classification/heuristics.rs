//! Keyword fallback for tickets no discipline rule matched.
//!
//! Words are split on every non-alphanumeric character and compared whole, so
//! short keywords like `ui` do not fire inside `build` or `guide`.

use std::collections::HashSet;

/// Fallback disciplines in the order they are tried. Mobile comes first so
/// that `react native` tickets are not claimed by the frontend `react` hint.
const FALLBACK_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "mobile",
        &["mobile", "ios", "android", "iphone", "ipad", "swiftui", "native"],
    ),
    (
        "frontend",
        &[
            "frontend", "ui", "ux", "web", "react", "css", "html", "vue", "angular", "browser",
        ],
    ),
    (
        "backend",
        &[
            "backend",
            "api",
            "server",
            "service",
            "services",
            "database",
            "db",
            "microservice",
        ],
    ),
];

fn words<'a>(values: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    values
        .into_iter()
        .flat_map(|value| value.split(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Sniff labels, components, and repository path segments for a discipline
pub fn sniff_discipline(
    labels: &[String],
    components: &[String],
    repo_path: Option<&str>,
) -> Option<&'static str> {
    let words = words(
        labels
            .iter()
            .chain(components)
            .map(String::as_str)
            .chain(repo_path),
    );

    FALLBACK_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| words.contains(*k)))
        .map(|(discipline, _)| *discipline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sniffs_repo_path_segments() {
        assert_eq!(
            sniff_discipline(&[], &[], Some("acme/checkout-web")),
            Some("frontend")
        );
        assert_eq!(
            sniff_discipline(&[], &[], Some("services/ledger")),
            Some("backend")
        );
    }

    #[test]
    fn mobile_wins_over_frontend() {
        let labels = strings(&["react-native", "checkout"]);
        assert_eq!(sniff_discipline(&labels, &[], None), Some("mobile"));
    }

    #[test]
    fn short_keywords_need_whole_words() {
        let labels = strings(&["build", "guide"]);
        assert_eq!(sniff_discipline(&labels, &[], None), None);
    }

    #[test]
    fn nothing_to_sniff() {
        assert_eq!(sniff_discipline(&[], &[], None), None);
    }
}
