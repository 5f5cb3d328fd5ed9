//! Discipline classification
//!
//! Precedence is explicit: pattern kinds in `priority` order, rules in list
//! order within a kind, then the keyword fallback, then the configured
//! default. The first hit wins.

use super::heuristics::sniff_discipline;
use crate::config::{DisciplineRulesConfig, PatternKind};

/// Attributes a discipline can be read from
#[derive(Debug, Clone, Copy)]
pub struct DisciplineInput<'a> {
    pub labels: &'a [String],
    pub components: &'a [String],
    pub repo_path: Option<&'a str>,
}

impl<'a> DisciplineInput<'a> {
    /// Candidate tokens for one pattern kind
    fn tokens(&self, kind: PatternKind) -> Vec<&'a str> {
        match kind {
            PatternKind::Labels => self.labels.iter().map(String::as_str).collect(),
            PatternKind::Components => self.components.iter().map(String::as_str).collect(),
            PatternKind::RepoPaths => self.repo_path.into_iter().collect(),
        }
    }
}

/// Classify a ticket's discipline from its labels, components, and repo path.
pub fn classify_discipline(
    labels: &[String],
    components: &[String],
    repo_path: Option<&str>,
    config: &DisciplineRulesConfig,
) -> String {
    let input = DisciplineInput {
        labels,
        components,
        repo_path,
    };

    if let Some(discipline) = match_rules(&input, config) {
        return discipline.to_string();
    }

    if let Some(discipline) = sniff_discipline(labels, components, repo_path) {
        tracing::trace!(discipline, "discipline from keyword fallback");
        return discipline.to_string();
    }

    config.default.clone()
}

/// First configured rule matching the input, honoring `priority`
pub fn match_rules<'c>(
    input: &DisciplineInput<'_>,
    config: &'c DisciplineRulesConfig,
) -> Option<&'c str> {
    config.priority.iter().find_map(|kind| {
        let tokens: Vec<String> = input
            .tokens(*kind)
            .into_iter()
            .map(str::to_lowercase)
            .collect();
        if tokens.is_empty() {
            return None;
        }

        config
            .rules
            .iter()
            .find(|rule| any_contains(&tokens, rule.patterns.for_kind(*kind)))
            .map(|rule| rule.discipline.as_str())
    })
}

// Case-insensitive: does any token contain any pattern?
fn any_contains(tokens: &[String], patterns: &[String]) -> bool {
    patterns
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .any(|pattern| tokens.iter().any(|token| token.contains(&pattern)))
}
