//! Validation with error accumulation for rule documents.
//!
//! Every check runs and every problem is reported, so a user fixing a rule
//! file sees all of its issues in one pass. Problems are prefixed with the
//! field path they concern (e.g. `complexity.thresholds`).

use std::collections::HashSet;
use std::hash::Hash;

use super::{
    ComplexityConfig, DisciplineRulesConfig, EngineConfig, PhaseRulesConfig, StatusVocabulary,
};
use crate::errors::{Error, Result};

/// Validate an entire config, accumulating ALL problems.
///
/// An empty vector means the config is valid.
pub fn validate_config(config: &EngineConfig) -> Vec<String> {
    let mut errors = Vec::new();
    errors.extend(validate_complexity(&config.complexity));
    errors.extend(validate_discipline(&config.discipline));
    errors.extend(validate_phase(&config.phase));
    errors.extend(validate_status(&config.status));
    errors
}

/// Validate config with a fail-fast Result API.
pub fn validate_config_result(config: &EngineConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

fn validate_complexity(config: &ComplexityConfig) -> Vec<String> {
    let mut errors = Vec::new();

    let weights = config.weights.as_array();
    for (letter, weight) in ["B", "T", "S", "A", "U"].iter().zip(weights) {
        if !weight.is_finite() || weight < 0.0 {
            errors.push(format!(
                "complexity.weights.{}: must be a non-negative number, got {}",
                letter, weight
            ));
        }
    }

    let thresholds = config.thresholds.ascending();
    if thresholds.iter().any(|(_, v)| !v.is_finite()) {
        errors.push("complexity.thresholds: every threshold must be finite".to_string());
    }
    for pair in thresholds.windows(2) {
        let ((lower, low), (upper, high)) = (pair[0], pair[1]);
        if low >= high {
            errors.push(format!(
                "complexity.thresholds: {} ({}) must be below {} ({})",
                lower, low, upper, high
            ));
        }
    }

    if config.clamping.min > config.clamping.max {
        errors.push(format!(
            "complexity.clamping: min {} exceeds max {}",
            config.clamping.min, config.clamping.max
        ));
    }

    errors.extend(blank_entries("complexity.tokens.technology", &config.tokens.technology));
    errors.extend(blank_entries("complexity.tokens.systems", &config.tokens.systems));

    for (i, pattern) in config.bespoke_patterns.iter().enumerate() {
        if let Err(e) = regex::Regex::new(pattern) {
            errors.push(format!(
                "complexity.bespokePatterns[{}]: invalid regex '{}' - {}",
                i, pattern, e
            ));
        }
    }

    errors
}

fn validate_discipline(config: &DisciplineRulesConfig) -> Vec<String> {
    let mut errors = Vec::new();

    errors.extend(priority_problems("discipline.priority", &config.priority));

    if config.default.trim().is_empty() {
        errors.push("discipline.default: must not be empty".to_string());
    }

    for (i, rule) in config.rules.iter().enumerate() {
        let path = format!("discipline.rules[{}]", i);
        if rule.discipline.trim().is_empty() {
            errors.push(format!("{}.discipline: must not be empty", path));
        }
        errors.extend(blank_entries(&format!("{}.patterns.labels", path), &rule.patterns.labels));
        errors.extend(blank_entries(
            &format!("{}.patterns.components", path),
            &rule.patterns.components,
        ));
        errors.extend(blank_entries(
            &format!("{}.patterns.repoPaths", path),
            &rule.patterns.repo_paths,
        ));
    }

    errors
}

fn validate_phase(config: &PhaseRulesConfig) -> Vec<String> {
    let mut errors = Vec::new();

    errors.extend(priority_problems("phase.priority", &config.priority));

    for (i, rule) in config.label_overrides.iter().enumerate() {
        errors.extend(blank_entries(
            &format!("phase.labelOverrides[{}].patterns", i),
            &rule.patterns,
        ));
    }

    if config.discipline_mapping.keys().any(|k| k.trim().is_empty()) {
        errors.push("phase.disciplineMapping: discipline names must not be empty".to_string());
    }

    errors
}

fn validate_status(vocab: &StatusVocabulary) -> Vec<String> {
    let mut errors = Vec::new();
    if vocab.active.is_empty() {
        errors.push("status.active: at least one keyword is required".to_string());
    }
    if vocab.done.is_empty() {
        errors.push("status.done: at least one keyword is required".to_string());
    }
    errors.extend(blank_entries("status.active", &vocab.active));
    errors.extend(blank_entries("status.done", &vocab.done));
    errors
}

// An empty pattern is a substring of every token, which would turn the rule
// into a catch-all.
fn blank_entries(path: &str, entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.trim().is_empty())
        .map(|(i, _)| format!("{}[{}]: must not be blank", path, i))
        .collect()
}

fn priority_problems<T: Eq + Hash + std::fmt::Debug>(path: &str, priority: &[T]) -> Vec<String> {
    let mut errors = Vec::new();
    if priority.is_empty() {
        errors.push(format!("{}: must not be empty", path));
    }
    let mut seen = HashSet::new();
    for kind in priority {
        if !seen.insert(kind) {
            errors.push(format!("{}: {:?} listed more than once", path, kind));
        }
    }
    errors
}
