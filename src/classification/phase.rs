//! Lifecycle phase derivation
//!
//! A manual phase override short-circuits everything. Otherwise each signal
//! in `priority` is asked in turn through a dispatch table, and the first
//! phase produced wins; `default` covers the rest.

use crate::config::{PhaseRulesConfig, PhaseSignal};
use crate::core::{Phase, Ticket};

/// Raw parts a phase is derived from, for callers without a full ticket
#[derive(Debug, Clone, Copy)]
pub struct PhaseInput<'a> {
    pub labels: &'a [String],
    /// Effective discipline (override already applied by the caller)
    pub discipline: Option<&'a str>,
    pub phase_override: Option<Phase>,
}

type PhaseStage = fn(&PhaseInput<'_>, &PhaseRulesConfig) -> Option<Phase>;

fn stage_for(signal: PhaseSignal) -> PhaseStage {
    match signal {
        PhaseSignal::Labels => phase_from_labels,
        PhaseSignal::Discipline => phase_from_discipline,
    }
}

/// Phase for a ticket, honoring its phase and discipline overrides.
pub fn derive_phase(ticket: &Ticket, config: &PhaseRulesConfig) -> Phase {
    let discipline = ticket
        .overrides
        .discipline
        .as_deref()
        .or(ticket.discipline.as_deref());
    derive_phase_from_parts(&ticket.labels, discipline, ticket.overrides.phase, config)
}

/// Same precedence as [`derive_phase`], from raw parts.
pub fn derive_phase_from_parts(
    labels: &[String],
    discipline: Option<&str>,
    phase_override: Option<Phase>,
    config: &PhaseRulesConfig,
) -> Phase {
    let input = PhaseInput {
        labels,
        discipline,
        phase_override,
    };
    resolve_phase(&input, config)
}

pub fn resolve_phase(input: &PhaseInput<'_>, config: &PhaseRulesConfig) -> Phase {
    if let Some(phase) = input.phase_override {
        return phase;
    }

    config
        .priority
        .iter()
        .find_map(|signal| stage_for(*signal)(input, config))
        .unwrap_or(config.default)
}

fn phase_from_labels(input: &PhaseInput<'_>, config: &PhaseRulesConfig) -> Option<Phase> {
    let labels: Vec<String> = input.labels.iter().map(|l| l.to_lowercase()).collect();
    if labels.is_empty() {
        return None;
    }

    config
        .label_overrides
        .iter()
        .find(|rule| {
            rule.patterns
                .iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .any(|pattern| labels.iter().any(|label| label.contains(&pattern)))
        })
        .map(|rule| rule.phase)
}

fn phase_from_discipline(input: &PhaseInput<'_>, config: &PhaseRulesConfig) -> Option<Phase> {
    input
        .discipline
        .and_then(|discipline| config.phase_for_discipline(discipline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseLabelRule;
    use std::collections::BTreeMap;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn config(priority: Vec<PhaseSignal>) -> PhaseRulesConfig {
        let mut mapping = BTreeMap::new();
        mapping.insert("backend".to_string(), Phase::Development);
        mapping.insert("qa".to_string(), Phase::Testing);
        PhaseRulesConfig {
            discipline_mapping: mapping,
            label_overrides: vec![
                PhaseLabelRule::new(Phase::Design, &["design"]),
                PhaseLabelRule::new(Phase::Deployment, &["release"]),
            ],
            priority,
            default: Phase::Unknown,
        }
    }

    #[test]
    fn override_beats_matching_labels() {
        let config = config(vec![PhaseSignal::Labels, PhaseSignal::Discipline]);
        let labels = strings(&["design-review"]);
        let phase =
            derive_phase_from_parts(&labels, Some("backend"), Some(Phase::Measure), &config);
        assert_eq!(phase, Phase::Measure);
    }

    #[test]
    fn labels_before_discipline_by_default() {
        let config = config(vec![PhaseSignal::Labels, PhaseSignal::Discipline]);
        let labels = strings(&["Release-Train"]);
        assert_eq!(
            derive_phase_from_parts(&labels, Some("backend"), None, &config),
            Phase::Deployment
        );
    }

    #[test]
    fn discipline_first_when_configured() {
        let config = config(vec![PhaseSignal::Discipline, PhaseSignal::Labels]);
        let labels = strings(&["release"]);
        assert_eq!(
            derive_phase_from_parts(&labels, Some("QA"), None, &config),
            Phase::Testing
        );
    }

    #[test]
    fn first_label_rule_wins() {
        let config = config(vec![PhaseSignal::Labels]);
        let labels = strings(&["release", "design"]);
        assert_eq!(
            derive_phase_from_parts(&labels, None, None, &config),
            Phase::Design
        );
    }

    #[test]
    fn unmatched_ticket_gets_default() {
        let config = config(vec![PhaseSignal::Labels, PhaseSignal::Discipline]);
        assert_eq!(
            derive_phase_from_parts(&strings(&["misc"]), Some("legal"), None, &config),
            Phase::Unknown
        );
        assert_eq!(derive_phase_from_parts(&[], None, None, &config), Phase::Unknown);
    }

    #[test]
    fn ticket_variant_uses_effective_discipline() {
        let config = config(vec![PhaseSignal::Discipline]);
        let mut ticket = Ticket::new("OPS-1");
        ticket.discipline = Some("backend".into());
        assert_eq!(derive_phase(&ticket, &config), Phase::Development);

        ticket.overrides.discipline = Some("qa".into());
        assert_eq!(derive_phase(&ticket, &config), Phase::Testing);

        ticket.overrides.phase = Some(Phase::Discovery);
        assert_eq!(derive_phase(&ticket, &config), Phase::Discovery);
    }
}
