//! Lifecycle phase rules

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::Phase;

/// Signal a phase can be derived from, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseSignal {
    Labels,
    Discipline,
}

/// Phase rule document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRulesConfig {
    /// Discipline name (case-insensitive) to phase
    #[serde(default = "default_discipline_mapping")]
    pub discipline_mapping: BTreeMap<String, Phase>,

    /// Label rules, first match wins
    #[serde(default = "default_label_overrides")]
    pub label_overrides: Vec<PhaseLabelRule>,

    #[serde(default = "default_signal_priority")]
    pub priority: Vec<PhaseSignal>,

    #[serde(default = "default_phase")]
    pub default: Phase,
}

impl Default for PhaseRulesConfig {
    fn default() -> Self {
        Self {
            discipline_mapping: default_discipline_mapping(),
            label_overrides: default_label_overrides(),
            priority: default_signal_priority(),
            default: default_phase(),
        }
    }
}

impl PhaseRulesConfig {
    /// Look up a discipline in the mapping, ignoring case
    pub fn phase_for_discipline(&self, discipline: &str) -> Option<Phase> {
        let wanted = discipline.trim();
        self.discipline_mapping
            .get(wanted)
            .or_else(|| {
                self.discipline_mapping
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
                    .map(|(_, phase)| phase)
            })
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseLabelRule {
    pub phase: Phase,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl PhaseLabelRule {
    pub fn new(phase: Phase, patterns: &[&str]) -> Self {
        Self {
            phase,
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn default_signal_priority() -> Vec<PhaseSignal> {
    vec![PhaseSignal::Labels, PhaseSignal::Discipline]
}

pub fn default_phase() -> Phase {
    Phase::Unknown
}

pub fn default_discipline_mapping() -> BTreeMap<String, Phase> {
    [
        ("backend", Phase::Development),
        ("frontend", Phase::Development),
        ("mobile", Phase::Development),
        ("data", Phase::Development),
        ("qa", Phase::Testing),
        ("devops", Phase::Deployment),
        ("design", Phase::Design),
        ("product", Phase::Definition),
        ("research", Phase::Discovery),
        ("analytics", Phase::Measure),
    ]
    .into_iter()
    .map(|(name, phase)| (name.to_string(), phase))
    .collect()
}

pub fn default_label_overrides() -> Vec<PhaseLabelRule> {
    vec![
        PhaseLabelRule::new(Phase::Discovery, &["discovery", "research", "spike"]),
        PhaseLabelRule::new(Phase::Definition, &["definition", "requirements", "prd"]),
        PhaseLabelRule::new(Phase::Design, &["design", "mockup", "wireframe"]),
        PhaseLabelRule::new(Phase::Testing, &["testing", "qa", "regression"]),
        PhaseLabelRule::new(Phase::Deployment, &["deploy", "release", "rollout"]),
        PhaseLabelRule::new(Phase::Measure, &["measure", "metrics", "experiment"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_lookup_ignores_case() {
        let config = PhaseRulesConfig::default();
        assert_eq!(config.phase_for_discipline("QA"), Some(Phase::Testing));
        assert_eq!(config.phase_for_discipline("backend"), Some(Phase::Development));
        assert_eq!(config.phase_for_discipline("legal"), None);
    }

    #[test]
    fn document_uses_camel_case_keys() {
        let config: PhaseRulesConfig = serde_json::from_str(
            r#"{
                "disciplineMapping": {"backend": "development"},
                "labelOverrides": [{"phase": "testing", "patterns": ["qa"]}],
                "priority": ["discipline", "labels"],
                "default": "development"
            }"#,
        )
        .unwrap();
        assert_eq!(config.priority, vec![PhaseSignal::Discipline, PhaseSignal::Labels]);
        assert_eq!(config.label_overrides[0].phase, Phase::Testing);
        assert_eq!(config.default, Phase::Development);
    }
}
