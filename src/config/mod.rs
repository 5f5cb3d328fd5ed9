//! Rule configuration for the derivation engine
//!
//! Three independent rule documents (complexity, discipline, phase) plus the
//! optional status vocabulary. They are plain immutable values: loaded and
//! validated once, then passed by reference into every derivation.

mod complexity;
mod discipline;
pub mod loader;
mod phase;
mod status;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use complexity::{
    default_bespoke_patterns, default_systems_tokens, default_technology_tokens, ClampRange,
    ComplexityConfig, FactorWeights, OversizeConfig, SizeThresholds, TokenAllowlists,
};
pub use discipline::{
    default_discipline_rules, DisciplinePatterns, DisciplineRule, DisciplineRulesConfig,
    PatternKind,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path, parse_config,
    ConfigFormat, CONFIG_FILE_NAME,
};
pub use phase::{PhaseLabelRule, PhaseRulesConfig, PhaseSignal};
pub use status::StatusVocabulary;
pub use validation::{validate_config, validate_config_result};

/// All rule documents the engine needs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub complexity: ComplexityConfig,
    pub discipline: DisciplineRulesConfig,
    pub phase: PhaseRulesConfig,
    #[serde(default)]
    pub status: StatusVocabulary,
}

/// Rule file as written on disk, before required sections are checked
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawEngineConfig {
    pub complexity: Option<ComplexityConfig>,
    pub discipline: Option<DisciplineRulesConfig>,
    pub phase: Option<PhaseRulesConfig>,
    pub status: Option<StatusVocabulary>,
}

impl RawEngineConfig {
    /// Require every rule section; only the status vocabulary is optional.
    pub(crate) fn into_engine_config(self) -> crate::errors::Result<EngineConfig> {
        let missing: Vec<&str> = [
            ("complexity", self.complexity.is_none()),
            ("discipline", self.discipline.is_none()),
            ("phase", self.phase.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();

        match (self.complexity, self.discipline, self.phase) {
            (Some(complexity), Some(discipline), Some(phase)) => Ok(EngineConfig {
                complexity,
                discipline,
                phase,
                status: self.status.unwrap_or_default(),
            }),
            _ => Err(crate::errors::Error::Configuration(format!(
                "missing required section(s): {}",
                missing.join(", ")
            ))),
        }
    }
}
