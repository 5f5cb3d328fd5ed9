//! Discipline classification rules
//!
//! Rules are tried in list order within each pattern kind, and pattern kinds
//! are tried in `priority` order. Both orders are significant.

use serde::{Deserialize, Serialize};

/// Which ticket attribute a discipline pattern is tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    Labels,
    Components,
    #[serde(alias = "repo_paths")]
    RepoPaths,
}

/// Discipline rule document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineRulesConfig {
    #[serde(default = "default_discipline_rules")]
    pub rules: Vec<DisciplineRule>,

    #[serde(default = "default_pattern_priority")]
    pub priority: Vec<PatternKind>,

    /// Discipline returned when neither rules nor heuristics match
    #[serde(default = "default_discipline")]
    pub default: String,
}

impl Default for DisciplineRulesConfig {
    fn default() -> Self {
        Self {
            rules: default_discipline_rules(),
            priority: default_pattern_priority(),
            default: default_discipline(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineRule {
    pub discipline: String,
    #[serde(default)]
    pub patterns: DisciplinePatterns,
}

impl DisciplineRule {
    pub fn new(
        discipline: &str,
        labels: &[&str],
        components: &[&str],
        repo_paths: &[&str],
    ) -> Self {
        Self {
            discipline: discipline.to_string(),
            patterns: DisciplinePatterns {
                labels: labels.iter().map(|s| s.to_string()).collect(),
                components: components.iter().map(|s| s.to_string()).collect(),
                repo_paths: repo_paths.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplinePatterns {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default, alias = "repo_paths")]
    pub repo_paths: Vec<String>,
}

impl DisciplinePatterns {
    /// Patterns for one pattern kind
    pub fn for_kind(&self, kind: PatternKind) -> &[String] {
        match kind {
            PatternKind::Labels => &self.labels,
            PatternKind::Components => &self.components,
            PatternKind::RepoPaths => &self.repo_paths,
        }
    }
}

pub fn default_pattern_priority() -> Vec<PatternKind> {
    vec![
        PatternKind::Labels,
        PatternKind::Components,
        PatternKind::RepoPaths,
    ]
}

pub fn default_discipline() -> String {
    crate::core::UNKNOWN.to_string()
}

pub fn default_discipline_rules() -> Vec<DisciplineRule> {
    vec![
        DisciplineRule::new(
            "mobile",
            &["mobile", "ios", "android"],
            &["mobile", "app"],
            &["mobile", "ios", "android"],
        ),
        DisciplineRule::new(
            "frontend",
            &["frontend", "ui", "ux", "web"],
            &["web", "frontend", "dashboard"],
            &["web", "frontend", "ui"],
        ),
        DisciplineRule::new(
            "backend",
            &["backend", "api", "server"],
            &["api", "backend", "service"],
            &["api", "server", "services"],
        ),
        DisciplineRule::new(
            "qa",
            &["qa", "test", "automation"],
            &["qa", "testing"],
            &["e2e", "qa"],
        ),
        DisciplineRule::new(
            "devops",
            &["devops", "infra", "ci", "deploy"],
            &["infrastructure", "platform"],
            &["infra", "terraform", ".github"],
        ),
        DisciplineRule::new(
            "data",
            &["data", "analytics", "etl"],
            &["data", "warehouse"],
            &["etl", "pipelines", "dbt"],
        ),
    ]
}
