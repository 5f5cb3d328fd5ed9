//! Complexity scoring configuration
//!
//! Five factor weights, the score thresholds for each size bucket, the clamp
//! applied to raw factor counts, and the token/pattern lists the factors are
//! counted from.

use serde::{Deserialize, Serialize};

use crate::core::SizeBucket;

/// Complexity rule document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityConfig {
    #[serde(default)]
    pub weights: FactorWeights,

    #[serde(default)]
    pub thresholds: SizeThresholds,

    #[serde(default)]
    pub oversize: OversizeConfig,

    #[serde(default)]
    pub clamping: ClampRange,

    #[serde(default)]
    pub tokens: TokenAllowlists,

    /// Regular expressions that mark bespoke, one-off work
    #[serde(default = "default_bespoke_patterns")]
    pub bespoke_patterns: Vec<String>,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            thresholds: SizeThresholds::default(),
            oversize: OversizeConfig::default(),
            clamping: ClampRange::default(),
            tokens: TokenAllowlists::default(),
            bespoke_patterns: default_bespoke_patterns(),
        }
    }
}

/// Weight per factor, keyed by factor letter in rule documents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    #[serde(rename = "B", alias = "bespoke", default = "default_bespoke_weight")]
    pub bespoke: f64,

    #[serde(rename = "T", alias = "technology", default = "default_technology_weight")]
    pub technology: f64,

    #[serde(rename = "S", alias = "systems", default = "default_systems_weight")]
    pub systems: f64,

    #[serde(rename = "A", alias = "acceptance", default = "default_acceptance_weight")]
    pub acceptance: f64,

    #[serde(rename = "U", alias = "userJourneys", default = "default_user_journey_weight")]
    pub user_journeys: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            bespoke: default_bespoke_weight(),
            technology: default_technology_weight(),
            systems: default_systems_weight(),
            acceptance: default_acceptance_weight(),
            user_journeys: default_user_journey_weight(),
        }
    }
}

impl FactorWeights {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.bespoke,
            self.technology,
            self.systems,
            self.acceptance,
            self.user_journeys,
        ]
    }
}

/// Minimum score for each size bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeThresholds {
    #[serde(rename = "XS", default = "default_xs_threshold")]
    pub xs: f64,
    #[serde(rename = "S", default = "default_s_threshold")]
    pub s: f64,
    #[serde(rename = "M", default = "default_m_threshold")]
    pub m: f64,
    #[serde(rename = "L", default = "default_l_threshold")]
    pub l: f64,
    #[serde(rename = "XL", default = "default_xl_threshold")]
    pub xl: f64,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            xs: default_xs_threshold(),
            s: default_s_threshold(),
            m: default_m_threshold(),
            l: default_l_threshold(),
            xl: default_xl_threshold(),
        }
    }
}

impl SizeThresholds {
    /// Threshold for a specific bucket
    pub fn for_bucket(&self, bucket: SizeBucket) -> f64 {
        match bucket {
            SizeBucket::XS => self.xs,
            SizeBucket::S => self.s,
            SizeBucket::M => self.m,
            SizeBucket::L => self.l,
            SizeBucket::XL => self.xl,
        }
    }

    /// Thresholds in ascending bucket order (XS first)
    pub fn ascending(&self) -> [(SizeBucket, f64); 5] {
        [
            (SizeBucket::XS, self.xs),
            (SizeBucket::S, self.s),
            (SizeBucket::M, self.m),
            (SizeBucket::L, self.l),
            (SizeBucket::XL, self.xl),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OversizeConfig {
    /// Size bucket that flags a ticket as oversize
    #[serde(default = "default_oversize_threshold")]
    pub threshold: SizeBucket,
}

impl Default for OversizeConfig {
    fn default() -> Self {
        Self {
            threshold: default_oversize_threshold(),
        }
    }
}

/// Inclusive range every raw factor count is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampRange {
    #[serde(default = "default_clamp_min")]
    pub min: u32,
    #[serde(default = "default_clamp_max")]
    pub max: u32,
}

impl Default for ClampRange {
    fn default() -> Self {
        Self {
            min: default_clamp_min(),
            max: default_clamp_max(),
        }
    }
}

impl ClampRange {
    /// Clamp a value into the range. An inverted range collapses to `min`.
    pub fn apply(&self, value: u32) -> u32 {
        value.max(self.min).min(self.max.max(self.min))
    }
}

/// Token allowlists for the technology and systems factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAllowlists {
    #[serde(default = "default_technology_tokens")]
    pub technology: Vec<String>,
    #[serde(default = "default_systems_tokens")]
    pub systems: Vec<String>,
}

impl Default for TokenAllowlists {
    fn default() -> Self {
        Self {
            technology: default_technology_tokens(),
            systems: default_systems_tokens(),
        }
    }
}

pub fn default_bespoke_weight() -> f64 {
    3.0
}
pub fn default_technology_weight() -> f64 {
    2.0
}
pub fn default_systems_weight() -> f64 {
    2.0
}
pub fn default_acceptance_weight() -> f64 {
    1.0
}
pub fn default_user_journey_weight() -> f64 {
    1.5
}

pub fn default_xs_threshold() -> f64 {
    0.0
}
pub fn default_s_threshold() -> f64 {
    4.0
}
pub fn default_m_threshold() -> f64 {
    8.0
}
pub fn default_l_threshold() -> f64 {
    14.0
}
pub fn default_xl_threshold() -> f64 {
    20.0
}

pub fn default_oversize_threshold() -> SizeBucket {
    SizeBucket::XL
}

pub fn default_clamp_min() -> u32 {
    0
}
pub fn default_clamp_max() -> u32 {
    5
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_technology_tokens() -> Vec<String> {
    to_strings(&[
        "react",
        "graphql",
        "kafka",
        "kubernetes",
        "terraform",
        "postgres",
        "redis",
        "elasticsearch",
        "grpc",
        "websocket",
        "oauth",
        "swift",
        "kotlin",
    ])
}

pub fn default_systems_tokens() -> Vec<String> {
    to_strings(&[
        "api",
        "database",
        "queue",
        "cache",
        "auth",
        "payment",
        "billing",
        "notification",
        "search",
        "gateway",
        "storage",
    ])
}

pub fn default_bespoke_patterns() -> Vec<String> {
    to_strings(&[
        r"\bcustom\b",
        r"\bbespoke\b",
        r"\blegacy\b",
        r"\bmigrat\w*",
        r"\bworkaround\b",
        r"\bone[- ]off\b",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_strictly_increasing() {
        let values: Vec<f64> = SizeThresholds::default()
            .ascending()
            .iter()
            .map(|(_, v)| *v)
            .collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn weights_accept_letter_and_word_keys() {
        let letters: FactorWeights = serde_json::from_str(r#"{"B": 5, "U": 0.5}"#).unwrap();
        assert_eq!(letters.bespoke, 5.0);
        assert_eq!(letters.user_journeys, 0.5);
        assert_eq!(letters.technology, default_technology_weight());

        let words: FactorWeights = serde_json::from_str(r#"{"systems": 4}"#).unwrap();
        assert_eq!(words.systems, 4.0);
    }

    #[test]
    fn clamp_range_bounds_values() {
        let range = ClampRange { min: 1, max: 3 };
        assert_eq!(range.apply(0), 1);
        assert_eq!(range.apply(2), 2);
        assert_eq!(range.apply(9), 3);
    }

    #[test]
    fn inverted_clamp_range_collapses_to_min() {
        let range = ClampRange { min: 4, max: 1 };
        assert_eq!(range.apply(0), 4);
        assert_eq!(range.apply(9), 4);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config: ComplexityConfig =
            serde_json::from_str(r#"{"oversize": {"threshold": "L"}, "bespokePatterns": []}"#)
                .unwrap();
        assert_eq!(config.oversize.threshold, SizeBucket::L);
        assert!(config.bespoke_patterns.is_empty());
        assert_eq!(config.clamping, ClampRange::default());
    }
}
