use regex::{Regex, RegexBuilder};

use super::factors::{
    count_acceptance, count_bespoke, count_systems, count_technology, count_user_journeys,
};
use crate::config::{ClampRange, ComplexityConfig, FactorWeights, SizeThresholds};
use crate::core::{ComplexityFactors, ComplexityResult, SizeBucket, Ticket};
use crate::errors::{Error, Result};

/// Complexity scorer with its bespoke patterns compiled once.
///
/// Construction is the only fallible step; scoring never fails, and a ticket
/// with no text, labels, or components simply scores zero.
#[derive(Debug, Clone)]
pub struct ComplexityScorer {
    config: ComplexityConfig,
    bespoke: Vec<Regex>,
}

impl ComplexityScorer {
    pub fn new(config: &ComplexityConfig) -> Result<Self> {
        let bespoke = config
            .bespoke_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| Error::pattern(pattern.as_str(), e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config: config.clone(),
            bespoke,
        })
    }

    pub fn config(&self) -> &ComplexityConfig {
        &self.config
    }

    /// Unclamped factor counts for a ticket
    pub fn raw_factors(&self, ticket: &Ticket) -> ComplexityFactors {
        let text = ticket.text_lowercase();
        let tokens = &self.config.tokens;
        ComplexityFactors {
            bespoke: count_bespoke(&text, &self.bespoke),
            technology: count_technology(&ticket.labels, &ticket.components, &tokens.technology),
            systems: count_systems(&ticket.labels, &ticket.components, &text, &tokens.systems),
            acceptance: count_acceptance(&text),
            user_journeys: count_user_journeys(&text),
        }
    }

    /// Score a ticket: clamp factors, weight them, bucket the sum
    pub fn score(&self, ticket: &Ticket) -> ComplexityResult {
        let factors = clamp_factors(self.raw_factors(ticket), &self.config.clamping);
        let score = weighted_score(&factors, &self.config.weights);
        let size = size_for_score(score, &self.config.thresholds);
        ComplexityResult {
            score,
            size,
            oversize: size == self.config.oversize.threshold,
            factors,
        }
    }
}

// Pure function: clamp every factor into the configured range
pub fn clamp_factors(factors: ComplexityFactors, range: &ClampRange) -> ComplexityFactors {
    factors.map(|value| range.apply(value))
}

// Pure function: Σ factor · weight
pub fn weighted_score(factors: &ComplexityFactors, weights: &FactorWeights) -> f64 {
    factors
        .as_array()
        .iter()
        .zip(weights.as_array())
        .map(|(factor, weight)| *factor as f64 * weight)
        .sum()
}

/// Largest bucket whose threshold the score meets, testing XL first.
/// Anything below every threshold is XS.
pub fn size_for_score(score: f64, thresholds: &SizeThresholds) -> SizeBucket {
    SizeBucket::DESCENDING
        .iter()
        .copied()
        .find(|bucket| score >= thresholds.for_bucket(*bucket))
        .unwrap_or(SizeBucket::XS)
}
