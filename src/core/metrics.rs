//! Value types produced by the derivation stages.

use serde::{Deserialize, Serialize};

use super::taxonomy::{Phase, SizeBucket};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Convert a millisecond span to hours.
pub fn ms_to_hours(ms: i64) -> f64 {
    ms as f64 / MS_PER_HOUR
}

/// Clamped factor counts behind a complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplexityFactors {
    /// Bespoke pattern matches
    #[serde(rename = "B")]
    pub bespoke: u32,
    /// Technology tokens
    #[serde(rename = "T")]
    pub technology: u32,
    /// Systems touched
    #[serde(rename = "S")]
    pub systems: u32,
    /// Acceptance-criteria markers
    #[serde(rename = "A")]
    pub acceptance: u32,
    /// Distinct user journeys
    #[serde(rename = "U")]
    pub user_journeys: u32,
}

impl ComplexityFactors {
    /// Apply `f` to every factor.
    pub fn map(self, f: impl Fn(u32) -> u32) -> Self {
        Self {
            bespoke: f(self.bespoke),
            technology: f(self.technology),
            systems: f(self.systems),
            acceptance: f(self.acceptance),
            user_journeys: f(self.user_journeys),
        }
    }

    pub fn as_array(&self) -> [u32; 5] {
        [
            self.bespoke,
            self.technology,
            self.systems,
            self.acceptance,
            self.user_journeys,
        ]
    }
}

/// Output of the complexity scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityResult {
    pub score: f64,
    pub size: SizeBucket,
    pub oversize: bool,
    pub factors: ComplexityFactors,
}

/// Timing attributes reconstructed from a ticket's event stream.
///
/// `None` means the metric could not be derived and must be left out of
/// averages and medians; it is never equivalent to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingMetrics {
    pub lead_ms: Option<i64>,
    pub cycle_ms: Option<i64>,
    pub active_ms: i64,
    pub queue_ms: i64,
    pub reopens: u32,
    pub oversize: bool,
    /// First PR opened to its merge
    pub review_ms: Option<i64>,
}

impl TimingMetrics {
    pub fn lead_hours(&self) -> Option<f64> {
        self.lead_ms.map(ms_to_hours)
    }

    pub fn cycle_hours(&self) -> Option<f64> {
        self.cycle_ms.map(ms_to_hours)
    }

    pub fn review_hours(&self) -> Option<f64> {
        self.review_ms.map(ms_to_hours)
    }

    pub fn active_hours(&self) -> f64 {
        ms_to_hours(self.active_ms)
    }

    pub fn queue_hours(&self) -> f64 {
        ms_to_hours(self.queue_ms)
    }
}

/// Every derived attribute of one ticket, computed atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub key: String,
    pub complexity: ComplexityResult,
    pub discipline: String,
    pub phase: Phase,
    pub ai_assisted: bool,
    #[serde(flatten)]
    pub timing: TimingMetrics,
}
