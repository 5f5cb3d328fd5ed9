use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::ComplexityFactors;
use super::taxonomy::{Phase, SizeBucket, StatusCategory};

/// A unit of tracked work as exported by the ticket store.
///
/// Only `key` is required on the wire; every other field defaults so that
/// sparse exports still deserialize. Derived fields are whatever the
/// surrounding application last persisted and may be stale; the engine
/// recomputes them rather than trusting them (see [`crate::Engine::enrich`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub components: Vec<String>,
    pub priority: Option<String>,
    pub status: String,
    pub status_category: StatusCategory,
    pub story_points: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Repository path linked through commits or PRs, when known
    pub repo_path: Option<String>,

    // Derived fields
    pub complexity_score: Option<f64>,
    pub complexity_size: Option<SizeBucket>,
    pub complexity_factors: Option<ComplexityFactors>,
    pub discipline: Option<String>,
    pub ai_assisted: Option<bool>,
    pub oversize: Option<bool>,
    pub lead_time_ms: Option<i64>,
    pub cycle_time_ms: Option<i64>,

    /// Manual corrections
    pub overrides: TicketOverride,
}

/// Manual corrections attached to a ticket.
///
/// A set field beats the corresponding derived value on every read path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketOverride {
    pub phase: Option<Phase>,
    pub discipline: Option<String>,
    pub complexity: Option<SizeBucket>,
    pub excluded_from_metrics: bool,
    pub custom_labels: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create a ticket with just a key, for builders and tests
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Summary and description joined and lowercased.
    pub fn text_lowercase(&self) -> String {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => {
                format!("{} {}", self.summary, description).to_lowercase()
            }
            _ => self.summary.to_lowercase(),
        }
    }

    /// Whether the ticket must be left out of every aggregate
    pub fn is_excluded(&self) -> bool {
        self.overrides.excluded_from_metrics
    }
}
