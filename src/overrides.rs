//! Read-time override layer
//!
//! Manual corrections never feed back into scoring or classification. They
//! are applied here, on the way out, so every consumer sees the same
//! effective values.

use crate::classification::derive_phase;
use crate::config::{EngineConfig, PhaseRulesConfig};
use crate::core::{DerivedMetrics, Phase, SizeBucket, Ticket, UNKNOWN};

/// Discipline override, else the stored discipline, else `"unknown"`.
pub fn effective_discipline(ticket: &Ticket) -> String {
    ticket
        .overrides
        .discipline
        .as_deref()
        .or(ticket.discipline.as_deref())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Complexity override, else the stored size bucket.
pub fn effective_size(ticket: &Ticket) -> Option<SizeBucket> {
    ticket.overrides.complexity.or(ticket.complexity_size)
}

/// Size bucket name for grouping, `"unknown"` when nothing is known.
pub fn effective_size_label(ticket: &Ticket) -> String {
    effective_size(ticket)
        .map(|size| size.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Oversize as read: the effective size against `threshold`, else the
/// stored flag when no size is known.
pub fn effective_oversize(ticket: &Ticket, threshold: SizeBucket) -> bool {
    match effective_size(ticket) {
        Some(size) => size == threshold,
        None => ticket.oversize.unwrap_or(false),
    }
}

pub fn effective_phase(ticket: &Ticket, config: &PhaseRulesConfig) -> Phase {
    derive_phase(ticket, config)
}

/// Labels plus custom labels, first occurrence kept. Display only; the
/// classifiers never see custom labels.
pub fn effective_labels(ticket: &Ticket) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(ticket.labels.len());
    for label in ticket.labels.iter().chain(&ticket.overrides.custom_labels) {
        if !labels.iter().any(|seen| seen.eq_ignore_ascii_case(label)) {
            labels.push(label.clone());
        }
    }
    labels
}

/// Replace derived values with the ticket's overrides.
///
/// A complexity override keeps the computed score but takes the overriding
/// bucket, and the oversize flag is re-evaluated against it.
pub fn apply_overrides(
    derived: DerivedMetrics,
    ticket: &Ticket,
    config: &EngineConfig,
) -> DerivedMetrics {
    let overrides = &ticket.overrides;

    let complexity = match overrides.complexity {
        Some(size) => {
            let mut complexity = derived.complexity;
            complexity.size = size;
            complexity.oversize = size == config.complexity.oversize.threshold;
            complexity
        }
        None => derived.complexity,
    };

    let mut timing = derived.timing;
    timing.oversize = complexity.oversize;

    DerivedMetrics {
        discipline: overrides
            .discipline
            .clone()
            .unwrap_or(derived.discipline),
        phase: overrides.phase.unwrap_or(derived.phase),
        complexity,
        timing,
        ..derived
    }
}
