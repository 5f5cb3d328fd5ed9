//! Per-ticket derivation and batch entry points
//!
//! [`Engine`] owns a validated [`EngineConfig`] and the compiled complexity
//! scorer. Every method is a pure function of its arguments; batches run on
//! the rayon pool and return results in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::aggregation::{
    complexity_breakdown_with, discipline_effort_with, phase_distribution, ComplexityBreakdown,
    DisciplineEffortMetric, PhaseDistribution,
};
use crate::classification::{classify_discipline, derive_phase_from_parts, is_ai_assisted};
use crate::complexity::ComplexityScorer;
use crate::config::{validate_config_result, EngineConfig};
use crate::core::{group_events_by_ticket, DerivedMetrics, Event, Ticket};
use crate::errors::Result;
use crate::overrides::{apply_overrides, effective_phase};
use crate::temporal::reconstruct_with;

/// Everything derived from one batch of tickets and events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Per-ticket values with overrides applied, in input order
    pub tickets: Vec<DerivedMetrics>,
    pub phase_distribution: PhaseDistribution,
    pub discipline_effort: Vec<DisciplineEffortMetric>,
    pub complexity_breakdown: ComplexityBreakdown,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    scorer: ComplexityScorer,
}

impl Engine {
    /// Validate `config` and compile its patterns.
    pub fn new(config: EngineConfig) -> Result<Self> {
        validate_config_result(&config)?;
        let scorer = ComplexityScorer::new(&config.complexity)?;
        Ok(Self { config, scorer })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derived values before the override layer.
    ///
    /// The discipline override still steers the phase lookup, since phase
    /// is defined over the effective discipline.
    pub fn derive_raw(&self, ticket: &Ticket, events: &[Event]) -> DerivedMetrics {
        let complexity = self.scorer.score(ticket);
        let discipline = classify_discipline(
            &ticket.labels,
            &ticket.components,
            ticket.repo_path.as_deref(),
            &self.config.discipline,
        );
        let phase_discipline = ticket.overrides.discipline.as_deref().unwrap_or(&discipline);
        let phase = derive_phase_from_parts(
            &ticket.labels,
            Some(phase_discipline),
            None,
            &self.config.phase,
        );

        let mut timing = reconstruct_with(ticket, events, &self.config.status);
        timing.oversize = complexity.oversize;

        DerivedMetrics {
            key: ticket.key.clone(),
            complexity,
            discipline,
            phase,
            ai_assisted: is_ai_assisted(ticket, events),
            timing,
        }
    }

    /// Derived values as every consumer should read them.
    pub fn derive(&self, ticket: &Ticket, events: &[Event]) -> DerivedMetrics {
        apply_overrides(self.derive_raw(ticket, events), ticket, &self.config)
    }

    /// Derive every ticket in parallel. `events` may cover any tickets in
    /// any order.
    pub fn derive_all(&self, tickets: &[Ticket], events: &[Event]) -> Vec<DerivedMetrics> {
        let span = info_span!("derive_all", tickets = tickets.len(), events = events.len());
        let _guard = span.enter();

        self.derive_raw_all(tickets, events)
            .into_iter()
            .zip(tickets)
            .map(|(raw, ticket)| apply_overrides(raw, ticket, &self.config))
            .collect()
    }

    /// Copy of `ticket` with its stored derived fields recomputed.
    ///
    /// Stored size and discipline are the raw derived values; the oversize
    /// flag honors a complexity override so stored-field rollups agree with
    /// [`Engine::derive`].
    pub fn enrich(&self, ticket: &Ticket, events: &[Event]) -> Ticket {
        self.enrich_from(ticket, &self.derive_raw(ticket, events))
    }

    pub fn enrich_all(&self, tickets: &[Ticket], events: &[Event]) -> Vec<Ticket> {
        self.derive_raw_all(tickets, events)
            .iter()
            .zip(tickets)
            .map(|(raw, ticket)| self.enrich_from(ticket, raw))
            .collect()
    }

    fn enrich_from(&self, ticket: &Ticket, raw: &DerivedMetrics) -> Ticket {
        let oversize = ticket
            .overrides
            .complexity
            .map_or(raw.complexity.oversize, |size| {
                size == self.config.complexity.oversize.threshold
            });

        Ticket {
            complexity_score: Some(raw.complexity.score),
            complexity_size: Some(raw.complexity.size),
            complexity_factors: Some(raw.complexity.factors),
            discipline: Some(raw.discipline.clone()),
            ai_assisted: Some(raw.ai_assisted),
            oversize: Some(oversize),
            lead_time_ms: raw.timing.lead_ms,
            cycle_time_ms: raw.timing.cycle_ms,
            ..ticket.clone()
        }
    }

    // Raw derivation for a batch, in input order
    fn derive_raw_all(&self, tickets: &[Ticket], events: &[Event]) -> Vec<DerivedMetrics> {
        let by_ticket = group_events_by_ticket(events);
        let no_events: Vec<Event> = Vec::new();

        tickets
            .par_iter()
            .map(|ticket| {
                let ticket_events = by_ticket.get(&ticket.key).unwrap_or(&no_events);
                self.derive_raw(ticket, ticket_events)
            })
            .collect()
    }

    /// Derive every ticket once and build all three rollups from the result.
    pub fn analyze(&self, tickets: &[Ticket], events: &[Event]) -> AnalysisReport {
        let span = info_span!("analyze", tickets = tickets.len());
        let _guard = span.enter();

        let raw = self.derive_raw_all(tickets, events);
        let enriched: Vec<Ticket> = tickets
            .iter()
            .zip(&raw)
            .map(|(ticket, raw)| self.enrich_from(ticket, raw))
            .collect();
        let derived: Vec<DerivedMetrics> = tickets
            .iter()
            .zip(raw)
            .map(|(ticket, raw)| apply_overrides(raw, ticket, &self.config))
            .collect();

        let excluded = enriched.iter().filter(|t| t.is_excluded()).count();
        debug!(excluded, "tickets excluded from rollups");

        let threshold = self.config.complexity.oversize.threshold;
        let phases = phase_distribution(&enriched, events, |ticket| {
            effective_phase(ticket, &self.config.phase)
        });
        let effort = discipline_effort_with(&enriched, events, &self.config.status, threshold);
        let breakdown = complexity_breakdown_with(&enriched, threshold);

        info!(
            tickets = derived.len(),
            disciplines = effort.len(),
            total_hours = phases.total_hours,
            "Analysis complete"
        );

        AnalysisReport {
            tickets: derived,
            phase_distribution: phases,
            discipline_effort: effort,
            complexity_breakdown: breakdown,
        }
    }
}
