//! Share of hours spent per lifecycle phase.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info_span;

use super::stats::{percent_of, round2};
use crate::core::{group_events_by_ticket, ms_to_hours, Event, Phase, Ticket};
use crate::temporal::{elapsed_span_ms, reconstruct};

/// One phase's slice of the distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseShare {
    pub phase: Phase,
    pub ticket_count: usize,
    pub hours: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDistribution {
    /// Sorted by percentage descending; ties keep canonical phase order
    pub phases: Vec<PhaseShare>,
    pub total_hours: f64,
    pub total_tickets: usize,
}

impl PhaseDistribution {
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

#[derive(Default)]
struct PhaseTally {
    tickets: usize,
    hours: f64,
}

/// Hours attributed to one ticket: lead time, else the elapsed span from
/// creation to the last recorded activity, else nothing.
pub fn ticket_hours(ticket: &Ticket, events: &[Event]) -> f64 {
    reconstruct(ticket, events)
        .lead_ms
        .or_else(|| elapsed_span_ms(ticket, events))
        .map(ms_to_hours)
        .unwrap_or(0.0)
}

/// Distribute hours over phases for every non-excluded ticket.
///
/// `classify` supplies each ticket's phase, so callers decide whether
/// overrides apply. With no tickets or no recorded hours the result is empty
/// with zero totals.
pub fn phase_distribution<F>(
    tickets: &[Ticket],
    events: &[Event],
    classify: F,
) -> PhaseDistribution
where
    F: Fn(&Ticket) -> Phase,
{
    let _span = info_span!("phase_distribution", tickets = tickets.len()).entered();

    let by_ticket = group_events_by_ticket(events);
    let no_events: Vec<Event> = Vec::new();

    let tallies = tickets
        .iter()
        .filter(|ticket| !ticket.is_excluded())
        .fold(BTreeMap::<Phase, PhaseTally>::new(), |mut acc, ticket| {
            let ticket_events = by_ticket.get(&ticket.key).unwrap_or(&no_events);
            let tally = acc.entry(classify(ticket)).or_default();
            tally.tickets += 1;
            tally.hours += ticket_hours(ticket, ticket_events);
            acc
        });

    let total_hours: f64 = tallies.values().map(|t| t.hours).sum();
    if total_hours <= 0.0 {
        return PhaseDistribution::default();
    }
    let total_tickets = tallies.values().map(|t| t.tickets).sum();

    // BTreeMap iterates in declaration order, which is the canonical order
    let mut phases: Vec<PhaseShare> = tallies
        .into_iter()
        .map(|(phase, tally)| PhaseShare {
            phase,
            ticket_count: tally.tickets,
            hours: round2(tally.hours),
            percentage: round2(percent_of(tally.hours, total_hours)),
        })
        .collect();
    phases.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    PhaseDistribution {
        phases,
        total_hours: round2(total_hours),
        total_tickets,
    }
}
