//! Per-discipline effort rollup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info_span;

use super::stats::{median, percent_of, round2, safe_ratio};
use crate::classification::is_ai_assisted;
use crate::config::{OversizeConfig, StatusVocabulary};
use crate::core::{group_events_by_ticket, ms_to_hours, Event, SizeBucket, Ticket, TimingMetrics};
use crate::overrides::{effective_discipline, effective_oversize};
use crate::temporal::reconstruct_with;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineEffortMetric {
    pub discipline: String,
    pub ticket_count: usize,
    /// `None` when no ticket in the group has a lead time
    pub median_lead_time_hours: Option<f64>,
    pub median_cycle_time_hours: Option<f64>,
    pub active_hours: f64,
    pub queue_hours: f64,
    /// active / (active + queue) as a percentage, 0 when both are 0
    pub efficiency_percent: f64,
    /// Fraction of tickets flagged oversize
    pub oversize_rate: f64,
    pub reopen_count: u32,
    pub median_review_hours: Option<f64>,
    /// Fraction of tickets with AI assistance
    pub ai_assist_rate: f64,
}

struct TicketEffort {
    timing: TimingMetrics,
    oversize: bool,
    ai_assisted: bool,
}

/// [`discipline_effort_with`] under the default status vocabulary and
/// oversize threshold.
pub fn discipline_effort(tickets: &[Ticket], events: &[Event]) -> Vec<DisciplineEffortMetric> {
    discipline_effort_with(
        tickets,
        events,
        &StatusVocabulary::default(),
        OversizeConfig::default().threshold,
    )
}

/// Roll up timing per effective discipline, alphabetically.
///
/// Excluded tickets are skipped. Tickets without a discipline are grouped
/// under `"unknown"`. Timing is replayed with `vocab`; a ticket is oversize
/// when its effective size equals `oversize_threshold`.
pub fn discipline_effort_with(
    tickets: &[Ticket],
    events: &[Event],
    vocab: &StatusVocabulary,
    oversize_threshold: SizeBucket,
) -> Vec<DisciplineEffortMetric> {
    let _span = info_span!("discipline_effort", tickets = tickets.len()).entered();

    let by_ticket = group_events_by_ticket(events);
    let no_events: Vec<Event> = Vec::new();

    let mut groups: BTreeMap<String, Vec<TicketEffort>> = BTreeMap::new();
    for ticket in tickets.iter().filter(|t| !t.is_excluded()) {
        let ticket_events = by_ticket.get(&ticket.key).unwrap_or(&no_events);
        let effort = TicketEffort {
            timing: reconstruct_with(ticket, ticket_events, vocab),
            oversize: effective_oversize(ticket, oversize_threshold),
            ai_assisted: ticket
                .ai_assisted
                .unwrap_or_else(|| is_ai_assisted(ticket, ticket_events)),
        };
        groups
            .entry(effective_discipline(ticket))
            .or_default()
            .push(effort);
    }

    groups
        .into_iter()
        .map(|(discipline, efforts)| rollup(discipline, &efforts))
        .collect()
}

fn rollup(discipline: String, efforts: &[TicketEffort]) -> DisciplineEffortMetric {
    let count = efforts.len();
    let active_ms: i64 = efforts.iter().map(|e| e.timing.active_ms).sum();
    let queue_ms: i64 = efforts.iter().map(|e| e.timing.queue_ms).sum();
    let active_hours = ms_to_hours(active_ms);
    let queue_hours = ms_to_hours(queue_ms);

    let oversize = efforts.iter().filter(|e| e.oversize).count();
    let assisted = efforts.iter().filter(|e| e.ai_assisted).count();

    DisciplineEffortMetric {
        discipline,
        ticket_count: count,
        median_lead_time_hours: median(efforts.iter().map(|e| e.timing.lead_hours()))
            .map(round2),
        median_cycle_time_hours: median(efforts.iter().map(|e| e.timing.cycle_hours()))
            .map(round2),
        active_hours: round2(active_hours),
        queue_hours: round2(queue_hours),
        efficiency_percent: round2(percent_of(active_hours, active_hours + queue_hours)),
        oversize_rate: safe_ratio(oversize, count),
        reopen_count: efforts.iter().map(|e| e.timing.reopens).sum(),
        median_review_hours: median(efforts.iter().map(|e| e.timing.review_hours()))
            .map(round2),
        ai_assist_rate: safe_ratio(assisted, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn ticket(key: &str, discipline: &str) -> Ticket {
        let mut ticket = Ticket::new(key);
        ticket.discipline = Some(discipline.to_string());
        ticket
    }

    fn worked(key: &str, queue_h: i64, active_h: i64) -> Vec<Event> {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let started = start + Duration::hours(queue_h);
        let finished = started + Duration::hours(active_h);
        vec![
            Event::new(key, crate::core::EventKind::TicketCreated, start),
            Event::status_change(key, started, "To Do", "In Progress"),
            Event::status_change(key, finished, "In Progress", "Done"),
            Event::new(key, crate::core::EventKind::Resolved, finished),
        ]
    }

    #[test]
    fn rows_sorted_alphabetically_with_unknown_bucket() {
        let tickets = vec![ticket("Z-1", "qa"), Ticket::new("Z-2"), ticket("Z-3", "backend")];
        let rows = discipline_effort(&tickets, &[]);
        let names: Vec<&str> = rows.iter().map(|r| r.discipline.as_str()).collect();
        assert_eq!(names, vec!["backend", "qa", "unknown"]);
    }

    #[test]
    fn idle_group_has_zero_efficiency_and_no_medians() {
        let rows = discipline_effort(&[ticket("Z-1", "qa")], &[]);
        assert_eq!(rows[0].efficiency_percent, 0.0);
        assert_eq!(rows[0].median_lead_time_hours, None);
        assert_eq!(rows[0].oversize_rate, 0.0);
    }

    #[test]
    fn efficiency_from_summed_hours() {
        let tickets = vec![ticket("E-1", "data"), ticket("E-2", "data")];
        let events: Vec<Event> = worked("E-1", 1, 3)
            .into_iter()
            .chain(worked("E-2", 3, 1))
            .collect();
        let rows = discipline_effort(&tickets, &events);
        assert_eq!(rows[0].ticket_count, 2);
        assert_eq!(rows[0].active_hours, 4.0);
        assert_eq!(rows[0].queue_hours, 4.0);
        assert_eq!(rows[0].efficiency_percent, 50.0);
        assert_eq!(rows[0].median_lead_time_hours, Some(4.0));
    }

    #[test]
    fn override_moves_ticket_between_groups() {
        let mut moved = ticket("M-1", "backend");
        moved.overrides.discipline = Some("devops".into());
        let rows = discipline_effort(&[moved], &[]);
        assert_eq!(rows[0].discipline, "devops");
    }

    #[test]
    fn custom_vocabulary_drives_active_time() {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let events = vec![
            Event::status_change("V-1", start, "Backlog", "Doing"),
            Event::status_change("V-1", start + Duration::hours(3), "Doing", "Shipped"),
            Event::new("V-1", crate::core::EventKind::Resolved, start + Duration::hours(3)),
        ];
        let vocab = StatusVocabulary {
            active: vec!["doing".into()],
            done: vec!["shipped".into()],
        };
        let tickets = [ticket("V-1", "backend")];

        let rows = discipline_effort_with(&tickets, &events, &vocab, SizeBucket::XL);
        assert_eq!(rows[0].active_hours, 3.0);
        assert_eq!(rows[0].efficiency_percent, 100.0);
        assert_eq!(rows[0].median_cycle_time_hours, Some(3.0));

        let defaults = discipline_effort(&tickets, &events);
        assert_eq!(defaults[0].active_hours, 0.0);
    }

    #[test]
    fn complexity_override_clears_stored_oversize() {
        let mut shrunk = ticket("O-1", "backend");
        shrunk.complexity_size = Some(SizeBucket::XL);
        shrunk.oversize = Some(true);
        shrunk.overrides.complexity = Some(SizeBucket::S);

        let rows = discipline_effort(&[shrunk], &[]);
        assert_eq!(rows[0].oversize_rate, 0.0);
    }

    #[test]
    fn rates_count_flags() {
        let mut big = ticket("R-1", "mobile");
        big.oversize = Some(true);
        big.ai_assisted = Some(true);
        let rows = discipline_effort(&[big, ticket("R-2", "mobile")], &[]);
        assert_eq!(rows[0].oversize_rate, 0.5);
        assert_eq!(rows[0].ai_assist_rate, 0.5);
    }
}
