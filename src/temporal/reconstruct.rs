use chrono::{DateTime, Utc};

use super::state::{ReplayState, StatusClass};
use crate::config::StatusVocabulary;
use crate::core::{Event, EventKind, StatusCategory, Ticket, TimingMetrics};

/// Reconstruct timing with the default status vocabulary.
pub fn reconstruct(ticket: &Ticket, events: &[Event]) -> TimingMetrics {
    reconstruct_with(ticket, events, &StatusVocabulary::default())
}

/// Reconstruct lead/cycle/active/queue/review time and reopens for one
/// ticket from its events.
///
/// Events may arrive in any order; they are replayed ascending by time.
/// Timestamps that are missing or contradict each other yield `None` for the
/// affected metric rather than an error.
pub fn reconstruct_with(
    ticket: &Ticket,
    events: &[Event],
    vocab: &StatusVocabulary,
) -> TimingMetrics {
    let timeline = Timeline::new(ticket, events);

    let created = timeline.created_at();
    let resolved = timeline.resolved_at();
    let state = replay_statuses(ticket, &timeline, created, resolved, vocab);

    TimingMetrics {
        lead_ms: span_ms(created, resolved),
        cycle_ms: span_ms(timeline.first_active_at(vocab), timeline.cycle_end_at(vocab)),
        active_ms: state.active_ms,
        queue_ms: state.queue_ms,
        reopens: state.reopens.count(),
        // stored flag; the engine replaces it with the scored result
        oversize: ticket.oversize.unwrap_or(false),
        review_ms: timeline.review_ms(),
    }
}

/// Elapsed time used when no lead time exists: creation to resolution,
/// else to the last recorded event, else to the last update.
pub fn elapsed_span_ms(ticket: &Ticket, events: &[Event]) -> Option<i64> {
    let timeline = Timeline::new(ticket, events);
    let end = timeline
        .resolved_at()
        .or_else(|| timeline.last_event_at())
        .or(ticket.updated_at);
    span_ms(timeline.created_at(), end)
}

// Non-negative span between two instants, if both are known
fn span_ms(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<i64> {
    match (start, end) {
        (Some(start), Some(end)) if end >= start => Some((end - start).num_milliseconds()),
        _ => None,
    }
}

fn replay_statuses(
    ticket: &Ticket,
    timeline: &Timeline<'_>,
    created: Option<DateTime<Utc>>,
    resolved: Option<DateTime<Utc>>,
    vocab: &StatusVocabulary,
) -> ReplayState {
    let changes: Vec<&Event> = timeline.status_changes().collect();

    let Some(first) = changes.first() else {
        return replay_without_transitions(ticket, timeline, created, resolved);
    };

    let initial = first
        .details
        .from_status
        .as_deref()
        .map_or(StatusClass::Waiting, |status| StatusClass::of(status, vocab));

    let replayed = changes
        .iter()
        .fold(ReplayState::start(created, initial), |state, event| {
            match event.details.to_status.as_deref() {
                Some(status) => {
                    state.transition(event.occurred_at, StatusClass::of(status, vocab))
                }
                None => state,
            }
        });

    match resolved {
        Some(end) => replayed.accrue(end),
        None => replayed,
    }
}

// A ticket without status history only counts as active work when the
// tracker currently reports it in progress.
fn replay_without_transitions(
    ticket: &Ticket,
    timeline: &Timeline<'_>,
    created: Option<DateTime<Utc>>,
    resolved: Option<DateTime<Utc>>,
) -> ReplayState {
    let idle = ReplayState::start(created, StatusClass::Waiting);
    if ticket.status_category != StatusCategory::InProgress {
        return idle;
    }

    let end = resolved
        .or(ticket.updated_at)
        .or_else(|| timeline.last_event_at());
    let active_ms = span_ms(created, end).unwrap_or(0);
    tracing::debug!(
        ticket = %ticket.key,
        active_ms,
        "no status history; treating elapsed time as active"
    );
    ReplayState { active_ms, ..idle }
}

/// A ticket's events in ascending time order, with the ticket's own fields
/// as fallbacks for missing markers.
struct Timeline<'a> {
    ticket: &'a Ticket,
    events: Vec<&'a Event>,
}

impl<'a> Timeline<'a> {
    fn new(ticket: &'a Ticket, events: &'a [Event]) -> Self {
        let mut events: Vec<&Event> = events.iter().collect();
        events.sort_by_key(|event| event.occurred_at);
        Self { ticket, events }
    }

    fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &'a Event> + '_ {
        self.events.iter().copied().filter(move |e| e.kind == kind)
    }

    // Status changes that name their target; the rest carry no transition
    fn status_changes(&self) -> impl Iterator<Item = &'a Event> + '_ {
        self.of_kind(EventKind::StatusChanged).filter(|e| e.details.to_status.is_some())
    }

    fn last_event_at(&self) -> Option<DateTime<Utc>> {
        self.events.last().map(|e| e.occurred_at)
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.of_kind(EventKind::TicketCreated)
            .next()
            .map(|e| e.occurred_at)
            .or_else(|| {
                tracing::debug!(ticket = %self.ticket.key, "creation from ticket fields");
                self.ticket.created_at
            })
    }

    fn resolution_event_at(&self) -> Option<DateTime<Utc>> {
        self.of_kind(EventKind::Resolved).last().map(|e| e.occurred_at)
    }

    fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolution_event_at().or(self.ticket.resolved_at)
    }

    fn first_active_at(&self, vocab: &StatusVocabulary) -> Option<DateTime<Utc>> {
        self.status_changes()
            .find(|e| e.details.to_status.as_deref().is_some_and(|s| vocab.is_active(s)))
            .map(|e| e.occurred_at)
    }

    fn last_done_at(&self, vocab: &StatusVocabulary) -> Option<DateTime<Utc>> {
        self.status_changes()
            .filter(|e| {
                e.details
                    .to_status
                    .as_deref()
                    .is_some_and(|s| StatusClass::of(s, vocab) == StatusClass::Done)
            })
            .last()
            .map(|e| e.occurred_at)
    }

    // Resolution event, else the last move into done, else the ticket field
    fn cycle_end_at(&self, vocab: &StatusVocabulary) -> Option<DateTime<Utc>> {
        self.resolution_event_at()
            .or_else(|| self.last_done_at(vocab))
            .or(self.ticket.resolved_at)
    }

    fn review_ms(&self) -> Option<i64> {
        let opened = self.of_kind(EventKind::PrOpened).next()?.occurred_at;
        let merged = self
            .of_kind(EventKind::PrMerged)
            .find(|e| e.occurred_at >= opened)?
            .occurred_at;
        span_ms(Some(opened), Some(merged))
    }
}
