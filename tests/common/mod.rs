// Shared fixture builders for effortmap integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use effortmap::{Event, EventKind, Ticket};

/// Fixed origin so every fixture is reproducible
pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
}

pub fn at(hours: i64) -> DateTime<Utc> {
    origin() + Duration::hours(hours)
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ticket builder for tests
#[derive(Debug, Clone)]
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    pub fn new(key: &str) -> Self {
        Self {
            ticket: Ticket::new(key),
        }
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.ticket.summary = summary.to_string();
        self
    }

    pub fn labels(mut self, labels: &[&str]) -> Self {
        self.ticket.labels = strings(labels);
        self
    }

    pub fn components(mut self, components: &[&str]) -> Self {
        self.ticket.components = strings(components);
        self
    }

    pub fn discipline(mut self, discipline: &str) -> Self {
        self.ticket.discipline = Some(discipline.to_string());
        self
    }

    pub fn created(mut self, hours: i64) -> Self {
        self.ticket.created_at = Some(at(hours));
        self
    }

    pub fn resolved(mut self, hours: i64) -> Self {
        self.ticket.resolved_at = Some(at(hours));
        self
    }

    pub fn excluded(mut self) -> Self {
        self.ticket.overrides.excluded_from_metrics = true;
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}

/// Event stream builder for one ticket
#[derive(Debug, Clone)]
pub struct Timeline {
    key: String,
    events: Vec<Event>,
}

impl Timeline {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            events: Vec::new(),
        }
    }

    pub fn created(mut self, hours: i64) -> Self {
        self.events.push(Event::new(&self.key, EventKind::TicketCreated, at(hours)));
        self
    }

    pub fn moved(mut self, hours: i64, from: &str, to: &str) -> Self {
        self.events.push(Event::status_change(&self.key, at(hours), from, to));
        self
    }

    pub fn resolved(mut self, hours: i64) -> Self {
        self.events.push(Event::new(&self.key, EventKind::Resolved, at(hours)));
        self
    }

    pub fn build(self) -> Vec<Event> {
        self.events
    }
}

/// Two backend tickets and one frontend ticket:
///
/// | ticket | queue | active | reopens | lead |
/// |--------|-------|--------|---------|------|
/// | BE-1   | 24h   | 24h    | 0       | 48h  |
/// | BE-2   | 10h   | 38h    | 1       | 48h  |
/// | FE-1   | 16h   | 8h     | 0       | 24h  |
pub fn effort_scenario() -> (Vec<Ticket>, Vec<Event>) {
    let tickets = vec![
        TicketBuilder::new("BE-1")
            .summary("Add refund endpoint")
            .labels(&["backend"])
            .build(),
        TicketBuilder::new("BE-2")
            .summary("Fix ledger rounding")
            .labels(&["backend"])
            .build(),
        TicketBuilder::new("FE-1")
            .summary("Polish checkout page")
            .labels(&["frontend"])
            .build(),
    ];

    let events = [
        Timeline::new("BE-1")
            .created(0)
            .moved(24, "To Do", "In Progress")
            .moved(48, "In Progress", "Done")
            .resolved(48)
            .build(),
        Timeline::new("BE-2")
            .created(0)
            .moved(10, "To Do", "In Progress")
            .moved(30, "In Progress", "Done")
            .moved(30, "Done", "In Progress")
            .moved(48, "In Progress", "Done")
            .resolved(48)
            .build(),
        Timeline::new("FE-1")
            .created(0)
            .moved(16, "To Do", "In Progress")
            .moved(24, "In Progress", "Done")
            .resolved(24)
            .build(),
    ]
    .concat();

    (tickets, events)
}
