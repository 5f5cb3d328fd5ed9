use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of lifecycle occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TicketCreated,
    StatusChanged,
    Resolved,
    CommentAdded,
    CommitCreated,
    PrOpened,
    PrReviewed,
    PrMerged,
    #[serde(other)]
    Other,
}

/// System that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Jira,
    Github,
    Gitlab,
    Manual,
    #[default]
    #[serde(other)]
    Other,
}

/// Type-specific payload. Status transitions carry `fromStatus`/`toStatus`;
/// anything else the exporter attached is retained in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_status: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A single timestamped occurrence tied to a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub ticket_key: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub source: EventSource,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub details: EventDetails,
}

impl Event {
    pub fn new(ticket_key: impl Into<String>, kind: EventKind, occurred_at: DateTime<Utc>) -> Self {
        Self {
            ticket_key: ticket_key.into(),
            kind,
            source: EventSource::default(),
            occurred_at,
            actor: None,
            details: EventDetails::default(),
        }
    }

    /// Status transition event from `from` to `to`
    pub fn status_change(
        ticket_key: impl Into<String>,
        occurred_at: DateTime<Utc>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        let mut event = Self::new(ticket_key, EventKind::StatusChanged, occurred_at);
        event.source = EventSource::Jira;
        event.details.from_status = Some(from.into());
        event.details.to_status = Some(to.into());
        event
    }

    pub fn is_status_change(&self) -> bool {
        self.kind == EventKind::StatusChanged
    }

    /// Boolean flag from the detail payload, if present
    pub fn detail_flag(&self, name: &str) -> Option<bool> {
        self.details.extra.get(name).and_then(|v| v.as_bool())
    }
}

/// Bucket events by ticket key, each bucket ascending by time.
///
/// The sort is stable, so same-instant events keep their input order.
pub fn group_events_by_ticket(events: &[Event]) -> BTreeMap<String, Vec<Event>> {
    let mut grouped: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for event in events {
        grouped
            .entry(event.ticket_key.clone())
            .or_default()
            .push(event.clone());
    }
    for bucket in grouped.values_mut() {
        bucket.sort_by_key(|event| event.occurred_at);
    }
    grouped
}
