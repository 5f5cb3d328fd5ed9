//! Core data model: tickets, events, vocabularies, and derived values.

pub mod event;
pub mod metrics;
pub mod taxonomy;
pub mod ticket;

pub use event::{group_events_by_ticket, Event, EventDetails, EventKind, EventSource};
pub use metrics::{
    ms_to_hours, ComplexityFactors, ComplexityResult, DerivedMetrics, TimingMetrics,
};
pub use taxonomy::{Phase, SizeBucket, StatusCategory, UNKNOWN};
pub use ticket::{Ticket, TicketOverride};
