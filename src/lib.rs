//! Lifecycle metrics derivation for issue-tracker and source-control records.
//!
//! Tickets and their lifecycle events go in; complexity scores, discipline
//! and phase classifications, time-in-state reconstructions, and rollups
//! across tickets come out. Every derivation is a pure function of the
//! inputs and an [`EngineConfig`].

// Export modules for library usage
pub mod aggregation;
pub mod classification;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod io;
pub mod observability;
pub mod overrides;
pub mod temporal;

// Re-export commonly used types
pub use crate::core::{
    group_events_by_ticket, ComplexityFactors, ComplexityResult, DerivedMetrics, Event,
    EventKind, EventSource, Phase, SizeBucket, StatusCategory, Ticket, TicketOverride,
    TimingMetrics,
};

pub use crate::aggregation::{
    complexity_breakdown, complexity_breakdown_with, discipline_effort, discipline_effort_with,
    phase_distribution, ComplexityBreakdown, DisciplineEffortMetric, PhaseDistribution,
    PhaseShare,
};

pub use crate::classification::{classify_discipline, derive_phase, derive_phase_from_parts};
pub use crate::complexity::ComplexityScorer;
pub use crate::config::{EngineConfig, StatusVocabulary};
pub use crate::engine::{AnalysisReport, Engine};
pub use crate::errors::{Error, Result};
pub use crate::overrides::apply_overrides;
pub use crate::temporal::{reconstruct, reconstruct_with};
