//! Rollups across a collection of tickets
//!
//! Every rollup skips tickets excluded from metrics and groups by the
//! effective (override-aware) values.

pub mod complexity_breakdown;
pub mod discipline_effort;
pub mod phase_distribution;
pub mod stats;

pub use complexity_breakdown::{
    complexity_breakdown, complexity_breakdown_with, ComplexityBreakdown,
};
pub use discipline_effort::{discipline_effort, discipline_effort_with, DisciplineEffortMetric};
pub use phase_distribution::{phase_distribution, ticket_hours, PhaseDistribution, PhaseShare};
