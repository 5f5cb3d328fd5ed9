//! Rule-based ticket classification: engineering discipline, lifecycle
//! phase, and AI assistance.

pub mod ai_assist;
pub mod discipline;
pub mod heuristics;
pub mod phase;

pub use ai_assist::is_ai_assisted;
pub use discipline::{classify_discipline, match_rules, DisciplineInput};
pub use heuristics::sniff_discipline;
pub use phase::{derive_phase, derive_phase_from_parts, resolve_phase, PhaseInput};
