//! Ticket complexity scoring
//!
//! Five factors are counted from the ticket's text, labels, and components:
//!
//! | Factor | Counts |
//! |--------|--------|
//! | B | distinct matches of the bespoke-work patterns |
//! | T | distinct labels/components naming a technology token |
//! | S | distinct labels/components/words naming a systems token |
//! | A | acceptance-criteria markers |
//! | U | distinct actor roles (user, admin, operator, customer, developer) |
//!
//! Each factor is clamped, weighted, and summed; the sum is bucketed into a
//! size (XS..XL) by the configured thresholds.

pub mod factors;
pub mod scorer;

pub use scorer::{clamp_factors, size_for_score, weighted_score, ComplexityScorer};
