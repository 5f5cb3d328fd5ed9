//! Ticket counts per size bucket and per discipline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::OversizeConfig;
use crate::core::{SizeBucket, Ticket};
use crate::overrides::{effective_discipline, effective_oversize, effective_size_label};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityBreakdown {
    pub by_size: BTreeMap<String, usize>,
    pub by_discipline: BTreeMap<String, usize>,
    pub oversize_count: usize,
}

/// [`complexity_breakdown_with`] under the default oversize threshold.
pub fn complexity_breakdown(tickets: &[Ticket]) -> ComplexityBreakdown {
    complexity_breakdown_with(tickets, OversizeConfig::default().threshold)
}

/// Tally non-excluded tickets by effective size and effective discipline.
///
/// A ticket counts as oversize when its effective size equals
/// `oversize_threshold`; only a ticket with no size at all falls back to its
/// stored flag.
pub fn complexity_breakdown_with(
    tickets: &[Ticket],
    oversize_threshold: SizeBucket,
) -> ComplexityBreakdown {
    tickets
        .iter()
        .filter(|ticket| !ticket.is_excluded())
        .fold(ComplexityBreakdown::default(), |mut acc, ticket| {
            *acc.by_size.entry(effective_size_label(ticket)).or_default() += 1;
            *acc
                .by_discipline
                .entry(effective_discipline(ticket))
                .or_default() += 1;
            if effective_oversize(ticket, oversize_threshold) {
                acc.oversize_count += 1;
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_effective_values() {
        let mut small = Ticket::new("C-1");
        small.complexity_size = Some(SizeBucket::S);
        small.discipline = Some("frontend".into());

        let mut promoted = Ticket::new("C-2");
        promoted.complexity_size = Some(SizeBucket::S);
        promoted.overrides.complexity = Some(SizeBucket::XL);
        promoted.oversize = Some(true);

        let mut hidden = Ticket::new("C-3");
        hidden.complexity_size = Some(SizeBucket::M);
        hidden.overrides.excluded_from_metrics = true;

        let breakdown = complexity_breakdown(&[small, promoted, hidden]);
        assert_eq!(breakdown.by_size.get("S"), Some(&1));
        assert_eq!(breakdown.by_size.get("XL"), Some(&1));
        assert_eq!(breakdown.by_size.get("M"), None);
        assert_eq!(breakdown.by_discipline.get("frontend"), Some(&1));
        assert_eq!(breakdown.by_discipline.get("unknown"), Some(&1));
        assert_eq!(breakdown.oversize_count, 1);
    }

    #[test]
    fn oversize_follows_the_effective_size() {
        let mut shrunk = Ticket::new("C-4");
        shrunk.complexity_size = Some(SizeBucket::XL);
        shrunk.oversize = Some(true);
        shrunk.overrides.complexity = Some(SizeBucket::S);

        let breakdown = complexity_breakdown(std::slice::from_ref(&shrunk));
        assert_eq!(breakdown.by_size.get("S"), Some(&1));
        assert_eq!(breakdown.oversize_count, 0);

        assert_eq!(complexity_breakdown_with(&[shrunk], SizeBucket::S).oversize_count, 1);
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(complexity_breakdown(&[]), ComplexityBreakdown::default());
    }
}
