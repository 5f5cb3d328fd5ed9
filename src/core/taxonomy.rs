//! Fixed vocabularies shared by every stage: lifecycle phases, size buckets,
//! and tracker status categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket name used when a discipline or size cannot be determined.
pub const UNKNOWN: &str = "unknown";

/// Lifecycle phase of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Discovery,
    Definition,
    Design,
    Development,
    Testing,
    Deployment,
    Measure,
    Unknown,
}

impl Phase {
    /// Canonical phase order used for grouping and tie-breaking.
    pub const CANONICAL: [Phase; 8] = [
        Phase::Discovery,
        Phase::Definition,
        Phase::Design,
        Phase::Development,
        Phase::Testing,
        Phase::Deployment,
        Phase::Measure,
        Phase::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Discovery => "discovery",
            Phase::Definition => "definition",
            Phase::Design => "design",
            Phase::Development => "development",
            Phase::Testing => "testing",
            Phase::Deployment => "deployment",
            Phase::Measure => "measure",
            Phase::Unknown => "unknown",
        }
    }

    /// Position in [`Phase::CANONICAL`].
    pub fn canonical_index(&self) -> usize {
        Self::CANONICAL
            .iter()
            .position(|p| p == self)
            .unwrap_or(Self::CANONICAL.len())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::CANONICAL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown phase '{}'", s))
    }
}

/// Complexity size bucket, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeBucket {
    XS,
    S,
    M,
    L,
    XL,
}

impl SizeBucket {
    /// Buckets from largest to smallest, the order thresholds are tested in.
    pub const DESCENDING: [SizeBucket; 5] = [
        SizeBucket::XL,
        SizeBucket::L,
        SizeBucket::M,
        SizeBucket::S,
        SizeBucket::XS,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeBucket::XS => "XS",
            SizeBucket::S => "S",
            SizeBucket::M => "M",
            SizeBucket::L => "L",
            SizeBucket::XL => "XL",
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeBucket::DESCENDING
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown size bucket '{}'", s))
    }
}

/// Tracker status category, independent of the workflow's status names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusCategory {
    #[serde(rename = "To Do", alias = "to_do", alias = "todo", alias = "new")]
    ToDo,
    #[serde(rename = "In Progress", alias = "in_progress", alias = "indeterminate")]
    InProgress,
    #[serde(rename = "Done", alias = "done")]
    Done,
    #[default]
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_round_trips_through_str() {
        for phase in Phase::CANONICAL {
            assert_eq!(phase.as_str().parse::<Phase>(), Ok(phase));
        }
        assert!("shipping".parse::<Phase>().is_err());
    }

    #[test]
    fn canonical_index_follows_declaration_order() {
        assert_eq!(Phase::Discovery.canonical_index(), 0);
        assert_eq!(Phase::Unknown.canonical_index(), 7);
    }

    #[test]
    fn size_buckets_order_small_to_large() {
        assert!(SizeBucket::XS < SizeBucket::S);
        assert!(SizeBucket::L < SizeBucket::XL);
        assert_eq!("xl".parse::<SizeBucket>(), Ok(SizeBucket::XL));
    }

    #[test]
    fn status_category_accepts_tracker_names() {
        let parsed: Vec<StatusCategory> =
            serde_json::from_str(r#"["To Do", "In Progress", "Done", "Blocked"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                StatusCategory::ToDo,
                StatusCategory::InProgress,
                StatusCategory::Done,
                StatusCategory::Unknown
            ]
        );
    }
}
