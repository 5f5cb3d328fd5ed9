//! Replay state carried through the status-change fold.
//!
//! Invariants:
//! - `active_ms` and `queue_ms` only grow, and only by non-negative spans.
//! - `cursor` is the instant the current status was entered; spans are
//!   measured from it and attributed by `current`.
//! - the reopen machine counts each done→non-done cycle exactly once.

use chrono::{DateTime, Utc};

use crate::config::StatusVocabulary;

/// Coarse classification of a free-text status name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Active,
    Done,
    Waiting,
}

impl StatusClass {
    /// Classify a status name. Active wins over done when both keywords
    /// appear; unknown names are waiting.
    pub fn of(status: &str, vocab: &StatusVocabulary) -> Self {
        if vocab.is_active(status) {
            StatusClass::Active
        } else if vocab.is_done(status) {
            StatusClass::Done
        } else {
            StatusClass::Waiting
        }
    }
}

/// Counts done→non-done cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReopenMachine {
    seen_done: bool,
    count: u32,
}

impl ReopenMachine {
    /// Observe a transition into a status of class `entered`.
    #[must_use]
    pub fn observe(self, entered: StatusClass) -> Self {
        match (entered, self.seen_done) {
            (StatusClass::Done, _) => Self {
                seen_done: true,
                ..self
            },
            (_, true) => Self {
                seen_done: false,
                count: self.count + 1,
            },
            (_, false) => self,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Accumulator for one ticket's status history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayState {
    pub current: StatusClass,
    pub cursor: Option<DateTime<Utc>>,
    pub active_ms: i64,
    pub queue_ms: i64,
    pub reopens: ReopenMachine,
}

impl ReplayState {
    pub fn start(at: Option<DateTime<Utc>>, initial: StatusClass) -> Self {
        Self {
            current: initial,
            cursor: at,
            active_ms: 0,
            queue_ms: 0,
            reopens: ReopenMachine::default(),
        }
    }

    /// Attribute the span from the cursor to `until` to the current status.
    #[must_use]
    pub fn accrue(self, until: DateTime<Utc>) -> Self {
        let span = self
            .cursor
            .map(|from| (until - from).num_milliseconds())
            .filter(|ms| *ms > 0)
            .unwrap_or(0);

        match self.current {
            StatusClass::Active => Self {
                active_ms: self.active_ms + span,
                ..self
            },
            StatusClass::Done | StatusClass::Waiting => Self {
                queue_ms: self.queue_ms + span,
                ..self
            },
        }
    }

    /// Apply a transition into `entered` at `at`.
    #[must_use]
    pub fn transition(self, at: DateTime<Utc>, entered: StatusClass) -> Self {
        let accrued = self.accrue(at);
        Self {
            current: entered,
            // never move the cursor backwards on out-of-order data
            cursor: Some(accrued.cursor.map_or(at, |c| c.max(at))),
            reopens: accrued.reopens.observe(entered),
            ..accrued
        }
    }
}
