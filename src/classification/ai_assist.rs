//! AI-assistance detection

use crate::core::{Event, Ticket};

/// Label/component fragments that mark AI-assisted work
pub const AI_ASSIST_TOKENS: &[&str] = &["ai-assisted", "copilot", "ai-generated", "llm"];

/// Detail key set by source-control exporters on assisted commits/PRs
pub const AI_ASSIST_DETAIL_KEY: &str = "aiAssisted";

/// Whether a ticket's labels, components, or events indicate AI assistance.
pub fn is_ai_assisted(ticket: &Ticket, events: &[Event]) -> bool {
    let tagged = ticket
        .labels
        .iter()
        .chain(&ticket.components)
        .map(|value| value.to_lowercase())
        .any(|value| AI_ASSIST_TOKENS.iter().any(|token| value.contains(token)));

    tagged
        || events
            .iter()
            .any(|event| event.detail_flag(AI_ASSIST_DETAIL_KEY) == Some(true))
}
