//! Status-name vocabulary used by the temporal reconstructor
//!
//! Trackers let teams name workflow statuses freely, so "active" and "done"
//! are recognised by case-insensitive substring match against these keyword
//! lists. Custom workflows whose names share no keyword are misclassified;
//! extend the lists rather than relying on the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusVocabulary {
    /// Keywords marking a status as active work
    #[serde(default = "default_active_keywords")]
    pub active: Vec<String>,

    /// Keywords marking a status as finished
    #[serde(default = "default_done_keywords")]
    pub done: Vec<String>,
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            active: default_active_keywords(),
            done: default_done_keywords(),
        }
    }
}

impl StatusVocabulary {
    pub fn is_active(&self, status: &str) -> bool {
        contains_any(status, &self.active)
    }

    pub fn is_done(&self, status: &str) -> bool {
        contains_any(status, &self.done)
    }
}

fn contains_any(status: &str, keywords: &[String]) -> bool {
    let status = status.to_lowercase();
    keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && status.contains(&keyword.to_lowercase()))
}

pub fn default_active_keywords() -> Vec<String> {
    vec!["progress".to_string()]
}

pub fn default_done_keywords() -> Vec<String> {
    vec![
        "done".to_string(),
        "closed".to_string(),
        "resolved".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_matches_substrings() {
        let vocab = StatusVocabulary::default();
        assert!(vocab.is_active("In Progress"));
        assert!(vocab.is_active("PROGRESSING"));
        assert!(!vocab.is_active("In Review"));
        assert!(vocab.is_done("Done"));
        assert!(vocab.is_done("Closed - Won't Fix"));
        assert!(!vocab.is_done("To Do"));
    }

    #[test]
    fn empty_keywords_never_match() {
        let vocab = StatusVocabulary {
            active: vec![String::new()],
            done: vec![],
        };
        assert!(!vocab.is_active("anything"));
        assert!(!vocab.is_done("Done"));
    }
}
