//! Shared error types for effortmap
//!
//! The derivation engine itself never fails for a validated configuration:
//! sparse ticket data degrades to defaults or `None`. Errors only arise at the
//! edges, when rule documents or ticket/event exports are loaded.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for effortmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (missing sections, unknown format)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Accumulated configuration validation problems
    #[error("Invalid configuration:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),

    /// Invalid regular expression in a rule document
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Unreadable ticket or event export
    #[error("Input error in {path}: {message}")]
    Input { path: PathBuf, message: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create an input error for a specific file
    pub fn input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a pattern error from a failed regex compilation
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether the user can fix this error by editing a rule document
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::Validation(_)
                | Self::Pattern { .. }
                | Self::Toml(_)
                | Self::Yaml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
