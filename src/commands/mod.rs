//! CLI command implementations.
//!
//! - **analyze**: derive metrics for a ticket/event export and write a report
//! - **init**: write a default `.effortmap.toml`
//! - **validate-config**: check a rule file and list every problem

pub mod analyze;
pub mod init;
pub mod validate_config;

pub use analyze::{handle_analyze, resolve_config, AnalyzeConfig};
pub use init::{default_config_toml, init_config, init_config_in};
pub use validate_config::{check_config_file, validate_config_file};
