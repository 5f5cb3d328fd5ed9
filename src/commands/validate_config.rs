use crate::config::{parse_config, ConfigFormat, EngineConfig};
use crate::errors::Error;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

/// Parse a rule file, returning every problem found instead of the first.
pub fn check_config_file(path: &Path) -> Result<std::result::Result<EngineConfig, Vec<String>>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    Ok(
        parse_config(&contents, ConfigFormat::from_path(path)).map_err(|err| match err {
            Error::Validation(problems) => problems,
            other => vec![other.to_string()],
        }),
    )
}

/// Load and validate a rule file, printing every accumulated problem.
pub fn validate_config_file(path: &Path) -> Result<()> {
    match check_config_file(path)? {
        Ok(config) => {
            println!(
                "{} {} is valid ({} discipline rules, {} phase label rules)",
                "✓".green(),
                path.display(),
                config.discipline.rules.len(),
                config.phase.label_overrides.len()
            );
            Ok(())
        }
        Err(problems) => {
            eprintln!("{} {} is invalid:", "✗".red(), path.display());
            for problem in &problems {
                eprintln!("  - {problem}");
            }
            anyhow::bail!("{} problem(s) in {}", problems.len(), path.display())
        }
    }
}
