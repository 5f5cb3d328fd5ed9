use crate::cli::{configure_thread_pool, OutputFormat};
use crate::config::{load_config, load_config_from_path, EngineConfig};
use crate::engine::Engine;
use crate::io::{self, create_writer};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub tickets: PathBuf,
    pub events: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub jobs: usize,
}

/// Explicit rule file, else the nearest `.effortmap.toml`, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => Ok(load_config_from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_config(&cwd)?)
        }
    }
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    configure_thread_pool(config.jobs);

    let rules = resolve_config(config.config.as_deref())?;
    let engine = Engine::new(rules).context("Rule configuration rejected")?;

    let tickets = io::read_tickets(&config.tickets)?;
    let events = match &config.events {
        Some(path) => io::read_events(path)?,
        None => Vec::new(),
    };
    log::info!(
        "Analyzing {} tickets with {} events",
        tickets.len(),
        events.len()
    );

    let report = engine.analyze(&tickets, &events);

    let sink: Box<dyn Write> = match &config.output {
        Some(path) => {
            // no escape codes in files
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut writer = create_writer(config.format.into(), sink);
    writer.write_report(&report)?;
    Ok(())
}
