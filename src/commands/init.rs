use crate::config::{EngineConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const HEADER: &str = "# effortmap rule configuration
#
# complexity: factor weights (B, T, S, A, U), size thresholds, clamp range,
#             token allowlists, and bespoke regex patterns
# discipline: ordered rules matched by labels, components, or repoPaths
# phase:      label rules, discipline-to-phase mapping, signal priority
# status:     keywords marking a workflow status as active or done

";

/// Default rule set rendered as TOML
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&EngineConfig::default())
        .context("Failed to render default configuration")?;
    Ok(format!("{HEADER}{body}"))
}

/// Write the default rule file into `dir`
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, &default_config_toml()?)?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}
