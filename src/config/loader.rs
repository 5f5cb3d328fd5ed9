use std::fs;
use std::path::{Path, PathBuf};

use super::validation::validate_config_result;
use super::{EngineConfig, RawEngineConfig};
use crate::errors::{Error, Result, ResultExt};

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE_NAME: &str = ".effortmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Serialization format of a rule file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => ConfigFormat::Json,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Pure function to parse and validate config from a string
pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<EngineConfig> {
    let raw: RawEngineConfig = match format {
        ConfigFormat::Toml => toml::from_str(contents)?,
        ConfigFormat::Json => serde_json::from_str(contents)?,
        ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    let config = raw.into_engine_config()?;
    validate_config_result(&config)?;
    Ok(config)
}

/// Read, parse, and validate a rule file. Any problem is an error.
pub fn load_config_from_path(path: &Path) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&contents, ConfigFormat::from_path(path))
        .context(format!("Invalid config file {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.effortmap.toml` in `start` or one of its ancestors.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the nearest `.effortmap.toml`, or the built-in defaults.
///
/// The first file found must be valid; a malformed file is an error rather
/// than a silent fallback.
pub fn load_config(start: &Path) -> Result<EngineConfig> {
    match discover_config(start) {
        Some(path) => load_config_from_path(&path),
        None => {
            log::debug!(
                "No {} found after checking {} directories. Using default config.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            Ok(EngineConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, SizeBucket};
    use indoc::indoc;
    use tempfile::TempDir;

    const MINIMAL_TOML: &str = indoc! {r#"
        [complexity]
        bespokePatterns = ["\\bsoap\\b"]

        [complexity.oversize]
        threshold = "L"

        [discipline]
        priority = ["components", "labels"]
        default = "general"

        [[discipline.rules]]
        discipline = "backend"
        patterns = { labels = ["api"] }

        [phase]
        default = "development"
    "#};

    #[test]
    fn parses_toml_documents() {
        let config = parse_config(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(config.complexity.oversize.threshold, SizeBucket::L);
        assert_eq!(config.complexity.bespoke_patterns, vec![r"\bsoap\b"]);
        assert_eq!(config.discipline.default, "general");
        assert_eq!(config.discipline.rules.len(), 1);
        assert_eq!(config.phase.default, Phase::Development);
    }

    #[test]
    fn parses_json_documents() {
        let json = r#"{
            "complexity": {"weights": {"B": 1, "T": 1, "S": 1, "A": 1, "U": 1}},
            "discipline": {"default": "general"},
            "phase": {"priority": ["discipline"]}
        }"#;
        let config = parse_config(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.complexity.weights.bespoke, 1.0);
        assert_eq!(config.phase.priority.len(), 1);
    }

    #[test]
    fn missing_section_fails_loudly() {
        let err = parse_config("[complexity]\n[phase]\n", ConfigFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("discipline"));
    }

    #[test]
    fn invalid_rules_fail_validation() {
        let yaml = indoc! {"
            complexity:
              clamping: {min: 3, max: 1}
            discipline: {}
            phase: {}
        "};
        assert!(matches!(
            parse_config(yaml, ConfigFormat::Yaml),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("rules.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("rules.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new(".effortmap.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("rules")), ConfigFormat::Toml);
    }

    #[test]
    fn load_config_searches_ancestors() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), MINIMAL_TOML).unwrap();

        assert_eq!(
            discover_config(&nested),
            Some(temp.path().join(CONFIG_FILE_NAME))
        );
        let config = load_config(&nested).unwrap();
        assert_eq!(config.discipline.default, "general");
    }

    #[test]
    fn load_config_surfaces_malformed_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "[complexity\n").unwrap();
        assert!(load_config(temp.path()).is_err());
    }

    #[test]
    fn directory_ancestors_stops_at_depth() {
        let dirs: Vec<PathBuf> =
            directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
