use anyhow::{Context, Result};
use fs_err::read_to_string;
use serde::Deserialize;
use std::str::FromStr;

use super::error::ConfigError;
use super::roads::RoadClasses;

/// Settings read from an optional TOML file, for example:
///
/// ```toml
/// [roads]
/// motorway = "A"
/// ordinary = "S"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub roads: RoadClasses,
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.roads.validate()?;
        Ok(config)
    }
}

/// Loads the config file if one was given, falling back to the defaults.
pub fn load(path: Option<&str>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let file = read_to_string(path)?;
    let config = Config::from_str(&file)
        .with_context(|| format!("Failed to load config from {path}"))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Config::from_str("").unwrap(), Config::default());
        assert_eq!(Config::from_str("[roads]\n").unwrap().roads, RoadClasses::default());
    }

    #[test]
    fn test_custom_categories() {
        let config = Config::from_str("[roads]\nmotorway = \"M\"\nordinary = \"R\"\n").unwrap();
        assert_eq!(config.roads, RoadClasses::new('M', 'R'));
    }

    #[test]
    fn test_partial_override_keeps_other_default() {
        let config = Config::from_str("[roads]\nordinary = \"B\"\n").unwrap();
        assert_eq!(config.roads, RoadClasses::new('A', 'B'));
    }

    #[test]
    fn test_rejects_invalid_categories() {
        assert!(matches!(
            Config::from_str("[roads]\nordinary = \"A\"\n"),
            Err(ConfigError::DuplicateCategory('A'))
        ));
        assert!(matches!(
            Config::from_str("[roads]\nmotorway = \"7\"\n"),
            Err(ConfigError::InvalidCategory('7'))
        ));
        assert!(matches!(
            Config::from_str("[roads]\nmotorway = \"AB\"\n"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(Config::from_str("speed = 1\n"), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("tracker.toml");
        fs_err::write(&path, "[roads]\nmotorway = \"M\"\n").unwrap();
        let config = load(path.to_str()).unwrap();
        assert_eq!(config.roads.motorway, 'M');
        assert!(load(Some("/nonexistent/tracker.toml")).is_err());
    }
}
