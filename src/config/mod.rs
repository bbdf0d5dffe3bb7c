//! Configuration module
//!
//! Handles loading winbounds defaults from a TOML file and merging them with
//! command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::screen::TargetArea;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid epsilon {0}: must be a finite, non-negative number")]
    InvalidEpsilon(f64),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default edge tolerance in points
pub const DEFAULT_EPSILON: f64 = 1.0;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Edge check settings
    #[serde(default)]
    pub check: CheckConfig,

    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Edge check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Screen rectangle to compare against
    #[serde(default)]
    pub target: TargetArea,
    /// Tolerance in points
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            target: TargetArea::default(),
            epsilon: default_epsilon(),
        }
    }
}

/// General configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Print parse and lookup warnings
    #[serde(default)]
    pub verbose: bool,
    /// Emit JSONL records
    #[serde(default)]
    pub dump: bool,
    /// Layout file to use instead of the live window server
    pub layout: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Config file to use: `explicit` if given, else the first default
    /// location that exists
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let config_paths = [
            dirs::config_dir().map(|p| p.join("winbounds/config.toml")),
            Some(PathBuf::from("./winbounds.toml")),
        ];
        config_paths.into_iter().flatten().find(|path| path.exists())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_epsilon(self.check.epsilon)?;
        Ok(())
    }
}

/// Check that a tolerance is usable
pub fn validate_epsilon(epsilon: f64) -> ConfigResult<f64> {
    if epsilon.is_finite() && epsilon >= 0.0 {
        Ok(epsilon)
    } else {
        Err(ConfigError::InvalidEpsilon(epsilon))
    }
}

/// Command-line values that override the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<TargetArea>,
    pub epsilon: Option<f64>,
    pub verbose: bool,
    pub dump: bool,
    pub layout: Option<PathBuf>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub target: TargetArea,
    pub epsilon: f64,
    pub verbose: bool,
    pub dump: bool,
    pub layout: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self::resolve(&Config::default(), Overrides::default())
    }
}

impl Options {
    /// Merge config file values with command-line overrides
    pub fn resolve(config: &Config, overrides: Overrides) -> Self {
        Self {
            target: overrides.target.unwrap_or(config.check.target),
            epsilon: overrides.epsilon.unwrap_or(config.check.epsilon),
            verbose: overrides.verbose || config.general.verbose,
            dump: overrides.dump || config.general.dump,
            layout: overrides.layout.or_else(|| config.general.layout.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let options = Options::default();
        assert_eq!(options.target, TargetArea::Visible);
        assert_eq!(options.epsilon, DEFAULT_EPSILON);
        assert!(!options.verbose);
        assert!(!options.dump);
        assert!(options.layout.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[check]\ntarget = \"frame\"\nepsilon = 2.5\n\n[general]\ndump = true\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.check.target, TargetArea::Frame);
        assert_eq!(config.check.epsilon, 2.5);
        assert!(config.general.dump);
        assert!(!config.general.verbose);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nverbose = true\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.check.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.check.target, TargetArea::Visible);
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[check]\nepsilon = -1.0\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEpsilon(_)));
        assert!(validate_epsilon(f64::NAN).is_err());
        assert!(validate_epsilon(f64::INFINITY).is_err());
        assert_eq!(validate_epsilon(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_explicit_path_is_located_even_if_missing() {
        let explicit = Path::new("/nonexistent/winbounds.toml");
        assert_eq!(Config::locate(Some(explicit)), Some(explicit.to_path_buf()));

        // Default search only returns files that exist
        if let Some(found) = Config::locate(None) {
            assert!(found.exists());
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/winbounds.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::default();
        config.check.target = TargetArea::Frame;
        config.check.epsilon = 3.0;
        config.general.layout = Some(PathBuf::from("from-config.toml"));

        let options = Options::resolve(
            &config,
            Overrides {
                target: Some(TargetArea::Visible),
                epsilon: Some(0.0),
                verbose: true,
                dump: false,
                layout: None,
            },
        );
        assert_eq!(options.target, TargetArea::Visible);
        assert_eq!(options.epsilon, 0.0);
        assert!(options.verbose);
        assert_eq!(options.layout, Some(PathBuf::from("from-config.toml")));
    }
}
