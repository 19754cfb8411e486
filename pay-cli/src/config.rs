use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use pay_core::Scenario;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("built-in configuration is invalid: {0}")]
    Builtin(#[source] toml::de::Error),

    #[error("scenario id '{0}' is used more than once")]
    DuplicateScenario(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"info"` or `"pay_core=debug,warn"`.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            stdout: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesConfig {
    /// Directory of tax table CSVs; the built-in tables are used when unset.
    pub dir: Option<PathBuf>,
    /// Tax year to calculate against; defaults to the latest loaded year.
    pub year: Option<i32>,
}

/// Contents of a configuration file.
///
/// Every section is optional. An empty `scenarios` list means "use the
/// built-in catalog".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub tables: TablesConfig,
    pub scenarios: Vec<Scenario>,
}

impl AppConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(ConfigError::DuplicateScenario(scenario.id.clone()));
            }
        }
        Ok(self)
    }

    /// The configuration compiled into the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        toml::from_str::<Self>(DEFAULT_CONFIG)
            .map_err(ConfigError::Builtin)?
            .validate()
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<Self>(&content)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .validate()
    }

    /// Loads `path` when given, otherwise the built-in configuration.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Scenarios to evaluate: the file's own, or the built-in catalog.
    pub fn scenario_catalog(&self) -> Result<Vec<Scenario>, ConfigError> {
        if self.scenarios.is_empty() {
            Ok(Self::builtin()?.scenarios)
        } else {
            Ok(self.scenarios.clone())
        }
    }
}
