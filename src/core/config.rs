//! Configuration loading
//!
//! Resolution order: built-in defaults → YAML file → environment → CLI flags.
//! The YAML file is `--config <path>` when given, otherwise
//! `<config dir>/pra/config.yaml` if it exists. CLI flags are applied by the
//! command layer on top of the value returned here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::report::ReportOptions;
use crate::core::tornado::TornadoMetric;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_ISSUE_BASE_URL: &str = "http://localhost:8080";

pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
pub const ENV_ISSUE_BASE_URL: &str = "ISSUE_BASE_URL";
pub const ENV_JIRA_URL: &str = "JIRA_URL";
pub const ENV_SIMULATIONS: &str = "PRA_SIMULATIONS";

const APP_NAME: &str = "pra";
const CONFIG_FILENAME: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Per-call backend timeouts, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub search: u64,
    pub simulate: u64,
    pub tasks: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            search: 10,
            simulate: 300,
            tasks: 15,
        }
    }
}

impl Timeouts {
    pub fn search(&self) -> Duration {
        Duration::from_secs(self.search)
    }

    pub fn simulate(&self) -> Duration {
        Duration::from_secs(self.simulate)
    }

    pub fn tasks(&self) -> Duration {
        Duration::from_secs(self.tasks)
    }

    /// Longest configured timeout, used as the agent-wide ceiling
    pub fn longest(&self) -> Duration {
        Duration::from_secs(self.search.max(self.simulate).max(self.tasks))
    }
}

/// Bounds on the requested simulation count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationLimits {
    pub default: u32,
    pub min: u32,
    pub max: u32,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            default: 10_000,
            min: 1_000,
            max: 50_000,
        }
    }
}

impl SimulationLimits {
    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub histogram_bins: usize,
    pub tornado_limit: usize,
    pub tornado_metric: TornadoMetric,
    pub top_tasks: usize,
}

impl ReportConfig {
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            histogram_bins: self.histogram_bins,
            tornado_limit: self.tornado_limit,
            tornado_metric: self.tornado_metric,
            top_tasks: self.top_tasks,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 50,
            tornado_limit: 10,
            tornado_metric: TornadoMetric::Variability,
            top_tasks: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub issue_base_url: String,
    pub timeouts: Timeouts,
    pub simulations: SimulationLimits,
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            issue_base_url: DEFAULT_ISSUE_BASE_URL.to_string(),
            timeouts: Timeouts::default(),
            simulations: SimulationLimits::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// `<config dir>/pra/config.yaml`, when a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load defaults, the config file and the process environment
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content)
    }

    /// Overlay environment values from `lookup`
    ///
    /// `ISSUE_BASE_URL` wins over `JIRA_URL` when both are set.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_BACKEND_URL) {
            self.backend_url = url;
        }
        if let Some(url) = non_empty(ENV_ISSUE_BASE_URL).or_else(|| non_empty(ENV_JIRA_URL)) {
            self.issue_base_url = url;
        }
        if let Some(raw) = non_empty(ENV_SIMULATIONS) {
            self.simulations.default =
                raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: ENV_SIMULATIONS.to_string(),
                    message: format!("'{}' is not a positive integer", raw),
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.simulations;
        if limits.min > limits.max {
            return Err(ConfigError::Invalid {
                key: "simulations".to_string(),
                message: format!("min {} exceeds max {}", limits.min, limits.max),
            });
        }
        if !limits.contains(limits.default) {
            return Err(ConfigError::Invalid {
                key: "simulations.default".to_string(),
                message: format!(
                    "{} is outside {}..={}",
                    limits.default, limits.min, limits.max
                ),
            });
        }
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "backend_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.report.histogram_bins == 0 {
            return Err(ConfigError::Invalid {
                key: "report.histogram_bins".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Browser link for an issue key
    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.issue_base_url.trim_end_matches('/'), key)
    }
}
