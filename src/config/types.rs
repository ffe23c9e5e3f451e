//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    RetryPolicy, VarValue, Variables, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_SECS,
    DEFAULT_RETRY_PATTERNS,
};
use crate::error::VerifyResult;
use crate::infrastructure::tool::DEFAULT_TERRAFORM_BIN;

use super::loader::{self, ConfigWarning};

/// Provisioning tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolConfig {
    /// Path or name of the terraform binary
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Directory holding the root module and `examples/`
    #[serde(default)]
    pub module_root: Option<PathBuf>,
}

/// One retry pattern with the reason reported when it matches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryPatternConfig {
    pub pattern: String,
    pub reason: String,
}

/// Retry configuration
///
/// Leaving `patterns` out keeps the built-in ones; an empty list disables
/// retrying altogether.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Seconds to wait between attempts
    #[serde(default = "default_time_between_retries")]
    pub time_between_retries: u64,

    #[serde(default)]
    pub patterns: Option<Vec<RetryPatternConfig>>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            time_between_retries: default_time_between_retries(),
            patterns: None,
        }
    }
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_time_between_retries() -> u64 {
    DEFAULT_RETRY_DELAY_SECS
}

impl RetryConfig {
    /// Compile into a policy; fails on the first invalid pattern
    pub fn to_policy(&self) -> VerifyResult<RetryPolicy> {
        let delay = Duration::from_secs(self.time_between_retries);
        match &self.patterns {
            Some(patterns) => RetryPolicy::from_pairs(
                patterns
                    .iter()
                    .map(|p| (p.pattern.as_str(), p.reason.as_str())),
                self.max_retries,
                delay,
            ),
            None => RetryPolicy::from_pairs(
                DEFAULT_RETRY_PATTERNS.iter().copied(),
                self.max_retries,
                delay,
            ),
        }
    }
}

/// Per-scenario configuration (`[scenarios.<name>]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Variable overrides layered over the scenario's own
    #[serde(default)]
    pub vars: BTreeMap<String, toml::Value>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            vars: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub scenarios: BTreeMap<String, ScenarioConfig>,
}

impl Config {
    /// Load configuration from a TOML file, discarding warnings
    pub fn load(path: &Path) -> VerifyResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> VerifyResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    pub fn terraform_binary(&self) -> PathBuf {
        self.tool
            .binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TERRAFORM_BIN))
    }

    pub fn retry_policy(&self) -> VerifyResult<RetryPolicy> {
        self.retry.to_policy()
    }

    /// Scenarios are enabled unless configured otherwise
    pub fn scenario_enabled(&self, name: &str) -> bool {
        self.scenarios.get(name).map_or(true, |s| s.enabled)
    }

    pub fn scenario_overrides(&self, name: &str) -> Variables {
        self.scenarios
            .get(name)
            .map(|s| {
                s.vars
                    .iter()
                    .map(|(k, v)| (k.clone(), VarValue::from(v.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }
}
