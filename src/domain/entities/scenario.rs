//! Scenario entity - a named deployment to verify
//!
//! A scenario knows where its Terraform configuration lives, which
//! environment inputs it needs and whether it may share the cloud project
//! with other scenarios running at the same time. Variables and checks are
//! produced by its `ScenarioKind` (see `domain::services::catalog`).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{EnvSnapshot, OutputCheck};
use crate::domain::value_objects::{NamePrefix, Variables};

/// Whether a scenario may run alongside others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Concurrency {
    Parallel,
    /// Runs alone, after every parallel scenario has finished
    Serial,
}

/// The built-in deployment scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Dev,
    Prod,
    Minimal,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioKind::Dev => "dev",
            ScenarioKind::Prod => "prod",
            ScenarioKind::Minimal => "minimal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    kind: ScenarioKind,
    tag: String,
    dir: PathBuf,
    concurrency: Concurrency,
    required_env: Vec<&'static str>,
    optional_env: Vec<&'static str>,
    overrides: Variables,
}

impl Scenario {
    pub fn new(kind: ScenarioKind, tag: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            dir: dir.into(),
            concurrency: Concurrency::Parallel,
            required_env: Vec::new(),
            optional_env: Vec::new(),
            overrides: Variables::new(),
        }
    }

    pub fn serial(mut self) -> Self {
        self.concurrency = Concurrency::Serial;
        self
    }

    pub fn requires(mut self, keys: &[&'static str]) -> Self {
        self.required_env.extend_from_slice(keys);
        self
    }

    pub fn reads(mut self, keys: &[&'static str]) -> Self {
        self.optional_env.extend_from_slice(keys);
        self
    }

    /// Variables layered on top of the scenario's own defaults
    pub fn with_overrides(mut self, overrides: &Variables) -> Self {
        self.overrides = std::mem::take(&mut self.overrides).layer(overrides);
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }

    pub fn kind(&self) -> ScenarioKind {
        self.kind
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    pub fn required_env(&self) -> &[&'static str] {
        &self.required_env
    }

    /// Every key the gate should capture: required first, then optional
    pub fn env_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.required_env
            .iter()
            .chain(self.optional_env.iter())
            .copied()
    }

    pub fn overrides(&self) -> &Variables {
        &self.overrides
    }
}

/// What a scenario is planned from
#[derive(Debug, Clone)]
pub struct ScenarioInputs {
    pub env: EnvSnapshot,
    pub prefix: NamePrefix,
    /// Layered over the scenario defaults before checks are derived
    pub overrides: Variables,
}

/// Variables to apply and checks to run afterwards.
///
/// Checks always describe `variables`, overrides included.
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    pub variables: Variables,
    pub checks: Vec<OutputCheck>,
}
