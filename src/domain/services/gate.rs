//! Scenario Gate
//!
//! Runs before any subprocess is started. A scenario whose mandatory inputs
//! are missing is skipped outright, so missing credentials can never leave
//! half-created resources behind.

use crate::domain::entities::{EnvSnapshot, Scenario};
use crate::domain::ports::EnvSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// All mandatory inputs present; carries the captured environment
    Proceed(EnvSnapshot),
    /// Mandatory inputs missing, in declaration order
    Skip { missing: Vec<String> },
}

impl GateDecision {
    pub fn is_skip(&self) -> bool {
        matches!(self, GateDecision::Skip { .. })
    }
}

/// Read the scenario's environment inputs once and decide.
pub fn gate(scenario: &Scenario, env: &dyn EnvSource) -> GateDecision {
    let snapshot = EnvSnapshot::capture(env, scenario.env_keys());
    let missing: Vec<String> = scenario
        .required_env()
        .iter()
        .filter(|key| !snapshot.contains(key))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        GateDecision::Proceed(snapshot)
    } else {
        GateDecision::Skip { missing }
    }
}
