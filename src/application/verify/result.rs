//! Verify Result
//!
//! Result types for one scenario run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::retry::ApplyError;
use crate::domain::entities::{AssertionFailure, OutputSet};
use crate::domain::ports::ToolError;

/// How a scenario ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScenarioOutcome {
    Passed,
    /// Never started: missing inputs, disabled, or aborted before its turn
    Skipped { reason: String },
    Failed,
}

/// The first thing that went wrong in a scenario
#[derive(Debug, Clone, Error)]
pub enum ScenarioFailure {
    /// Overrides touched a variable the verifier owns; nothing ran
    #[error("{0}")]
    Overrides(String),

    #[error("{0}")]
    Initialize(ToolError),

    #[error("{0}")]
    Apply(ApplyError),

    #[error("{0}")]
    ReadOutputs(ToolError),

    #[error("{} output check(s) failed", .0.len())]
    Assertions(Vec<AssertionFailure>),

    /// Caller-supplied checks returned an error
    #[error("{0}")]
    Body(String),

    #[error("panicked: {0}")]
    Panicked(String),

    /// Everything else passed but the resources could not be destroyed
    #[error("teardown failed: {0}")]
    Teardown(String),
}

impl ScenarioFailure {
    /// Short machine-readable name
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioFailure::Overrides(_) => "overrides",
            ScenarioFailure::Initialize(_) => "initialize",
            ScenarioFailure::Apply(_) => "apply",
            ScenarioFailure::ReadOutputs(_) => "read_outputs",
            ScenarioFailure::Assertions(_) => "assertions",
            ScenarioFailure::Body(_) => "body",
            ScenarioFailure::Panicked(_) => "panicked",
            ScenarioFailure::Teardown(_) => "teardown",
        }
    }
}

/// Whether the scenario's resources were cleaned up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum TeardownStatus {
    /// Initialize never succeeded, so there was nothing to destroy
    NotRequired,
    Succeeded,
    /// Destroy failed; resources may still exist
    Failed(String),
}

impl TeardownStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, TeardownStatus::Failed(_))
    }
}

/// Everything known about one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: String,
    /// Name prefix, once the gate passed
    pub prefix: Option<String>,
    pub outcome: ScenarioOutcome,
    pub failure: Option<ScenarioFailure>,
    pub teardown: TeardownStatus,
    /// Apply attempts made, including the first
    pub apply_attempts: u32,
    /// Outputs read after a successful apply
    pub outputs: OutputSet,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScenarioReport {
    pub fn new(scenario: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            scenario: scenario.into(),
            prefix: None,
            outcome: ScenarioOutcome::Passed,
            failure: None,
            teardown: TeardownStatus::NotRequired,
            apply_attempts: 0,
            outputs: OutputSet::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn skipped(scenario: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            outcome: ScenarioOutcome::Skipped {
                reason: reason.into(),
            },
            ..Self::new(scenario)
        }
    }

    pub fn is_passed(&self) -> bool {
        self.outcome == ScenarioOutcome::Passed
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, ScenarioOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == ScenarioOutcome::Failed
    }

    /// Output check failures, empty unless the run got that far
    pub fn assertion_failures(&self) -> &[AssertionFailure] {
        match &self.failure {
            Some(ScenarioFailure::Assertions(failures)) => failures,
            _ => &[],
        }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Record the first failure; later ones never replace it
    pub(crate) fn fail(&mut self, failure: ScenarioFailure) {
        if self.failure.is_none() {
            self.failure = Some(failure);
        }
        self.outcome = ScenarioOutcome::Failed;
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn to_json(&self) -> serde_json::Value {
        let failure = self.failure.as_ref().map(|failure| {
            let mut value = serde_json::json!({
                "kind": failure.kind(),
                "message": failure.to_string(),
            });
            match failure {
                ScenarioFailure::Assertions(failures) => {
                    value["assertions"] = serde_json::json!(failures);
                }
                ScenarioFailure::Initialize(err) | ScenarioFailure::ReadOutputs(err) => {
                    value["diagnostics"] = serde_json::json!(err.diagnostics);
                }
                ScenarioFailure::Apply(err) => {
                    value["diagnostics"] = serde_json::json!(err.last_error().diagnostics);
                }
                _ => {}
            }
            value
        });

        serde_json::json!({
            "scenario": self.scenario,
            "prefix": self.prefix,
            "outcome": self.outcome,
            "failure": failure,
            "teardown": self.teardown,
            "apply_attempts": self.apply_attempts,
            "outputs": self.outputs,
            "started_at": self.started_at.to_rfc3339(),
            "finished_at": self.finished_at.to_rfc3339(),
            "duration_ms": self.duration().num_milliseconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OutputCheck;

    #[test]
    fn first_failure_is_kept() {
        let mut report = ScenarioReport::new("dev");
        report.fail(ScenarioFailure::Body("checks".into()));
        report.fail(ScenarioFailure::Teardown("destroy".into()));
        assert!(matches!(report.failure, Some(ScenarioFailure::Body(_))));
        assert!(report.is_failed());
    }

    #[test]
    fn skipped_report_json() {
        let report = ScenarioReport::skipped("prod", "missing TF_VAR_project_id");
        let json = report.to_json();
        assert_eq!(json["outcome"]["status"], "skipped");
        assert_eq!(json["outcome"]["reason"], "missing TF_VAR_project_id");
        assert_eq!(json["teardown"]["status"], "not_required");
        assert!(json["failure"].is_null());
    }

    #[test]
    fn assertion_failures_are_listed_in_json() {
        let failure = OutputCheck::non_empty("vpc_name", "VPC name should not be empty")
            .evaluate(&OutputSet::new())
            .unwrap_err();
        let mut report = ScenarioReport::new("dev");
        report.fail(ScenarioFailure::Assertions(vec![failure]));

        let json = report.to_json();
        assert_eq!(json["failure"]["kind"], "assertions");
        assert_eq!(json["failure"]["assertions"][0]["output"], "vpc_name");
        assert_eq!(report.assertion_failures().len(), 1);
    }

    #[test]
    fn teardown_failure_serializes_error() {
        let status = TeardownStatus::Failed("destroy failed".into());
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({"status": "failed", "error": "destroy failed"})
        );
    }
}
