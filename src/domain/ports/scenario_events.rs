//! Scenario Event Port
//!
//! Provides an observable interface for scenario runs.
//! Enables progress logging, JSON event streams, and test assertions on the
//! exact sequence of lifecycle steps.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::domain::entities::AssertionFailure;

/// Lifecycle phase of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioPhase {
    Initializing,
    Applying,
    Asserting,
    Destroying,
    Done,
}

impl fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioPhase::Initializing => "initializing",
            ScenarioPhase::Applying => "applying",
            ScenarioPhase::Asserting => "asserting",
            ScenarioPhase::Destroying => "destroying",
            ScenarioPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Event emitted while running a scenario
#[derive(Debug, Clone)]
pub enum ScenarioEvent {
    /// Gate found required inputs missing; nothing was run
    Skipped {
        scenario: String,
        missing: Vec<String>,
    },

    /// Gate passed and a name prefix was chosen
    Started { scenario: String, prefix: String },

    /// Scenario moved to a new phase
    PhaseEntered {
        scenario: String,
        phase: ScenarioPhase,
    },

    /// An apply (or destroy) attempt failed
    AttemptFailed {
        scenario: String,
        phase: ScenarioPhase,
        attempt: u32,
        /// Retry reason when the failure matched a pattern
        transient: Option<String>,
    },

    /// Waiting before the next attempt
    RetryScheduled {
        scenario: String,
        phase: ScenarioPhase,
        next_attempt: u32,
        delay: Duration,
        reason: String,
    },

    /// An output check did not hold
    AssertionFailed {
        scenario: String,
        failure: AssertionFailure,
    },

    /// Destroy failed; resources may be left behind
    TeardownFailed { scenario: String, error: String },

    /// Scenario finished
    Completed { scenario: String, passed: bool },
}

/// Trait for receiving scenario events
///
/// Implementations can be:
/// - TracingEventSink: structured log lines
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait ScenarioEventSink: Send + Sync {
    fn on_event(&self, event: ScenarioEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ScenarioEventSink for NoopEventSink {
    fn on_event(&self, _event: ScenarioEvent) {}
}
