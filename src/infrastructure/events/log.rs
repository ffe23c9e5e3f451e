//! Tracing Event Sink
//!
//! Turns scenario events into log lines for interactive runs.

use crate::domain::ports::{ScenarioEvent, ScenarioEventSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl ScenarioEventSink for TracingEventSink {
    fn on_event(&self, event: ScenarioEvent) {
        match event {
            ScenarioEvent::Skipped { scenario, missing } => {
                tracing::warn!(%scenario, "skipped: {} not set", missing.join(", "));
            }
            ScenarioEvent::Started { scenario, prefix } => {
                tracing::info!(%scenario, %prefix, "started");
            }
            ScenarioEvent::PhaseEntered { scenario, phase } => {
                tracing::info!(%scenario, "{}", phase);
            }
            ScenarioEvent::AttemptFailed {
                scenario,
                phase,
                attempt,
                transient,
            } => match transient {
                Some(reason) => {
                    tracing::warn!(%scenario, %phase, attempt, "transient failure: {}", reason)
                }
                None => tracing::error!(%scenario, %phase, attempt, "failed"),
            },
            ScenarioEvent::RetryScheduled {
                scenario,
                phase,
                next_attempt,
                delay,
                ..
            } => {
                tracing::info!(
                    %scenario,
                    %phase,
                    "attempt {} in {}s",
                    next_attempt,
                    delay.as_secs()
                );
            }
            ScenarioEvent::AssertionFailed { scenario, failure } => {
                tracing::error!(%scenario, "{}", failure);
            }
            ScenarioEvent::TeardownFailed { scenario, error } => {
                tracing::debug!(%scenario, "teardown failed: {}", error);
            }
            ScenarioEvent::Completed { scenario, passed } => {
                if passed {
                    tracing::info!(%scenario, "passed");
                } else {
                    tracing::error!(%scenario, "failed");
                }
            }
        }
    }
}
