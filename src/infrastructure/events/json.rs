//! JSON Event Sink
//!
//! Outputs scenario events as NDJSON for CI/automation consumption.

use crate::domain::ports::{ScenarioEvent, ScenarioEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Shared by every scenario thread; one event per line
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl ScenarioEventSink for JsonEventSink {
    fn on_event(&self, event: ScenarioEvent) {
        let json = match event {
            ScenarioEvent::Skipped { scenario, missing } => {
                serde_json::json!({
                    "event": "skipped",
                    "scenario": scenario,
                    "missing": missing,
                })
            }

            ScenarioEvent::Started { scenario, prefix } => {
                serde_json::json!({
                    "event": "start",
                    "scenario": scenario,
                    "prefix": prefix,
                })
            }

            ScenarioEvent::PhaseEntered { scenario, phase } => {
                serde_json::json!({
                    "event": "phase",
                    "scenario": scenario,
                    "phase": phase,
                })
            }

            ScenarioEvent::AttemptFailed {
                scenario,
                phase,
                attempt,
                transient,
            } => {
                serde_json::json!({
                    "event": "attempt_failed",
                    "scenario": scenario,
                    "phase": phase,
                    "attempt": attempt,
                    "transient": transient.is_some(),
                    "reason": transient,
                })
            }

            ScenarioEvent::RetryScheduled {
                scenario,
                phase,
                next_attempt,
                delay,
                reason,
            } => {
                serde_json::json!({
                    "event": "retry_scheduled",
                    "scenario": scenario,
                    "phase": phase,
                    "next_attempt": next_attempt,
                    "delay_secs": delay.as_secs_f64(),
                    "reason": reason,
                })
            }

            ScenarioEvent::AssertionFailed { scenario, failure } => {
                serde_json::json!({
                    "event": "assertion_failed",
                    "scenario": scenario,
                    "output": failure.output,
                    "expectation": failure.expectation,
                    "actual": failure.actual,
                    "message": failure.message,
                    "severity": failure.severity,
                })
            }

            ScenarioEvent::TeardownFailed { scenario, error } => {
                serde_json::json!({
                    "event": "teardown_failed",
                    "scenario": scenario,
                    "error": error,
                })
            }

            ScenarioEvent::Completed { scenario, passed } => {
                serde_json::json!({
                    "event": "complete",
                    "scenario": scenario,
                    "status": if passed { "passed" } else { "failed" },
                })
            }
        };

        self.write_event(json);
    }
}
