//! Retry loop
//!
//! A failed attempt is retried only when its diagnostics match one of the
//! policy's patterns. Anything else fails on the spot without touching the
//! retry budget. Aborts and deadlines take effect only between attempts.

use std::fmt;
use std::time::Instant;

use thiserror::Error;

use crate::domain::ports::{
    ScenarioEvent, ScenarioEventSink, ScenarioPhase, Sleeper, ToolError,
};
use crate::domain::value_objects::{AbortSignal, RetryPolicy};

/// Why retrying stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    Interrupted,
    DeadlineExceeded,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Interrupted => write!(f, "interrupted"),
            AbortReason::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

/// A retried command that did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// The failure matched no retry pattern
    #[error("{0}")]
    Fatal(ToolError),

    /// Every attempt failed with a transient error
    #[error("gave up after {attempts} attempts; last error: {last}")]
    RetriesExhausted { attempts: u32, last: ToolError },

    /// Stopped at a retry boundary
    #[error("{reason} before attempt {next_attempt}; last error: {last}")]
    Aborted {
        reason: AbortReason,
        next_attempt: u32,
        last: ToolError,
    },
}

impl ApplyError {
    /// The tool error from the final attempt, diagnostics untouched
    pub fn last_error(&self) -> &ToolError {
        match self {
            ApplyError::Fatal(last)
            | ApplyError::RetriesExhausted { last, .. }
            | ApplyError::Aborted { last, .. } => last,
        }
    }
}

/// Everything the loop needs besides the operation itself
pub(crate) struct RetryContext<'a> {
    pub scenario: &'a str,
    pub phase: ScenarioPhase,
    pub policy: &'a RetryPolicy,
    pub sleeper: &'a dyn Sleeper,
    pub events: &'a dyn ScenarioEventSink,
    pub abort: &'a AbortSignal,
    pub deadline: Option<Instant>,
}

/// Run `op` until it succeeds, fails fatally, or the budget runs out.
///
/// Returns the result and the number of attempts made, which is at most
/// `max_retries + 1`.
pub(crate) fn run_with_retry<T, F>(ctx: &RetryContext<'_>, mut op: F) -> (Result<T, ApplyError>, u32)
where
    F: FnMut() -> Result<T, ToolError>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        let err = match op() {
            Ok(value) => return (Ok(value), attempt),
            Err(err) => err,
        };

        let pattern = if err.is_classifiable() {
            ctx.policy.classify(&err.diagnostics)
        } else {
            None
        };

        ctx.events.on_event(ScenarioEvent::AttemptFailed {
            scenario: ctx.scenario.to_string(),
            phase: ctx.phase,
            attempt,
            transient: pattern.map(|p| p.reason().to_string()),
        });

        let Some(pattern) = pattern else {
            return (Err(ApplyError::Fatal(err)), attempt);
        };

        if attempt > ctx.policy.max_retries() {
            return (
                Err(ApplyError::RetriesExhausted {
                    attempts: attempt,
                    last: err,
                }),
                attempt,
            );
        }

        let delay = ctx.policy.time_between_retries();
        let next_attempt = attempt + 1;
        let aborted = |reason| ApplyError::Aborted {
            reason,
            next_attempt,
            last: err.clone(),
        };

        if ctx.abort.is_raised() {
            return (Err(aborted(AbortReason::Interrupted)), attempt);
        }
        if let Some(deadline) = ctx.deadline {
            if Instant::now() + delay >= deadline {
                return (Err(aborted(AbortReason::DeadlineExceeded)), attempt);
            }
        }

        ctx.events.on_event(ScenarioEvent::RetryScheduled {
            scenario: ctx.scenario.to_string(),
            phase: ctx.phase,
            next_attempt,
            delay,
            reason: pattern.reason().to_string(),
        });
        ctx.sleeper.sleep(delay);

        if ctx.abort.is_raised() {
            return (Err(aborted(AbortReason::Interrupted)), attempt);
        }
    }
}
