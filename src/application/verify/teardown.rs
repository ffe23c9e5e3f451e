//! Teardown guard
//!
//! Created only once Initialize has succeeded. From then on destroy runs
//! exactly once: through `release` on the normal path, or from `Drop` if
//! the scenario unwinds past it.

use super::result::TeardownStatus;
use super::retry::{run_with_retry, RetryContext};
use crate::domain::entities::InvocationSpec;
use crate::domain::ports::{
    ProvisioningTool, ScenarioEvent, ScenarioEventSink, ScenarioPhase, Sleeper,
};
use crate::domain::value_objects::AbortSignal;

pub(crate) struct TeardownGuard<'a, T: ProvisioningTool> {
    tool: &'a T,
    spec: &'a InvocationSpec,
    scenario: &'a str,
    sleeper: &'a dyn Sleeper,
    events: &'a dyn ScenarioEventSink,
    armed: bool,
}

impl<'a, T: ProvisioningTool> TeardownGuard<'a, T> {
    pub fn arm(
        tool: &'a T,
        spec: &'a InvocationSpec,
        scenario: &'a str,
        sleeper: &'a dyn Sleeper,
        events: &'a dyn ScenarioEventSink,
    ) -> Self {
        Self {
            tool,
            spec,
            scenario,
            sleeper,
            events,
            armed: true,
        }
    }

    /// Destroy now and report how it went
    pub fn release(mut self) -> TeardownStatus {
        self.teardown()
    }

    fn teardown(&mut self) -> TeardownStatus {
        if !self.armed {
            return TeardownStatus::NotRequired;
        }
        self.armed = false;

        self.events.on_event(ScenarioEvent::PhaseEntered {
            scenario: self.scenario.to_string(),
            phase: ScenarioPhase::Destroying,
        });

        // Cleanup ignores interrupts and deadlines; only the retry budget limits it
        let never = AbortSignal::new();
        let ctx = RetryContext {
            scenario: self.scenario,
            phase: ScenarioPhase::Destroying,
            policy: self.spec.retry(),
            sleeper: self.sleeper,
            events: self.events,
            abort: &never,
            deadline: None,
        };
        let (result, attempts) = run_with_retry(&ctx, || self.tool.destroy(self.spec));

        match result {
            Ok(()) => {
                tracing::debug!(scenario = self.scenario, attempts, "resources destroyed");
                TeardownStatus::Succeeded
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    scenario = self.scenario,
                    dir = %self.spec.dir().display(),
                    "destroy failed, resources may be left behind: {}",
                    message
                );
                self.events.on_event(ScenarioEvent::TeardownFailed {
                    scenario: self.scenario.to_string(),
                    error: message.clone(),
                });
                TeardownStatus::Failed(message)
            }
        }
    }
}

impl<T: ProvisioningTool> Drop for TeardownGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if std::thread::panicking() {
            tracing::warn!(scenario = self.scenario, "unwinding, destroying resources");
        }
        self.teardown();
    }
}
