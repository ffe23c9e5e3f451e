//! Verify Use Case
//!
//! Orchestrates one scenario:
//! 1. Gate on environment inputs (skip, nothing runs)
//! 2. Pick a name prefix, layer overrides and build the invocation spec
//! 3. Initialize the working directory
//! 4. Apply, retrying transient failures
//! 5. Read outputs and run checks
//! 6. Destroy, whatever happened after step 3 succeeded
//!
//! The order of destroy relative to everything else is owned by
//! `TeardownGuard`; this file only decides what goes into the report.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::domain::entities::{
    EnvSnapshot, InvocationSpec, OutputSet, Scenario, ScenarioInputs, ScenarioPlan,
};
use crate::domain::ports::{
    EnvSource, NoopEventSink, ProvisioningTool, ScenarioEvent, ScenarioEventSink, ScenarioPhase,
    Sleeper, TokenSource,
};
use crate::domain::services::{gate, run_checks, GateDecision};
use crate::domain::value_objects::NamePrefix;
use crate::error::VerifyResult;

use super::options::VerifyOptions;
use super::result::{ScenarioFailure, ScenarioReport, TeardownStatus};
use super::retry::{run_with_retry, RetryContext};
use super::teardown::TeardownGuard;

/// Verify use case - runs one deployment scenario end-to-end
///
/// Parameterized by its ports so tests can script the tool, hand out fixed
/// tokens and skip the waits between retries.
pub struct VerifyUseCase<T, K, E>
where
    T: ProvisioningTool,
    K: TokenSource,
    E: EnvSource,
{
    tool: T,
    tokens: K,
    env: E,
    sleeper: Arc<dyn Sleeper>,
    events: Arc<dyn ScenarioEventSink>,
}

impl<T, K, E> VerifyUseCase<T, K, E>
where
    T: ProvisioningTool,
    K: TokenSource,
    E: EnvSource,
{
    pub fn new(tool: T, tokens: K, env: E, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            tool,
            tokens,
            env,
            sleeper,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn ScenarioEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Run the scenario with its built-in checks only
    pub fn execute(&self, scenario: &Scenario, options: &VerifyOptions) -> ScenarioReport {
        self.execute_with_body(scenario, options, |_| Ok(()))
    }

    /// Run the scenario, then `body` on the outputs once the built-in
    /// checks have passed.
    ///
    /// `body` may return an error or panic; either way the resources are
    /// destroyed and the report says what happened.
    pub fn execute_with_body<F>(
        &self,
        scenario: &Scenario,
        options: &VerifyOptions,
        body: F,
    ) -> ScenarioReport
    where
        F: FnOnce(&OutputSet) -> Result<(), String>,
    {
        let name = scenario.name();
        let span = tracing::info_span!("scenario", scenario = %name);
        let _entered = span.enter();

        let snapshot = match gate(scenario, &self.env) {
            GateDecision::Proceed(snapshot) => snapshot,
            GateDecision::Skip { missing } => {
                tracing::debug!(missing = ?missing, "skipping, required inputs not set");
                let reason = format!("missing {}", missing.join(", "));
                self.events.on_event(ScenarioEvent::Skipped {
                    scenario: name.clone(),
                    missing,
                });
                return ScenarioReport::skipped(name, reason);
            }
        };

        let mut report = ScenarioReport::new(&name);
        let prefix = NamePrefix::new(scenario.tag(), &self.tokens.next_token());
        let (plan, spec) = match self.build_spec(scenario, snapshot, prefix.clone(), options) {
            Ok(planned) => planned,
            Err(err) => {
                tracing::error!("{}", err);
                report.fail(ScenarioFailure::Overrides(err.to_string()));
                return self.complete(report);
            }
        };

        report.prefix = Some(prefix.to_string());
        tracing::debug!(prefix = %prefix, "starting");
        self.events.on_event(ScenarioEvent::Started {
            scenario: name.clone(),
            prefix: prefix.to_string(),
        });

        self.enter(&name, ScenarioPhase::Initializing);
        if let Err(err) = self.tool.init(&spec) {
            tracing::error!(dir = %spec.dir().display(), "{}", err);
            report.fail(ScenarioFailure::Initialize(err));
            return self.complete(report);
        }

        let guard = TeardownGuard::arm(
            &self.tool,
            &spec,
            &name,
            self.sleeper.as_ref(),
            self.events.as_ref(),
        );

        let armed = catch_unwind(AssertUnwindSafe(|| {
            self.run_armed(&name, &spec, &plan, options, &mut report, body)
        }));
        if let Err(payload) = armed {
            let message = panic_message(payload.as_ref());
            tracing::error!("scenario panicked: {}", message);
            report.fail(ScenarioFailure::Panicked(message));
        }

        report.teardown = guard.release();
        if let TeardownStatus::Failed(err) = &report.teardown {
            report.fail(ScenarioFailure::Teardown(err.clone()));
        }

        self.complete(report)
    }

    /// Plan plus directory, variables and retry policy for one run.
    ///
    /// Variables layer as: scenario defaults, then configured overrides for
    /// the scenario, then command-line overrides. Checks are planned from
    /// the layered variables, so an override of a feature flag or domain
    /// moves the checks with it.
    pub fn build_spec(
        &self,
        scenario: &Scenario,
        env: EnvSnapshot,
        prefix: NamePrefix,
        options: &VerifyOptions,
    ) -> VerifyResult<(ScenarioPlan, InvocationSpec)> {
        let plan = scenario.kind().plan(&ScenarioInputs {
            env,
            prefix,
            overrides: scenario.overrides().clone().layer(&options.overrides),
        })?;
        let spec = InvocationSpec::new(
            options.module_root.join(scenario.dir()),
            plan.variables.clone(),
            options.retry.clone(),
        );
        Ok((plan, spec))
    }

    fn run_armed<F>(
        &self,
        name: &str,
        spec: &InvocationSpec,
        plan: &ScenarioPlan,
        options: &VerifyOptions,
        report: &mut ScenarioReport,
        body: F,
    ) where
        F: FnOnce(&OutputSet) -> Result<(), String>,
    {
        self.enter(name, ScenarioPhase::Applying);
        let ctx = RetryContext {
            scenario: name,
            phase: ScenarioPhase::Applying,
            policy: spec.retry(),
            sleeper: self.sleeper.as_ref(),
            events: self.events.as_ref(),
            abort: &options.abort,
            deadline: options.deadline,
        };
        let (applied, attempts) = run_with_retry(&ctx, || self.tool.apply(spec));
        report.apply_attempts = attempts;
        if let Err(err) = applied {
            tracing::error!(attempts, "{}", err);
            report.fail(ScenarioFailure::Apply(err));
            return;
        }

        self.enter(name, ScenarioPhase::Asserting);
        report.outputs = match self.tool.outputs(spec) {
            Ok(outputs) => outputs,
            Err(err) => {
                tracing::error!("{}", err);
                report.fail(ScenarioFailure::ReadOutputs(err));
                return;
            }
        };

        let checks = run_checks(&plan.checks, &report.outputs);
        for failure in &checks.failures {
            tracing::debug!(output = %failure.output, "{}", failure);
            self.events.on_event(ScenarioEvent::AssertionFailed {
                scenario: name.to_string(),
                failure: failure.clone(),
            });
        }
        if !checks.passed() {
            report.fail(ScenarioFailure::Assertions(checks.failures));
            return;
        }

        if let Err(message) = body(&report.outputs) {
            tracing::warn!("custom checks failed: {}", message);
            report.fail(ScenarioFailure::Body(message));
        }
    }

    fn enter(&self, name: &str, phase: ScenarioPhase) {
        tracing::debug!(%phase, "entering phase");
        self.events.on_event(ScenarioEvent::PhaseEntered {
            scenario: name.to_string(),
            phase,
        });
    }

    fn complete(&self, mut report: ScenarioReport) -> ScenarioReport {
        report.finish();
        self.enter(&report.scenario, ScenarioPhase::Done);
        tracing::debug!(
            passed = report.is_passed(),
            apply_attempts = report.apply_attempts,
            "finished"
        );
        self.events.on_event(ScenarioEvent::Completed {
            scenario: report.scenario.clone(),
            passed: report.is_passed(),
        });
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
