//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{ScenarioReport, ValidateUseCase, VerifyUseCase};
use crate::config::Config;
use crate::domain::entities::Scenario;
use crate::domain::ports::ScenarioEventSink;
use crate::domain::services::{builtin_scenarios, find_scenario};
use crate::error::VerifyResult;
use crate::infrastructure::{
    JsonEventSink, ProcessEnv, RandomTokenSource, TerraformCli, ThreadSleeper, TracingEventSink,
};

/// Type alias for the concrete VerifyUseCase with all dependencies
pub type ConcreteVerifyUseCase = VerifyUseCase<TerraformCli, RandomTokenSource, ProcessEnv>;

/// Type alias for the concrete ValidateUseCase
pub type ConcreteValidateUseCase = ValidateUseCase<TerraformCli>;

/// Skip reason for scenarios turned off in the config file
pub const DISABLED_REASON: &str = "disabled in configuration";

/// Create a verify use case with all dependencies wired up
///
/// With `json` set, scenario events stream to stdout as NDJSON; otherwise
/// they go to the log.
pub fn create_verify_use_case(config: &Config, json: bool) -> ConcreteVerifyUseCase {
    let events: Arc<dyn ScenarioEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink)
    };

    VerifyUseCase::new(
        TerraformCli::new(config.terraform_binary()),
        RandomTokenSource,
        ProcessEnv,
        Arc::new(ThreadSleeper),
    )
    .with_events(events)
}

/// Create a validate use case
pub fn create_validate_use_case(config: &Config) -> ConcreteValidateUseCase {
    ValidateUseCase::new(TerraformCli::new(config.terraform_binary()))
}

/// Scenarios selected for a run
#[derive(Debug, Default)]
pub struct Selection {
    /// Scenarios to execute, config overrides attached
    pub scenarios: Vec<Scenario>,
    /// Reports for scenarios the config turned off
    pub disabled: Vec<ScenarioReport>,
}

/// Resolve scenario names against the catalog.
///
/// No names means every built-in scenario; disabled ones are reported as
/// skipped. Naming a scenario explicitly runs it even when disabled.
/// Configured overrides of reserved variables are rejected.
pub fn select_scenarios(config: &Config, names: &[String]) -> VerifyResult<Selection> {
    let mut selection = Selection::default();

    if names.is_empty() {
        for scenario in builtin_scenarios() {
            let name = scenario.name();
            if config.scenario_enabled(&name) {
                let overrides = config.scenario_overrides(&name);
                overrides.ensure_overridable()?;
                selection.scenarios.push(scenario.with_overrides(&overrides));
            } else {
                selection
                    .disabled
                    .push(ScenarioReport::skipped(name, DISABLED_REASON));
            }
        }
        return Ok(selection);
    }

    for name in names {
        let scenario = find_scenario(name)?;
        if selection.scenarios.iter().any(|s| s.name() == *name) {
            continue;
        }
        let overrides = config.scenario_overrides(name);
        overrides.ensure_overridable()?;
        selection.scenarios.push(scenario.with_overrides(&overrides));
    }
    Ok(selection)
}
