//! Suite runner
//!
//! Parallel scenarios all start together, each on its own thread. Serial
//! scenarios run afterwards, one at a time. Once the abort signal is
//! raised, scenarios that have not started yet are reported as skipped.

use std::thread;

use chrono::{DateTime, Utc};

use super::verify::{ScenarioFailure, ScenarioReport, VerifyOptions, VerifyUseCase};
use crate::domain::entities::{Concurrency, Scenario};
use crate::domain::ports::{EnvSource, ProvisioningTool, TokenSource};

pub const ABORTED_REASON: &str = "aborted";

#[derive(Debug, Clone)]
pub struct SuiteReport {
    /// One report per scenario, in the order the scenarios were given
    pub reports: Vec<ScenarioReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().filter(|r| r.is_skipped()).count()
    }

    /// No scenario failed. Skipped scenarios do not count against the run.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Add a report for a scenario that was never handed to the runner
    pub fn push(&mut self, report: ScenarioReport) {
        self.reports.push(report);
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": self.is_success(),
            "passed": self.passed(),
            "failed": self.failed(),
            "skipped": self.skipped(),
            "started_at": self.started_at.to_rfc3339(),
            "finished_at": self.finished_at.to_rfc3339(),
            "scenarios": self.reports.iter().map(ScenarioReport::to_json).collect::<Vec<_>>(),
        })
    }
}

/// Run `scenarios`, parallel ones concurrently, then serial ones in order
pub fn run_suite<T, K, E>(
    use_case: &VerifyUseCase<T, K, E>,
    scenarios: &[Scenario],
    options: &VerifyOptions,
) -> SuiteReport
where
    T: ProvisioningTool,
    K: TokenSource,
    E: EnvSource,
{
    let started_at = Utc::now();
    let mut slots: Vec<Option<ScenarioReport>> = vec![None; scenarios.len()];

    let parallel: Vec<usize> = indices(scenarios, Concurrency::Parallel);
    tracing::info!(count = parallel.len(), "starting parallel scenarios");
    thread::scope(|scope| {
        let handles: Vec<_> = parallel
            .iter()
            .map(|&i| {
                let scenario = &scenarios[i];
                let handle = scope.spawn(move || run_one(use_case, scenario, options));
                (i, handle)
            })
            .collect();

        for (i, handle) in handles {
            let report = handle.join().unwrap_or_else(|_| {
                let mut report = ScenarioReport::new(scenarios[i].name());
                report.fail(ScenarioFailure::Panicked(
                    "scenario thread panicked".to_string(),
                ));
                report.finish();
                report
            });
            slots[i] = Some(report);
        }
    });

    for i in indices(scenarios, Concurrency::Serial) {
        slots[i] = Some(run_one(use_case, &scenarios[i], options));
    }

    SuiteReport {
        reports: slots.into_iter().flatten().collect(),
        started_at,
        finished_at: Utc::now(),
    }
}

fn indices(scenarios: &[Scenario], concurrency: Concurrency) -> Vec<usize> {
    scenarios
        .iter()
        .enumerate()
        .filter(|(_, s)| s.concurrency() == concurrency)
        .map(|(i, _)| i)
        .collect()
}

fn run_one<T, K, E>(
    use_case: &VerifyUseCase<T, K, E>,
    scenario: &Scenario,
    options: &VerifyOptions,
) -> ScenarioReport
where
    T: ProvisioningTool,
    K: TokenSource,
    E: EnvSource,
{
    if options.abort.is_raised() {
        tracing::info!(scenario = %scenario.name(), "not starting, run was aborted");
        return ScenarioReport::skipped(scenario.name(), ABORTED_REASON);
    }
    use_case.execute(scenario, options)
}
