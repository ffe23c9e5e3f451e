//! Scenario: the cloud provider is flaky
//!
//! Journey: the first applies hit a known transient error, later ones
//! succeed; a different error is not retried at all.

use std::sync::Arc;
use std::time::Duration;

use hrafnar_verify::application::ApplyError;
use hrafnar_verify::application::ScenarioFailure;
use hrafnar_verify::domain::ports::StaticEnv;
use hrafnar_verify::domain::services::find_scenario;
use hrafnar_verify::domain::value_objects::RetryPolicy;
use hrafnar_verify::{TerraformCli, VerifyOptions, VerifyUseCase};

use crate::common::*;

const TRANSIENT: &str =
    "Error: Error waiting for Creating Service Networking Connection: timeout while waiting";
const PERMANENT: &str = "Error: googleapi: Error 403: Permission denied on resource project";

fn run(fake: &FakeTerraform, sleeper: Arc<NoSleep>) -> hrafnar_verify::ScenarioReport {
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        StaticEnv::new().with("TF_VAR_project_id", "hrafnar-ci"),
        sleeper,
    );
    let options = VerifyOptions::new(fake.module_root())
        .with_retry(RetryPolicy::default().with_delay(Duration::from_secs(30)));
    use_case.execute(&find_scenario("dev").unwrap(), &options)
}

#[test]
fn scenario_transient_errors_are_retried_until_apply_succeeds() {
    let fake = FakeTerraform::new();
    fake.fail_applies(2, TRANSIENT);
    let sleeper = Arc::new(NoSleep::default());

    let report = run(&fake, sleeper.clone());

    assert!(report.is_passed(), "report: {:?}", report);
    assert_eq!(report.apply_attempts, 3);
    assert_eq!(
        *sleeper.waits.lock().unwrap(),
        vec![Duration::from_secs(30), Duration::from_secs(30)]
    );
    assert_eq!(
        fake.calls_in("dev"),
        vec!["init", "apply", "apply", "apply", "output", "destroy"]
    );
}

#[test]
fn scenario_retry_budget_runs_out() {
    let fake = FakeTerraform::new();
    fake.fail_applies(10, TRANSIENT);

    let report = run(&fake, Arc::new(NoSleep::default()));

    assert!(report.is_failed());
    assert_eq!(report.apply_attempts, 4);
    match &report.failure {
        Some(ScenarioFailure::Apply(ApplyError::RetriesExhausted { attempts, last })) => {
            assert_eq!(*attempts, 4);
            assert!(last.diagnostics.contains("Error waiting"));
        }
        other => panic!("unexpected failure: {:?}", other),
    }
    assert_eq!(fake.calls_in("dev").last().map(String::as_str), Some("destroy"));
}

#[test]
fn scenario_unknown_error_fails_at_once() {
    let fake = FakeTerraform::new();
    fake.fail_applies(1, PERMANENT);
    let sleeper = Arc::new(NoSleep::default());

    let report = run(&fake, sleeper.clone());

    assert!(report.is_failed());
    assert_eq!(report.apply_attempts, 1);
    assert!(sleeper.waits.lock().unwrap().is_empty());
    assert!(matches!(
        report.failure,
        Some(ScenarioFailure::Apply(ApplyError::Fatal(_)))
    ));
    assert_eq!(fake.calls_in("dev"), vec!["init", "apply", "destroy"]);
}
