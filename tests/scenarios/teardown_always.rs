//! Scenario: something goes wrong after resources exist
//!
//! Success Criteria:
//! - a failed check still destroys, exactly once
//! - a failed destroy is reported without hiding the check failure
//! - a destroy failure on an otherwise passing run fails the run

use std::sync::Arc;

use hrafnar_verify::application::{ScenarioFailure, TeardownStatus};
use hrafnar_verify::domain::ports::StaticEnv;
use hrafnar_verify::domain::services::find_scenario;
use hrafnar_verify::domain::value_objects::RetryPolicy;
use hrafnar_verify::{ScenarioReport, TerraformCli, VerifyOptions, VerifyUseCase};

use crate::common::*;

const NO_VPC: &str = r#"{
  "hrafner_app_url": {"sensitive": false, "type": "string", "value": "https://x.a.run.app"},
  "vpc_name": {"sensitive": false, "type": "string", "value": ""},
  "database_connection_name": {"sensitive": false, "type": "string", "value": "p1:r:db"}
}"#;

fn run_dev(fake: &FakeTerraform) -> ScenarioReport {
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        StaticEnv::new().with("TF_VAR_project_id", "hrafnar-ci"),
        Arc::new(NoSleep::default()),
    );
    let options = VerifyOptions::new(fake.module_root()).with_retry(RetryPolicy::no_retries());
    use_case.execute(&find_scenario("dev").unwrap(), &options)
}

#[test]
fn scenario_failed_checks_still_destroy_once() {
    let fake = FakeTerraform::new();
    fake.set_outputs(NO_VPC);

    let report = run_dev(&fake);

    assert!(report.is_failed());
    let messages: Vec<String> = report
        .assertion_failures()
        .iter()
        .map(|f| f.message.clone())
        .collect();
    assert!(messages.contains(&"VPC name should not be empty".to_string()));
    assert!(messages.contains(&"VPC name should contain the name prefix".to_string()));
    assert_eq!(report.teardown, TeardownStatus::Succeeded);
    assert_eq!(
        fake.calls_in("dev").iter().filter(|c| *c == "destroy").count(),
        1
    );
}

#[test]
fn scenario_destroy_failure_does_not_hide_check_failures() {
    let fake = FakeTerraform::new();
    fake.set_outputs(NO_VPC);
    fake.fail_destroys();

    let report = run_dev(&fake);

    assert!(matches!(report.failure, Some(ScenarioFailure::Assertions(_))));
    assert!(report.teardown.is_failed());
}

#[test]
fn scenario_destroy_failure_fails_a_passing_run() {
    let fake = FakeTerraform::new();
    fake.fail_destroys();

    let report = run_dev(&fake);

    assert!(report.is_failed());
    match &report.failure {
        Some(ScenarioFailure::Teardown(message)) => {
            assert!(message.contains("resourceInUseByAnotherResource"));
        }
        other => panic!("unexpected failure: {:?}", other),
    }
}
