//! Scenario: a healthy dev deployment
//!
//! Journey: CI sets a project id and runs the dev scenario.
//!
//! Success Criteria:
//! - init, apply, output, destroy run in the scenario directory, in order
//! - apply and destroy get identical variables
//! - the name prefix is `test-dev-<token>` and shows up in the outputs
//! - overrides cannot replace the name prefix, and checks follow overridden
//!   feature flags

use std::sync::Arc;

use hrafnar_verify::domain::ports::{ScenarioEvent, ScenarioPhase, StaticEnv};
use hrafnar_verify::domain::services::find_scenario;
use hrafnar_verify::domain::value_objects::{RetryPolicy, VarValue, Variables};
use hrafnar_verify::{TerraformCli, VerifyOptions, VerifyUseCase};

use crate::common::*;

fn project_env() -> StaticEnv {
    StaticEnv::new().with("TF_VAR_project_id", "hrafnar-ci")
}

#[test]
fn scenario_dev_deploys_checks_and_destroys() {
    let fake = FakeTerraform::new();
    let events = EventLog::shared();
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        project_env(),
        Arc::new(NoSleep::default()),
    )
    .with_events(events.clone());
    let scenario = find_scenario("dev").unwrap();

    let report = use_case.execute(&scenario, &VerifyOptions::new(fake.module_root()));

    assert!(report.is_passed(), "report: {:?}", report);
    assert_eq!(report.prefix.as_deref(), Some("test-dev-tok000"));
    assert_eq!(report.apply_attempts, 1);
    assert_eq!(
        report.outputs.read("vpc_name"),
        "test-dev-tok000-vpc"
    );

    assert_eq!(
        fake.calls_in("dev"),
        vec!["init", "apply", "output", "destroy"]
    );

    let var_files = fake.var_files();
    assert_eq!(var_files.len(), 2, "apply and destroy each get a var file");
    assert_eq!(var_files[0], var_files[1]);
    assert_eq!(var_files[0]["project_id"], "hrafnar-ci");
    assert_eq!(var_files[0]["name_prefix"], "test-dev-tok000");
    assert_eq!(var_files[0]["app_image"], "gcr.io/cloudrun/hello");
    assert_eq!(
        var_files[0]["ai_api_keys"]["OPENAI_API_KEY"],
        "sk-test-key-for-integration-testing"
    );

    let phases: Vec<ScenarioPhase> = events
        .events()
        .into_iter()
        .filter_map(|event| match event {
            ScenarioEvent::PhaseEntered { phase, .. } => Some(phase),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            ScenarioPhase::Initializing,
            ScenarioPhase::Applying,
            ScenarioPhase::Asserting,
            ScenarioPhase::Destroying,
            ScenarioPhase::Done,
        ]
    );
}

#[test]
fn scenario_missing_project_id_never_touches_terraform() {
    let fake = FakeTerraform::new();
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        StaticEnv::new(),
        Arc::new(NoSleep::default()),
    );
    let scenario = find_scenario("prod").unwrap();

    let report = use_case.execute(&scenario, &VerifyOptions::new(fake.module_root()));

    assert!(report.is_skipped());
    assert!(fake.calls().is_empty());
}

#[test]
fn scenario_overrides_reach_the_var_file() {
    let fake = FakeTerraform::new();
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        project_env(),
        Arc::new(NoSleep::default()),
    );
    let scenario = find_scenario("dev")
        .unwrap()
        .with_overrides(&Variables::new().with("database_tier", "db-custom-1"));
    let options = VerifyOptions::new(fake.module_root())
        .with_retry(RetryPolicy::no_retries())
        .with_overrides(Variables::new().with("database_tier", VarValue::from("db-custom-2")));

    let report = use_case.execute(&scenario, &options);

    assert!(report.is_passed(), "report: {:?}", report);
    assert_eq!(fake.var_files()[0]["database_tier"], "db-custom-2");
}

#[test]
fn scenario_body_sees_real_outputs() {
    let fake = FakeTerraform::new();
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        project_env(),
        Arc::new(NoSleep::default()),
    );
    let scenario = find_scenario("dev").unwrap();

    let report = use_case.execute_with_body(
        &scenario,
        &VerifyOptions::new(fake.module_root()),
        |outputs| {
            if outputs.read("database_connection_name").ends_with("-db") {
                Ok(())
            } else {
                Err("unexpected connection name".to_string())
            }
        },
    );

    assert!(report.is_passed(), "report: {:?}", report);
}

#[test]
fn scenario_name_prefix_override_is_refused_before_terraform() {
    let fake = FakeTerraform::new();
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        project_env(),
        Arc::new(NoSleep::default()),
    );
    let scenario = find_scenario("dev")
        .unwrap()
        .with_overrides(&Variables::new().with("name_prefix", "ci-shared"));

    let report = use_case.execute(&scenario, &VerifyOptions::new(fake.module_root()));

    assert!(report.is_failed(), "report: {:?}", report);
    assert_eq!(report.prefix, None);
    let message = report.failure.as_ref().unwrap().to_string();
    assert!(message.contains("'name_prefix'"), "{}", message);
    assert!(fake.calls().is_empty());
}

#[test]
fn scenario_checks_follow_overridden_cloudflare_flag() {
    let fake = FakeTerraform::new();
    let env = project_env()
        .with("TF_VAR_cloudflare_api_token", "cf-token")
        .with("TF_VAR_cloudflare_zone_id", "zone")
        .with("TF_VAR_base_domain", "test.example.com");
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        env,
        Arc::new(NoSleep::default()),
    );
    let options = VerifyOptions::new(fake.module_root())
        .with_overrides(Variables::new().with("enable_cloudflare_dns", false));

    let report = use_case.execute(&find_scenario("prod").unwrap(), &options);

    assert!(report.is_passed(), "report: {:?}", report);
    assert_eq!(report.prefix.as_deref(), Some("test-prod-tok000"));
    assert_eq!(fake.var_files()[0]["enable_cloudflare_dns"], false);
    assert_eq!(
        fake.calls_in("prod"),
        vec!["init", "apply", "output", "destroy"]
    );
}
