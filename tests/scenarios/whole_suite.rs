//! Scenario: the full suite in one go
//!
//! Journey: CI runs every built-in scenario. dev and prod share the project
//! concurrently; minimal deploys the root module on its own afterwards.

use std::sync::Arc;

use hrafnar_verify::domain::ports::StaticEnv;
use hrafnar_verify::domain::services::builtin_scenarios;
use hrafnar_verify::domain::value_objects::RetryPolicy;
use hrafnar_verify::{run_suite, TerraformCli, VerifyOptions, VerifyUseCase};

use crate::common::*;

#[test]
fn scenario_every_builtin_scenario_passes_against_healthy_outputs() {
    let fake = FakeTerraform::new();
    let use_case = VerifyUseCase::new(
        TerraformCli::new(fake.binary()),
        CountingTokens::default(),
        StaticEnv::new().with("TF_VAR_project_id", "hrafnar-ci"),
        Arc::new(NoSleep::default()),
    );
    let options = VerifyOptions::new(fake.module_root()).with_retry(RetryPolicy::no_retries());

    let report = run_suite(&use_case, &builtin_scenarios(), &options);

    assert!(report.is_success(), "report: {:#?}", report.reports);
    let names: Vec<&str> = report.reports.iter().map(|r| r.scenario.as_str()).collect();
    assert_eq!(names, vec!["dev", "prod", "minimal"]);

    // The serial scenario starts only after both parallel ones tore down
    let calls = fake.calls();
    let first_minimal = calls
        .iter()
        .position(|c| c.starts_with(&fake.root_name()))
        .unwrap();
    let last_parallel = calls
        .iter()
        .rposition(|c| c.starts_with("dev ") || c.starts_with("prod "))
        .unwrap();
    assert!(last_parallel < first_minimal, "calls: {:?}", calls);

    let prefixes: Vec<String> = report
        .reports
        .iter()
        .filter_map(|r| r.prefix.clone())
        .collect();
    assert_eq!(prefixes.len(), 3);
    assert!(prefixes.iter().all(|p| p.starts_with("test-")));
}
