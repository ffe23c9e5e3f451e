//! Built-in scenario catalog
//!
//! Three deployments of the Hrafnar module against a real GCP project, plus
//! the directories that only get a syntax check. Variables come from the
//! scenario's environment snapshot and name prefix with overrides layered
//! on top; conditional checks read the layered variables.

use std::path::PathBuf;

use crate::domain::entities::{
    OutputCheck, Scenario, ScenarioInputs, ScenarioKind, ScenarioPlan,
};
use crate::domain::value_objects::{env_keys, VarValue, Variables};
use crate::error::{VerifyError, VerifyResult};

/// Output names published by the Hrafnar module
pub mod outputs {
    pub const APP_URL: &str = "hrafner_app_url";
    pub const VPC_NAME: &str = "vpc_name";
    pub const DATABASE_CONNECTION_NAME: &str = "database_connection_name";
    pub const REACT_FRONTEND_URL: &str = "react_frontend_url";
    pub const API_DOMAIN: &str = "api_domain";
    pub const UI_DOMAIN: &str = "ui_domain";
}

pub const DEFAULT_APP_IMAGE: &str = "gcr.io/cloudrun/hello";
pub const TEST_OPENAI_KEY: &str = "sk-test-key-for-integration-testing";
pub const TEST_ANTHROPIC_KEY: &str = "sk-ant-REDACTED";

/// Managed-compute URL suffix every app URL must carry
pub const CLOUD_RUN_SUFFIX: &str = "run.app";

/// The built-in deployment scenarios, parallel ones first
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(ScenarioKind::Dev, "dev", "examples/dev")
            .requires(&[env_keys::PROJECT_ID])
            .reads(&[env_keys::APP_IMAGE, env_keys::OPENAI_API_KEY]),
        Scenario::new(ScenarioKind::Prod, "prod", "examples/prod")
            .requires(&[env_keys::PROJECT_ID])
            .reads(&[
                env_keys::APP_IMAGE,
                env_keys::OPENAI_API_KEY,
                env_keys::ANTHROPIC_API_KEY,
            ])
            .reads(&env_keys::CLOUDFLARE),
        // Shares naming and quota with everything else in the project
        Scenario::new(ScenarioKind::Minimal, "min", ".")
            .serial()
            .requires(&[env_keys::PROJECT_ID])
            .reads(&[env_keys::APP_IMAGE]),
    ]
}

/// Look up a built-in scenario by name
pub fn find_scenario(name: &str) -> VerifyResult<Scenario> {
    let scenarios = builtin_scenarios();
    let known = scenarios
        .iter()
        .map(Scenario::name)
        .collect::<Vec<_>>()
        .join(", ");
    scenarios
        .into_iter()
        .find(|s| s.name() == name)
        .ok_or_else(|| VerifyError::UnknownScenario {
            name: name.to_string(),
            known,
        })
}

/// Directories checked by `validate` when none are given
pub fn validation_targets() -> Vec<PathBuf> {
    vec![
        PathBuf::from("."),
        PathBuf::from("examples/dev"),
        PathBuf::from("examples/prod"),
    ]
}

impl ScenarioKind {
    /// Variables and checks for one run of this scenario
    ///
    /// Fails when the overrides touch a variable the verifier owns.
    pub fn plan(&self, inputs: &ScenarioInputs) -> VerifyResult<ScenarioPlan> {
        inputs.overrides.ensure_overridable()?;
        Ok(match self {
            ScenarioKind::Dev => plan_dev(inputs),
            ScenarioKind::Prod => plan_prod(inputs),
            ScenarioKind::Minimal => plan_minimal(inputs),
        })
    }
}

fn flag(variables: &Variables, name: &str) -> bool {
    variables
        .get(name)
        .and_then(VarValue::as_bool)
        .unwrap_or(false)
}

fn text(variables: &Variables, name: &str) -> String {
    variables
        .get(name)
        .and_then(VarValue::as_str)
        .unwrap_or_default()
        .to_string()
}

fn base_variables(inputs: &ScenarioInputs) -> Variables {
    let env = &inputs.env;
    Variables::new()
        .with("project_id", env.get_or_empty(env_keys::PROJECT_ID))
        .with("name_prefix", inputs.prefix.to_string())
        .with("app_image", env.get_or(env_keys::APP_IMAGE, DEFAULT_APP_IMAGE))
}

fn core_checks(inputs: &ScenarioInputs, require_url: bool) -> Vec<OutputCheck> {
    let url = OutputCheck::non_empty(outputs::APP_URL, "Hrafner app URL should not be empty");
    vec![
        if require_url { url.required() } else { url },
        OutputCheck::contains(
            outputs::APP_URL,
            CLOUD_RUN_SUFFIX,
            "URL should be a Cloud Run URL",
        ),
        OutputCheck::non_empty(outputs::VPC_NAME, "VPC name should not be empty"),
        OutputCheck::contains(
            outputs::VPC_NAME,
            inputs.prefix.as_str(),
            "VPC name should contain the name prefix",
        ),
        OutputCheck::non_empty(
            outputs::DATABASE_CONNECTION_NAME,
            "Database connection name should not be empty",
        ),
    ]
}

fn plan_dev(inputs: &ScenarioInputs) -> ScenarioPlan {
    let env = &inputs.env;
    let variables = base_variables(inputs)
        .with(
            "ai_api_keys",
            VarValue::string_map([(
                "OPENAI_API_KEY",
                env.get_or(env_keys::OPENAI_API_KEY, TEST_OPENAI_KEY),
            )]),
        )
        .layer(&inputs.overrides);
    ScenarioPlan {
        variables,
        checks: core_checks(inputs, false),
    }
}

fn plan_prod(inputs: &ScenarioInputs) -> ScenarioPlan {
    let env = &inputs.env;
    let variables = base_variables(inputs)
        .with("enable_react_frontend", false)
        .with(
            "enable_cloudflare_dns",
            env.all_present(&env_keys::CLOUDFLARE),
        )
        .with(
            "cloudflare_api_token",
            env.get_or_empty(env_keys::CLOUDFLARE_API_TOKEN),
        )
        .with(
            "cloudflare_zone_id",
            env.get_or_empty(env_keys::CLOUDFLARE_ZONE_ID),
        )
        .with("base_domain", env.get_or_empty(env_keys::BASE_DOMAIN))
        .with(
            "ai_api_keys",
            VarValue::string_map([
                (
                    "OPENAI_API_KEY",
                    env.get_or(env_keys::OPENAI_API_KEY, TEST_OPENAI_KEY),
                ),
                (
                    "ANTHROPIC_API_KEY",
                    env.get_or(env_keys::ANTHROPIC_API_KEY, TEST_ANTHROPIC_KEY),
                ),
            ]),
        )
        .layer(&inputs.overrides);

    let base_domain = text(&variables, "base_domain");
    let mut checks = core_checks(inputs, true);
    if flag(&variables, "enable_cloudflare_dns") {
        checks.extend([
            OutputCheck::non_empty(
                outputs::API_DOMAIN,
                "API domain should not be empty when Cloudflare is enabled",
            ),
            OutputCheck::contains(
                outputs::API_DOMAIN,
                base_domain.clone(),
                "API domain should contain the base domain",
            ),
            OutputCheck::non_empty(
                outputs::UI_DOMAIN,
                "UI domain should not be empty when Cloudflare is enabled",
            ),
            OutputCheck::contains(
                outputs::UI_DOMAIN,
                base_domain,
                "UI domain should contain the base domain",
            ),
        ]);
    }

    ScenarioPlan { variables, checks }
}

fn plan_minimal(inputs: &ScenarioInputs) -> ScenarioPlan {
    // No AI keys, no Cloudflare, no React; smallest database tier
    let variables = base_variables(inputs)
        .with("enable_cloudflare_dns", false)
        .with("enable_react_frontend", false)
        .with("enable_htmx_frontend", true)
        .with("database_tier", "db-f1-micro")
        .with("database_disk_size", 10i64)
        .with("app_min_instances", 0i64)
        .with("app_max_instances", 2i64)
        .layer(&inputs.overrides);

    let mut checks = vec![
        OutputCheck::non_empty(outputs::APP_URL, "Hrafner app URL should not be empty").required(),
        OutputCheck::contains(
            outputs::APP_URL,
            CLOUD_RUN_SUFFIX,
            "URL should be a Cloud Run URL",
        ),
    ];
    if !flag(&variables, "enable_react_frontend") {
        checks.push(OutputCheck::empty(
            outputs::REACT_FRONTEND_URL,
            "React frontend URL should be empty when not enabled",
        ));
    }
    if !flag(&variables, "enable_cloudflare_dns") {
        checks.push(OutputCheck::empty(
            outputs::API_DOMAIN,
            "API domain should be empty when Cloudflare is not enabled",
        ));
    }

    ScenarioPlan { variables, checks }
}
