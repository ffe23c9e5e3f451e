//! hrafnar-verify - deployment verifier for the Hrafnar Terraform modules
//!
//! Deploys each scenario into a real cloud project under a unique name
//! prefix, checks the outputs Terraform reports, and always destroys what it
//! created. Transient provider errors are retried according to a
//! configurable pattern list.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    run_suite, ScenarioReport, SuiteReport, ValidateUseCase, VerifyOptions, VerifyUseCase,
};
pub use config::Config;
pub use domain::entities::{OutputSet, Scenario};
pub use domain::ports::{ProvisioningTool, ToolError};
pub use error::{VerifyError, VerifyResult};
pub use infrastructure::TerraformCli;
