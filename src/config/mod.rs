//! Configuration module for hrafnar-verify
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (HRAFNAR_VERIFY_*)
//! 3. Project config (`verify.toml` in the module root) or `--config`
//! 4. User config (~/.config/hrafnar-verify/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load, resolve_config_path, with_env_overrides, ConfigWarning, ENV_MAX_RETRIES,
    ENV_RETRY_DELAY, ENV_TERRAFORM_BIN, PROJECT_CONFIG_FILE,
};
pub use types::{Config, RetryConfig, RetryPatternConfig, ScenarioConfig, ToolConfig};
