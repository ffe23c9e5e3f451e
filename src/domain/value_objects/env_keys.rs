//! Environment input names consumed by the built-in scenarios.
//!
//! They follow Terraform's `TF_VAR_<name>` convention so the same shell
//! environment also works for running `terraform` by hand.

pub const PROJECT_ID: &str = "TF_VAR_project_id";
pub const APP_IMAGE: &str = "TF_VAR_app_image";
pub const CLOUDFLARE_API_TOKEN: &str = "TF_VAR_cloudflare_api_token";
pub const CLOUDFLARE_ZONE_ID: &str = "TF_VAR_cloudflare_zone_id";
pub const BASE_DOMAIN: &str = "TF_VAR_base_domain";
pub const OPENAI_API_KEY: &str = "TF_VAR_openai_api_key";
pub const ANTHROPIC_API_KEY: &str = "TF_VAR_anthropic_api_key";

/// All three must be present for Cloudflare DNS to be enabled
pub const CLOUDFLARE: [&str; 3] = [CLOUDFLARE_API_TOKEN, CLOUDFLARE_ZONE_ID, BASE_DOMAIN];
