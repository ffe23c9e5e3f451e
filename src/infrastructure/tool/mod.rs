//! Provisioning tool implementations
//!
//! - `TerraformCli` - drives the `terraform` binary as a subprocess

mod terraform;

pub use terraform::{parse_outputs, TerraformCli, DEFAULT_TERRAFORM_BIN};
