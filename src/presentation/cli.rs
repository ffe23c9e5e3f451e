//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --config, --module-root) are inherited
//! by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::{VarValue, Variables};

/// hrafnar-verify - deploy, check and destroy the Hrafnar Terraform modules
#[derive(Parser, Debug)]
#[command(name = "hrafnar-verify")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Scenarios that need TF_VAR_project_id are skipped when it is not set.")]
pub struct Cli {
    /// Output format for CI (NDJSON events, then a JSON report)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: verify.toml in the module root)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the root module and examples/
    #[arg(long, global = true, value_name = "DIR")]
    pub module_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy scenarios, check their outputs and destroy them
    Run {
        /// Scenarios to run (default: every enabled scenario)
        scenarios: Vec<String>,

        /// Variable override applied to every scenario (repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
        vars: Vec<(String, VarValue)>,

        /// Retries for transient apply/destroy failures
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,

        /// Seconds between retries
        #[arg(long, value_name = "SECS")]
        retry_delay: Option<u64>,

        /// Stop scheduling retries after this many seconds
        #[arg(long, value_name = "SECS")]
        deadline: Option<u64>,
    },

    /// Initialize and validate configurations without creating resources
    Validate {
        /// Directories relative to the module root (default: root and examples)
        dirs: Vec<PathBuf>,
    },

    /// List built-in scenarios and whether they can run here
    Scenarios,
}

fn parse_var(raw: &str) -> Result<(String, VarValue), String> {
    Variables::parse_assignment(raw)
}
