//! Test environment for running the hrafnar-verify binary.
//!
//! Provides `TestEnv` - a fake terraform, an isolated config directory and
//! helpers to run CLI commands against them.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fake_terraform::FakeTerraform;

/// Result of running a CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub terraform: FakeTerraform,
    /// HOME and XDG_CONFIG_HOME, so no user config leaks in
    home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            terraform: FakeTerraform::new(),
            home_dir: TempDir::new().expect("create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_hrafnar-verify")),
        }
    }

    pub fn write_config(&self, toml: &str) {
        std::fs::write(self.terraform.module_root().join("verify.toml"), toml).unwrap();
    }

    /// Run from the module root with no project id set
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let root = self.terraform.module_root();
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(&root)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("HRAFNAR_VERIFY_TERRAFORM_BIN", self.terraform.binary())
            .env("HRAFNAR_VERIFY_RETRY_DELAY", "0")
            .env_remove("HRAFNAR_VERIFY_MAX_RETRIES")
            .env_remove("HRAFNAR_VERIFY_LOG");
        for (key, _) in std::env::vars() {
            if key.starts_with("TF_VAR_") {
                cmd.env_remove(key);
            }
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute hrafnar-verify");
        to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
