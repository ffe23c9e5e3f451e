//! Terraform CLI
//!
//! Implements the ProvisioningTool port by running `terraform` in the
//! scenario directory. Variables go through a temporary `.tfvars.json`
//! file so nested maps survive without shell quoting.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::domain::entities::{InvocationSpec, OutputSet};
use crate::domain::ports::{ProvisioningTool, ToolCommand, ToolError};
use crate::domain::value_objects::Variables;

pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";

pub struct TerraformCli {
    binary: PathBuf,
}

impl TerraformCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, dir: &Path, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .arg("-no-color")
            .current_dir(dir)
            .env("TF_IN_AUTOMATION", "1")
            .env("TF_INPUT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run one subcommand; a non-zero exit becomes a `ToolError` carrying
    /// stdout followed by stderr.
    fn run(&self, which: ToolCommand, spec: &InvocationSpec, args: &[&str]) -> Result<Output, ToolError> {
        let mut args: Vec<OsString> = args.iter().map(OsString::from).collect();

        // Must outlive the child process
        let var_file = if matches!(which, ToolCommand::Apply | ToolCommand::Destroy) {
            write_var_file(spec.variables()).map_err(|e| ToolError::spawn(which, &e))?
        } else {
            None
        };
        if let Some(file) = &var_file {
            let mut flag = OsString::from("-var-file=");
            flag.push(file.path());
            args.push(flag);
        }

        tracing::debug!(
            binary = %self.binary.display(),
            dir = %spec.dir().display(),
            args = ?args,
            "running terraform"
        );

        let output = self
            .command(spec.dir(), &args)
            .output()
            .map_err(|e| ToolError::spawn(which, &e))?;

        if output.status.success() {
            return Ok(output);
        }

        let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(ToolError::exit(which, output.status.code(), diagnostics))
    }
}

impl Default for TerraformCli {
    fn default() -> Self {
        Self::new(DEFAULT_TERRAFORM_BIN)
    }
}

impl ProvisioningTool for TerraformCli {
    fn name(&self) -> &str {
        "terraform"
    }

    fn init(&self, spec: &InvocationSpec) -> Result<(), ToolError> {
        self.run(ToolCommand::Init, spec, &["init", "-input=false"])
            .map(drop)
    }

    fn validate(&self, spec: &InvocationSpec) -> Result<(), ToolError> {
        self.run(ToolCommand::Validate, spec, &["validate"]).map(drop)
    }

    fn apply(&self, spec: &InvocationSpec) -> Result<(), ToolError> {
        self.run(
            ToolCommand::Apply,
            spec,
            &["apply", "-input=false", "-auto-approve", "-lock=false"],
        )
        .map(drop)
    }

    fn outputs(&self, spec: &InvocationSpec) -> Result<OutputSet, ToolError> {
        let output = self.run(ToolCommand::Output, spec, &["output", "-json"])?;
        parse_outputs(&String::from_utf8_lossy(&output.stdout))
            .map_err(|message| ToolError::invalid_output(ToolCommand::Output, message))
    }

    fn destroy(&self, spec: &InvocationSpec) -> Result<(), ToolError> {
        self.run(
            ToolCommand::Destroy,
            spec,
            &["destroy", "-input=false", "-auto-approve"],
        )
        .map(drop)
    }
}

fn write_var_file(variables: &Variables) -> std::io::Result<Option<NamedTempFile>> {
    if variables.is_empty() {
        return Ok(None);
    }
    let mut file = tempfile::Builder::new()
        .prefix("hrafnar-verify-")
        .suffix(".tfvars.json")
        .tempfile()?;
    serde_json::to_writer(&mut file, variables)?;
    file.flush()?;
    Ok(Some(file))
}

#[derive(Deserialize)]
struct RawOutput {
    #[serde(default)]
    value: serde_json::Value,
}

/// Parse `terraform output -json`.
///
/// Strings are taken verbatim, null becomes `""` and anything else is kept
/// as compact JSON text.
pub fn parse_outputs(json: &str) -> Result<OutputSet, String> {
    if json.trim().is_empty() {
        return Ok(OutputSet::new());
    }
    let raw: BTreeMap<String, RawOutput> =
        serde_json::from_str(json).map_err(|e| format!("invalid output JSON: {}", e))?;
    Ok(raw
        .into_iter()
        .map(|(name, output)| {
            let value = match output.value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (name, value)
        })
        .collect())
}
