//! Provisioning Tool Port
//!
//! Abstracts the external declarative-infrastructure tool (Terraform).
//! Every command works on the directory and variables of one
//! `InvocationSpec`; the tool itself keeps whatever state it needs there.

use std::fmt;

use thiserror::Error;

use crate::domain::entities::{InvocationSpec, OutputSet};

/// Tool command that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCommand {
    Init,
    Validate,
    Apply,
    Output,
    Destroy,
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolCommand::Init => "init",
            ToolCommand::Validate => "validate",
            ToolCommand::Apply => "apply",
            ToolCommand::Output => "output",
            ToolCommand::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// How the command failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// The process could not be started
    Spawn,
    /// The process exited unsuccessfully (`None` when killed by a signal)
    Exit(Option<i32>),
    /// The process succeeded but printed something unparseable
    InvalidOutput,
}

impl fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolErrorKind::Spawn => write!(f, "could not start"),
            ToolErrorKind::Exit(Some(code)) => write!(f, "exit code {}", code),
            ToolErrorKind::Exit(None) => write!(f, "terminated by signal"),
            ToolErrorKind::InvalidOutput => write!(f, "unreadable output"),
        }
    }
}

/// A failed tool command.
///
/// `diagnostics` is the tool's stdout and stderr exactly as printed. Retry
/// classification searches it, so it is never trimmed or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{command} failed ({kind}):\n{diagnostics}")]
pub struct ToolError {
    pub command: ToolCommand,
    pub kind: ToolErrorKind,
    pub diagnostics: String,
}

impl ToolError {
    pub fn exit(command: ToolCommand, code: Option<i32>, diagnostics: impl Into<String>) -> Self {
        Self {
            command,
            kind: ToolErrorKind::Exit(code),
            diagnostics: diagnostics.into(),
        }
    }

    pub fn spawn(command: ToolCommand, err: &std::io::Error) -> Self {
        Self {
            command,
            kind: ToolErrorKind::Spawn,
            diagnostics: err.to_string(),
        }
    }

    pub fn invalid_output(command: ToolCommand, message: impl Into<String>) -> Self {
        Self {
            command,
            kind: ToolErrorKind::InvalidOutput,
            diagnostics: message.into(),
        }
    }

    /// Only a tool that ran and reported a failure can be transient
    pub fn is_classifiable(&self) -> bool {
        matches!(self.kind, ToolErrorKind::Exit(_))
    }
}

/// Trait for provisioning tools
///
/// Implementations:
/// - `TerraformCli` - runs the `terraform` binary as a subprocess
/// - test fakes that script results per command
pub trait ProvisioningTool: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Prepare the working directory. Idempotent; changes no resources.
    fn init(&self, spec: &InvocationSpec) -> Result<(), ToolError>;

    /// Static configuration check. Needs no variables; changes no resources.
    fn validate(&self, spec: &InvocationSpec) -> Result<(), ToolError>;

    /// Create or update resources using the spec's variables
    fn apply(&self, spec: &InvocationSpec) -> Result<(), ToolError>;

    /// Read every output of the current state. Unset outputs are absent.
    fn outputs(&self, spec: &InvocationSpec) -> Result<OutputSet, ToolError>;

    /// Remove everything a prior apply in the same directory created
    fn destroy(&self, spec: &InvocationSpec) -> Result<(), ToolError>;
}
