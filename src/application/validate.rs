//! Validate Use Case
//!
//! Initializes and statically checks Terraform directories. Nothing is
//! applied, so no variables are passed and nothing needs destroying.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::InvocationSpec;
use crate::domain::ports::{ProvisioningTool, ToolError};

/// Outcome for one directory
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Directory as given, relative to the module root
    pub dir: PathBuf,
    pub error: Option<ToolError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidateReport {
    pub results: Vec<ValidationResult>,
}

impl ValidateReport {
    pub fn is_success(&self) -> bool {
        self.results.iter().all(ValidationResult::is_valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.is_valid())
    }

    pub fn to_json(&self) -> serde_json::Value {
        #[derive(Serialize)]
        struct Entry<'a> {
            dir: String,
            valid: bool,
            command: Option<String>,
            diagnostics: Option<&'a str>,
        }

        let entries: Vec<Entry<'_>> = self
            .results
            .iter()
            .map(|r| Entry {
                dir: r.dir.display().to_string(),
                valid: r.is_valid(),
                command: r.error.as_ref().map(|e| e.command.to_string()),
                diagnostics: r.error.as_ref().map(|e| e.diagnostics.as_str()),
            })
            .collect();

        serde_json::json!({
            "success": self.is_success(),
            "results": entries,
        })
    }
}

pub struct ValidateUseCase<T: ProvisioningTool> {
    tool: T,
}

impl<T: ProvisioningTool> ValidateUseCase<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    /// Validate every directory, continuing past failures
    pub fn execute(&self, module_root: &Path, dirs: &[PathBuf]) -> ValidateReport {
        let results = dirs
            .iter()
            .map(|dir| ValidationResult {
                dir: dir.clone(),
                error: self.validate_one(&module_root.join(dir)).err(),
            })
            .collect();
        ValidateReport { results }
    }

    fn validate_one(&self, dir: &Path) -> Result<(), ToolError> {
        let spec = InvocationSpec::validation_only(dir);
        tracing::info!(tool = self.tool.name(), dir = %dir.display(), "validating");
        self.tool.init(&spec)?;
        self.tool.validate(&spec).inspect_err(|err| {
            tracing::warn!(dir = %dir.display(), "validation failed: {}", err);
        })
    }
}
