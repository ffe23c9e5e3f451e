//! InvocationSpec entity - one provisioning run, fully described
//!
//! Built once per scenario and never mutated afterwards. Every tool command
//! for the scenario (init, apply, output, destroy) reads from the same spec,
//! which is what keeps destroy pointed at exactly what apply created.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{RetryPolicy, Variables};

#[derive(Debug, Clone)]
pub struct InvocationSpec {
    /// Directory holding the Terraform configuration
    dir: PathBuf,
    /// Input variables passed to apply and destroy
    variables: Variables,
    /// Which failures are transient and how often to retry them
    retry: RetryPolicy,
}

impl InvocationSpec {
    pub fn new(dir: impl Into<PathBuf>, variables: Variables, retry: RetryPolicy) -> Self {
        Self {
            dir: dir.into(),
            variables,
            retry,
        }
    }

    /// Spec for syntax-only checks: no variables, no retries
    pub fn validation_only(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, Variables::new(), RetryPolicy::no_retries())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}
