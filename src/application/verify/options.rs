//! Verify Options

use std::path::PathBuf;
use std::time::Instant;

use crate::domain::value_objects::{AbortSignal, RetryPolicy, Variables};

#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Directory the scenario directories are relative to
    pub module_root: PathBuf,
    /// Command-line variable overrides, applied last
    pub overrides: Variables,
    /// Retry policy for apply and destroy
    pub retry: RetryPolicy,
    /// Raised to stop at the next retry boundary
    pub abort: AbortSignal,
    /// No new attempt is scheduled past this instant
    pub deadline: Option<Instant>,
}

impl VerifyOptions {
    pub fn new(module_root: impl Into<PathBuf>) -> Self {
        Self {
            module_root: module_root.into(),
            overrides: Variables::new(),
            retry: RetryPolicy::default(),
            abort: AbortSignal::new(),
            deadline: None,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_overrides(mut self, overrides: Variables) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_abort(mut self, abort: AbortSignal) -> Self {
        self.abort = abort;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}
