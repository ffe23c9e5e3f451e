//! Retry Policy Value Object
//!
//! Decides whether a failed tool invocation is worth another attempt.
//! Classification is a regular-expression search over the tool's raw
//! diagnostic text; there is no structured error code to go on.

use std::time::Duration;

use regex::Regex;

use crate::error::{VerifyError, VerifyResult};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 30;

/// Known transient provider errors
pub const DEFAULT_RETRY_PATTERNS: &[(&str, &str)] = &[
    (
        ".*Error creating Service.*",
        "Retry on Cloud Run service creation errors",
    ),
    (".*Error waiting.*", "Retry on resource waiting errors"),
];

/// A compiled pattern plus the reason reported when it matches
#[derive(Debug, Clone)]
pub struct RetryPattern {
    regex: Regex,
    reason: String,
}

impl RetryPattern {
    pub fn new(pattern: &str, reason: impl Into<String>) -> VerifyResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| VerifyError::InvalidRetryPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            reason: reason.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Retry budget and classification rules for one invocation
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    patterns: Vec<RetryPattern>,
    max_retries: u32,
    time_between_retries: Duration,
}

impl RetryPolicy {
    pub fn new(
        patterns: Vec<RetryPattern>,
        max_retries: u32,
        time_between_retries: Duration,
    ) -> Self {
        Self {
            patterns,
            max_retries,
            time_between_retries,
        }
    }

    /// Compile `(pattern, reason)` pairs into a policy
    pub fn from_pairs<'a, I>(
        pairs: I,
        max_retries: u32,
        time_between_retries: Duration,
    ) -> VerifyResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let patterns = pairs
            .into_iter()
            .map(|(pattern, reason)| RetryPattern::new(pattern, reason))
            .collect::<VerifyResult<Vec<_>>>()?;
        Ok(Self::new(patterns, max_retries, time_between_retries))
    }

    /// A policy that never retries
    pub fn no_retries() -> Self {
        Self::new(Vec::new(), 0, Duration::ZERO)
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.time_between_retries = delay;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn time_between_retries(&self) -> Duration {
        self.time_between_retries
    }

    pub fn patterns(&self) -> &[RetryPattern] {
        &self.patterns
    }

    /// Return the first pattern matching `diagnostics`, if any.
    ///
    /// `None` means the failure is fatal and must not consume retry budget.
    pub fn classify(&self, diagnostics: &str) -> Option<&RetryPattern> {
        self.patterns.iter().find(|p| p.matches(diagnostics))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        let patterns = DEFAULT_RETRY_PATTERNS
            .iter()
            .filter_map(|(pattern, reason)| RetryPattern::new(pattern, *reason).ok())
            .collect();
        Self::new(
            patterns,
            DEFAULT_MAX_RETRIES,
            Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        )
    }
}
