//! OutputCheck entity - one expectation about one output
//!
//! Checks only look at format properties (non-empty, contains a suffix or a
//! domain) rather than validating a full schema.

use std::fmt;

use serde::Serialize;

use super::OutputSet;

/// What the output value must look like
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Expectation {
    NonEmpty,
    Empty,
    Contains(String),
    Equals(String),
}

impl Expectation {
    fn holds(&self, actual: &str) -> bool {
        match self {
            Expectation::NonEmpty => !actual.is_empty(),
            Expectation::Empty => actual.is_empty(),
            Expectation::Contains(needle) => actual.contains(needle.as_str()),
            Expectation::Equals(expected) => actual == expected,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::NonEmpty => write!(f, "non-empty"),
            Expectation::Empty => write!(f, "empty"),
            Expectation::Contains(needle) => write!(f, "containing {:?}", needle),
            Expectation::Equals(expected) => write!(f, "equal to {:?}", expected),
        }
    }
}

/// How a failed check affects the rest of the scenario's checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stop evaluating further checks
    Require,
    /// Record and keep going
    #[default]
    Assert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCheck {
    output: String,
    expectation: Expectation,
    severity: Severity,
    message: String,
}

impl OutputCheck {
    pub fn new(output: impl Into<String>, expectation: Expectation, message: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            expectation,
            severity: Severity::Assert,
            message: message.into(),
        }
    }

    pub fn non_empty(output: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(output, Expectation::NonEmpty, message)
    }

    pub fn empty(output: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(output, Expectation::Empty, message)
    }

    pub fn contains(
        output: impl Into<String>,
        needle: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(output, Expectation::Contains(needle.into()), message)
    }

    pub fn equals(
        output: impl Into<String>,
        expected: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(output, Expectation::Equals(expected.into()), message)
    }

    /// Turn this check into a `Require` check
    pub fn required(mut self) -> Self {
        self.severity = Severity::Require;
        self
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn evaluate(&self, outputs: &OutputSet) -> Result<(), AssertionFailure> {
        let actual = outputs.read(&self.output);
        if self.expectation.holds(actual) {
            return Ok(());
        }
        Err(AssertionFailure {
            output: self.output.clone(),
            expectation: self.expectation.clone(),
            actual: actual.to_string(),
            message: self.message.clone(),
            severity: self.severity,
        })
    }
}

/// A check that did not hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    pub output: String,
    pub expectation: Expectation,
    pub actual: String,
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {} to be {}, got {:?}",
            self.message, self.output, self.expectation, self.actual
        )
    }
}
