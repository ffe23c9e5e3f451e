//! Output check evaluation

use crate::domain::entities::{AssertionFailure, OutputCheck, OutputSet, Severity};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub failures: Vec<AssertionFailure>,
    /// Number of checks actually evaluated
    pub evaluated: usize,
    /// A `Require` check failed and the rest were not evaluated
    pub stopped_early: bool,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Evaluate `checks` in order. A failed `Require` check ends evaluation;
/// failed `Assert` checks are collected and evaluation continues.
pub fn run_checks(checks: &[OutputCheck], outputs: &OutputSet) -> CheckReport {
    let mut report = CheckReport::default();
    for check in checks {
        report.evaluated += 1;
        if let Err(failure) = check.evaluate(outputs) {
            let stop = failure.severity == Severity::Require;
            report.failures.push(failure);
            if stop {
                report.stopped_early = report.evaluated < checks.len();
                break;
            }
        }
    }
    report
}
