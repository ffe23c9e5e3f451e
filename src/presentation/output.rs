//! Output Rendering
//!
//! Provides a unified interface for rendering reports to different formats.

use std::io::{self, Write};

use crate::application::{ScenarioFailure, ScenarioOutcome, ScenarioReport, SuiteReport, TeardownStatus, ValidateReport};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON document per line, for CI
    Json,
}

/// Diagnostic lines shown per failure unless running verbose
const DIAGNOSTIC_TAIL: usize = 15;

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    skip: &'static str,
    warn: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            skip: "○",
            warn: "⚠",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            skip: "[SKIP]",
            warn: "[!]",
        }
    }
}

/// One line of `scenarios` output
#[derive(Debug, Clone)]
pub struct ScenarioRow {
    pub name: String,
    pub tag: String,
    pub dir: String,
    pub serial: bool,
    pub enabled: bool,
    /// Required inputs not set in this environment
    pub missing: Vec<String>,
}

impl ScenarioRow {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "tag": self.tag,
            "dir": self.dir,
            "concurrency": if self.serial { "serial" } else { "parallel" },
            "enabled": self.enabled,
            "runnable": self.enabled && self.missing.is_empty(),
            "missing": self.missing,
        })
    }
}

/// Trait for rendering command results
pub trait ReportRenderer {
    fn suite(&self, out: &mut dyn Write, report: &SuiteReport) -> io::Result<()>;
    fn validation(&self, out: &mut dyn Write, report: &ValidateReport) -> io::Result<()>;
    fn scenarios(&self, out: &mut dyn Write, rows: &[ScenarioRow]) -> io::Result<()>;
}

/// Text renderer
pub struct TextRenderer {
    /// Whether to use unicode
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    fn scenario(&self, out: &mut dyn Write, report: &ScenarioReport, icons: &Icons) -> io::Result<()> {
        let prefix = report.prefix.as_deref().unwrap_or("-");
        match &report.outcome {
            ScenarioOutcome::Passed => {
                write!(out, "{} {:<8} passed   {}", icons.check, report.scenario, prefix)?;
                if self.verbose > 0 {
                    write!(
                        out,
                        "  ({} apply attempt(s), {}s)",
                        report.apply_attempts,
                        report.duration().num_seconds()
                    )?;
                }
                writeln!(out)?;
            }
            ScenarioOutcome::Skipped { reason } => {
                writeln!(out, "{} {:<8} skipped  {}", icons.skip, report.scenario, reason)?;
            }
            ScenarioOutcome::Failed => {
                writeln!(out, "{} {:<8} failed   {}", icons.cross, report.scenario, prefix)?;
            }
        }

        if let Some(failure) = &report.failure {
            self.failure(out, failure, icons)?;
        }
        if let TeardownStatus::Failed(error) = &report.teardown {
            // Already printed as the failure itself when nothing else failed
            if !matches!(report.failure, Some(ScenarioFailure::Teardown(_))) {
                let headline = error.lines().next().unwrap_or_default();
                writeln!(out, "    {} teardown failed: {}", icons.warn, headline)?;
            }
        }
        Ok(())
    }

    fn failure(&self, out: &mut dyn Write, failure: &ScenarioFailure, icons: &Icons) -> io::Result<()> {
        let diagnostics = match failure {
            ScenarioFailure::Assertions(failures) => {
                for f in failures {
                    writeln!(out, "    {} {}", icons.cross, f)?;
                }
                return Ok(());
            }
            ScenarioFailure::Initialize(err) | ScenarioFailure::ReadOutputs(err) => {
                Some(err.diagnostics.as_str())
            }
            ScenarioFailure::Apply(err) => Some(err.last_error().diagnostics.as_str()),
            _ => None,
        };

        let message = failure.to_string();
        let headline = message.lines().next().unwrap_or_default();
        writeln!(out, "    {} {}", icons.cross, headline)?;

        if let Some(text) = diagnostics {
            let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            let start = if self.verbose > 0 {
                0
            } else {
                lines.len().saturating_sub(DIAGNOSTIC_TAIL)
            };
            for line in &lines[start..] {
                writeln!(out, "      | {}", line)?;
            }
        }
        Ok(())
    }
}

impl ReportRenderer for TextRenderer {
    fn suite(&self, out: &mut dyn Write, report: &SuiteReport) -> io::Result<()> {
        let icons = self.icons();
        for scenario in &report.reports {
            self.scenario(out, scenario, &icons)?;
        }
        writeln!(out)?;
        let status = if report.is_success() {
            icons.check
        } else {
            icons.cross
        };
        writeln!(
            out,
            "{} {} passed, {} failed, {} skipped",
            status,
            report.passed(),
            report.failed(),
            report.skipped()
        )
    }

    fn validation(&self, out: &mut dyn Write, report: &ValidateReport) -> io::Result<()> {
        let icons = self.icons();
        for result in &report.results {
            match &result.error {
                None => writeln!(out, "{} {}", icons.check, result.dir.display())?,
                Some(err) => {
                    writeln!(out, "{} {} ({} failed)", icons.cross, result.dir.display(), err.command)?;
                    for line in err.diagnostics.lines().filter(|l| !l.trim().is_empty()) {
                        writeln!(out, "      | {}", line)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn scenarios(&self, out: &mut dyn Write, rows: &[ScenarioRow]) -> io::Result<()> {
        let icons = self.icons();
        for row in rows {
            let (icon, note) = if !row.enabled {
                (icons.skip, "disabled in configuration".to_string())
            } else if !row.missing.is_empty() {
                (icons.skip, format!("missing {}", row.missing.join(", ")))
            } else {
                (icons.check, "ready".to_string())
            };
            let mode = if row.serial { "serial" } else { "parallel" };
            writeln!(
                out,
                "{} {:<8} {:<4} {:<14} {:<8} {}",
                icon, row.name, row.tag, row.dir, mode, note
            )?;
        }
        Ok(())
    }
}

/// JSON renderer; one compact document per call so the stream stays NDJSON
pub struct JsonRenderer;

impl JsonRenderer {
    fn emit(out: &mut dyn Write, kind: &str, mut body: serde_json::Value) -> io::Result<()> {
        body["event"] = serde_json::json!(kind);
        writeln!(out, "{}", body)
    }
}

impl ReportRenderer for JsonRenderer {
    fn suite(&self, out: &mut dyn Write, report: &SuiteReport) -> io::Result<()> {
        Self::emit(out, "report", report.to_json())
    }

    fn validation(&self, out: &mut dyn Write, report: &ValidateReport) -> io::Result<()> {
        Self::emit(out, "validation", report.to_json())
    }

    fn scenarios(&self, out: &mut dyn Write, rows: &[ScenarioRow]) -> io::Result<()> {
        let body = serde_json::json!({
            "scenarios": rows.iter().map(ScenarioRow::to_json).collect::<Vec<_>>(),
        });
        Self::emit(out, "scenarios", body)
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool, verbose: u8) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode, verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
