use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};

use hrafnar_verify::application::{run_suite, VerifyOptions};
use hrafnar_verify::domain::value_objects::{AbortSignal, VarValue, Variables};
use hrafnar_verify::presentation::{create_verify_use_case, select_scenarios};

use super::Context;

/// `run` arguments after clap parsing
pub struct RunArgs {
    pub scenarios: Vec<String>,
    pub vars: Vec<(String, VarValue)>,
    pub max_retries: Option<u32>,
    pub retry_delay: Option<u64>,
    pub deadline: Option<u64>,
}

/// Deploy, check and destroy the selected scenarios; `Ok(false)` when any failed
pub fn cmd_run(ctx: &Context, args: RunArgs) -> Result<bool> {
    let selection = select_scenarios(&ctx.config, &args.scenarios)?;

    let mut retry = ctx
        .config
        .retry_policy()
        .context("building retry policy from configuration")?;
    if let Some(n) = args.max_retries {
        retry = retry.with_max_retries(n);
    }
    if let Some(secs) = args.retry_delay {
        retry = retry.with_delay(Duration::from_secs(secs));
    }

    let overrides: Variables = args.vars.into_iter().collect();
    overrides.ensure_overridable()?;

    // First Ctrl+C stops new attempts; scenarios still destroy what they created
    let abort = AbortSignal::new();
    let handler_abort = abort.clone();
    ctrlc::set_handler(move || {
        if !handler_abort.is_raised() {
            tracing::warn!("interrupt received, finishing current step and tearing down");
        }
        handler_abort.raise();
    })
    .context("installing Ctrl+C handler")?;

    let mut options = VerifyOptions::new(&ctx.module_root)
        .with_retry(retry)
        .with_overrides(overrides)
        .with_abort(abort);
    if let Some(secs) = args.deadline {
        options = options.with_deadline(Instant::now() + Duration::from_secs(secs));
    }

    tracing::info!(
        module_root = %ctx.module_root.display(),
        scenarios = selection.scenarios.len(),
        "starting verification run"
    );

    let use_case = create_verify_use_case(&ctx.config, ctx.json);
    let mut report = run_suite(&use_case, &selection.scenarios, &options);
    for skipped in selection.disabled {
        report.push(skipped);
    }

    let mut out = std::io::stdout().lock();
    ctx.renderer().suite(&mut out, &report)?;
    Ok(report.is_success())
}
