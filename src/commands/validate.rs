use std::path::PathBuf;

use anyhow::Result;

use hrafnar_verify::domain::services::validation_targets;
use hrafnar_verify::presentation::create_validate_use_case;

use super::Context;

/// Init and validate each directory; `Ok(false)` when any failed
pub fn cmd_validate(ctx: &Context, dirs: Vec<PathBuf>) -> Result<bool> {
    let dirs = if dirs.is_empty() {
        validation_targets()
    } else {
        dirs
    };

    let use_case = create_validate_use_case(&ctx.config);
    let report = use_case.execute(&ctx.module_root, &dirs);

    let mut out = std::io::stdout().lock();
    ctx.renderer().validation(&mut out, &report)?;
    Ok(report.is_success())
}
