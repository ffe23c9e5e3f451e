//! hrafnar-verify CLI
//!
//! Usage: hrafnar-verify <COMMAND>
//!
//! Commands:
//!   run        Deploy scenarios, check their outputs and destroy them
//!   validate   Initialize and validate configurations only
//!   scenarios  List built-in scenarios

mod commands;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;

use hrafnar_verify::logging;
use hrafnar_verify::presentation::{Cli, Commands};

use commands::{Context, RunArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, std::io::stderr().is_terminal());

    let ctx = Context::load(
        cli.config.as_deref(),
        cli.module_root.as_deref(),
        cli.json,
        cli.verbose,
    )?;

    let success = match cli.command {
        Commands::Run {
            scenarios,
            vars,
            max_retries,
            retry_delay,
            deadline,
        } => commands::cmd_run(
            &ctx,
            RunArgs {
                scenarios,
                vars,
                max_retries,
                retry_delay,
                deadline,
            },
        )?,
        Commands::Validate { dirs } => commands::cmd_validate(&ctx, dirs)?,
        Commands::Scenarios => commands::cmd_scenarios(&ctx)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
