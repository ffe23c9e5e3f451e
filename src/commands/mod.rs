//! Command handlers for the `hrafnar-verify` binary

mod run;
mod scenarios;
mod validate;

pub use run::{cmd_run, RunArgs};
pub use scenarios::cmd_scenarios;
pub use validate::cmd_validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use is_terminal::IsTerminal;

use hrafnar_verify::config::{self, Config};
use hrafnar_verify::infrastructure::ProcessEnv;
use hrafnar_verify::presentation::{create_renderer, OutputFormat, ReportRenderer};

/// State every command starts from
pub struct Context {
    pub config: Config,
    pub module_root: PathBuf,
    pub json: bool,
    pub verbose: u8,
}

impl Context {
    /// Load config and settle the module root.
    ///
    /// `--module-root` wins over `tool.module_root`, which wins over the
    /// working directory. The project config is looked up in the
    /// `--module-root` directory (or the working directory).
    pub fn load(
        explicit_config: Option<&Path>,
        module_root: Option<&Path>,
        json: bool,
        verbose: u8,
    ) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let lookup_root = module_root.unwrap_or(&cwd);

        let (config, warnings) = config::load(explicit_config, lookup_root, &ProcessEnv)?;
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let module_root = module_root
            .map(Path::to_path_buf)
            .or_else(|| config.tool.module_root.clone())
            .unwrap_or(cwd);

        Ok(Self {
            config,
            module_root,
            json,
            verbose,
        })
    }

    pub fn renderer(&self) -> Box<dyn ReportRenderer> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        create_renderer(format, std::io::stdout().is_terminal(), self.verbose)
    }
}
