//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command-line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Report renderers
//!
//! ## Usage
//!
//! ```ignore
//! use hrafnar_verify::presentation::factory;
//!
//! let use_case = factory::create_verify_use_case(&config, false);
//! let report = use_case.execute(&scenario, &options);
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands};
pub use factory::{create_validate_use_case, create_verify_use_case, select_scenarios};
pub use output::{create_renderer, OutputFormat, ReportRenderer, ScenarioRow};
