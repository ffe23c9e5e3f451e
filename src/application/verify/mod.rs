//! Verify Module
//!
//! Runs one deployment scenario end-to-end.
//!
//! ## Structure
//!
//! - `options` - Per-run settings (`VerifyOptions`)
//! - `result` - Report types (`ScenarioReport`, `ScenarioFailure`)
//! - `retry` - The retry loop shared by apply and destroy
//! - `teardown` - Drop guard that always destroys what was initialized
//! - `use_case` - Core use case logic (`VerifyUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use hrafnar_verify::application::verify::{VerifyOptions, VerifyUseCase};
//!
//! let use_case = VerifyUseCase::new(tool, tokens, env, sleeper);
//! let report = use_case.execute(&scenario, &VerifyOptions::new(module_root));
//! ```

mod options;
mod result;
mod retry;
mod teardown;
mod use_case;

pub use options::VerifyOptions;
pub use result::{ScenarioFailure, ScenarioOutcome, ScenarioReport, TeardownStatus};
pub use retry::{AbortReason, ApplyError};
pub use use_case::VerifyUseCase;
