//! Domain Entities
//!
//! - `Scenario` - A named deployment scenario and its environment needs
//! - `InvocationSpec` - Everything one provisioning run needs
//! - `OutputSet` - Outputs read back after a successful apply
//! - `OutputCheck` - A single expectation on one output
//! - `EnvSnapshot` - Environment inputs read once at gate time

mod env_snapshot;
mod invocation_spec;
mod output_check;
mod output_set;
mod scenario;

pub use env_snapshot::EnvSnapshot;
pub use invocation_spec::InvocationSpec;
pub use output_check::{AssertionFailure, Expectation, OutputCheck, Severity};
pub use output_set::OutputSet;
pub use scenario::{Concurrency, Scenario, ScenarioInputs, ScenarioKind, ScenarioPlan};
