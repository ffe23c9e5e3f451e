//! Domain Services
//!
//! Stateless logic that operates on domain entities.
//!
//! - `gate` - Decide whether a scenario can run in this environment
//! - `checks` - Evaluate output checks with require/assert semantics
//! - `catalog` - The built-in scenarios and validation targets

pub mod catalog;
pub mod checks;
pub mod gate;

pub use catalog::{builtin_scenarios, find_scenario, validation_targets};
pub use checks::{run_checks, CheckReport};
pub use gate::{gate, GateDecision};
