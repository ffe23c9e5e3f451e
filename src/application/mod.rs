//! Application Layer
//!
//! Use cases that orchestrate the verification flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `VerifyUseCase` - One scenario end-to-end (gate, init, apply, check, destroy)
//! - `ValidateUseCase` - Init + validate only, no resources created
//! - `run_suite` - Many scenarios, parallel where allowed

pub mod suite;
pub mod validate;
pub mod verify;

pub use suite::{run_suite, SuiteReport};
pub use validate::{ValidateReport, ValidateUseCase, ValidationResult};
pub use verify::{
    ApplyError, ScenarioFailure, ScenarioOutcome, ScenarioReport, TeardownStatus, VerifyOptions,
    VerifyUseCase,
};
