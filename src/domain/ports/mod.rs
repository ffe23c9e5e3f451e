//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations; tests provide
//! in-memory fakes.

pub mod env_source;
pub mod provisioning_tool;
pub mod scenario_events;
pub mod sleeper;
pub mod token_source;

pub use env_source::{EnvSource, StaticEnv};
pub use provisioning_tool::{ProvisioningTool, ToolCommand, ToolError, ToolErrorKind};
pub use scenario_events::{NoopEventSink, ScenarioEvent, ScenarioEventSink, ScenarioPhase};
pub use sleeper::Sleeper;
pub use token_source::TokenSource;
