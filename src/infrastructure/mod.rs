//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `tool/` - Provisioning tools (Terraform CLI)
//! - `events/` - Scenario event sinks (JSON, tracing)
//! - `env` - Process environment
//! - `token` - Random name tokens
//! - `sleeper` - Blocking waits between retries

pub mod env;
pub mod events;
pub mod sleeper;
pub mod token;
pub mod tool;

// Re-export for convenience
pub use env::ProcessEnv;
pub use events::{JsonEventSink, TracingEventSink};
pub use sleeper::ThreadSleeper;
pub use token::RandomTokenSource;
pub use tool::TerraformCli;
