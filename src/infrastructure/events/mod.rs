//! Event Sink Implementations
//!
//! Provides concrete implementations of ScenarioEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: Human-readable progress through the log

mod json;
mod log;

pub use json::JsonEventSink;
pub use log::TracingEventSink;
