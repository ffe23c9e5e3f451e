//! Common test utilities for hrafnar-verify integration tests.
//!
//! This module provides:
//! - `FakeTerraform`: a scripted stand-in for the terraform binary
//! - `TestEnv`: runs the CLI against a fake terraform in a temp module root
//! - In-memory ports for driving use cases directly

#![allow(dead_code)]

pub mod env;
pub mod fake_terraform;
pub mod ports;

pub use env::*;
pub use fake_terraform::*;
pub use ports::*;
