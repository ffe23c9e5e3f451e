//! Domain Layer
//!
//! The verifier's vocabulary without any I/O: what a scenario is, how an
//! invocation is described, how failures are classified and how outputs are
//! checked.
//!
//! ## Structure
//!
//! - `entities/` - Scenario, InvocationSpec, OutputSet
//! - `value_objects/` - VarValue, NamePrefix, RetryPolicy, AbortSignal
//! - `services/` - Gate, output checks, built-in scenario catalog
//! - `ports/` - Interfaces implemented by infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Subprocesses, environment and clocks go through ports
//! 2. **Immutable specs** - An InvocationSpec never changes once built
//! 3. **Ports & Adapters** - Tests swap every port for an in-memory fake

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
