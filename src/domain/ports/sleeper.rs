//! Sleeper Port
//!
//! The wait between retry attempts. Tests substitute a recorder so retry
//! loops run instantly.

use std::time::Duration;

pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}
