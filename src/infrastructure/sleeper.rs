//! Blocking sleeper

use std::time::Duration;

use crate::domain::ports::Sleeper;

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tracing::debug!(seconds = duration.as_secs_f64(), "waiting before retry");
            std::thread::sleep(duration);
        }
    }
}
