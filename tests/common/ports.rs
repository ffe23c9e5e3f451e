//! In-memory port implementations for driving use cases directly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hrafnar_verify::domain::ports::{ScenarioEvent, ScenarioEventSink, Sleeper, TokenSource};

/// Records requested waits without waiting
#[derive(Default)]
pub struct NoSleep {
    pub waits: Mutex<Vec<Duration>>,
}

impl Sleeper for NoSleep {
    fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

/// Hands out `tok000`, `tok001`, ...
#[derive(Default)]
pub struct CountingTokens(AtomicUsize);

impl TokenSource for CountingTokens {
    fn next_token(&self) -> String {
        format!("tok{:03}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

/// Keeps every event for later inspection
#[derive(Default)]
pub struct EventLog(pub Mutex<Vec<ScenarioEvent>>);

impl EventLog {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ScenarioEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl ScenarioEventSink for EventLog {
    fn on_event(&self, event: ScenarioEvent) {
        self.0.lock().unwrap().push(event);
    }
}
