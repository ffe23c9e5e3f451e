//! Token Source Port
//!
//! Supplies the random part of each scenario's name prefix. Injected so tests
//! can hand out deterministic tokens.

pub trait TokenSource: Send + Sync {
    /// A fresh token; consecutive calls should not repeat
    fn next_token(&self) -> String;
}
