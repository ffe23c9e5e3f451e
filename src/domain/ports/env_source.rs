//! Environment Source Port
//!
//! Read-only access to environment inputs. The process environment is the
//! production implementation; `StaticEnv` serves tests and dry listings.

use std::collections::HashMap;

pub trait EnvSource: Send + Sync {
    /// Value of `key`, or `None` when unset or not valid UTF-8
    fn var(&self, key: &str) -> Option<String>;
}

/// Fixed in-memory environment
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
