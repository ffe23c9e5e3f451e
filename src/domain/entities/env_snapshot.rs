//! EnvSnapshot entity - environment inputs captured once per scenario
//!
//! The gate reads the environment exactly once; everything afterwards
//! (variables, conditional checks) works from this snapshot.

use std::collections::BTreeMap;

use crate::domain::ports::EnvSource;

/// Non-empty environment values keyed by variable name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    values: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture `keys` from `env`. Empty or whitespace-only values count as
    /// absent.
    pub fn capture<'a, I>(env: &dyn EnvSource, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values = keys
            .into_iter()
            .filter_map(|key| {
                env.var(key)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (key.to_string(), value))
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value of `key`, or `default` when it was not set
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Value of `key`, or an empty string
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get_or(key, "")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn all_present(&self, keys: &[&str]) -> bool {
        keys.iter().all(|key| self.contains(key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
