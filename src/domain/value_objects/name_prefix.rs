//! Name Prefix Value Object
//!
//! Every resource a scenario creates is named after its prefix, so two runs
//! sharing a cloud project only stay apart if their prefixes differ.

use std::fmt;

use serde::Serialize;

/// Resource name prefix: `test-<tag>-<token>`, always lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NamePrefix(String);

impl NamePrefix {
    /// Combine a scenario tag with a random token.
    ///
    /// The token is lowercased: GCP resource names reject uppercase.
    pub fn new(tag: &str, token: &str) -> Self {
        Self(format!("test-{}-{}", tag, token.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NamePrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
