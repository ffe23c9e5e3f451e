//! Error types for hrafnar-verify
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::ToolError;

/// Result type alias for verifier operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Main error type for verifier operations
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A retry pattern is not a valid regular expression
    #[error("invalid retry pattern '{pattern}': {source}")]
    InvalidRetryPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Scenario name not present in the catalog
    #[error("unknown scenario '{name}' (known: {known})")]
    UnknownScenario { name: String, known: String },

    /// An override names a variable the verifier sets itself
    #[error("variable '{name}' is set by the verifier and cannot be overridden")]
    ReservedVariable { name: String },

    /// External tool failed
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
