//! Value Objects
//!
//! Immutable values that carry their own validation.

mod abort;
pub mod env_keys;
mod name_prefix;
mod retry_policy;
mod var_value;

pub use abort::AbortSignal;
pub use name_prefix::NamePrefix;
pub use retry_policy::{
    RetryPattern, RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_SECS,
    DEFAULT_RETRY_PATTERNS,
};
pub use var_value::{VarValue, Variables, RESERVED_VARIABLES};
