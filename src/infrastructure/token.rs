//! Random name tokens

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::domain::ports::TokenSource;

pub const TOKEN_LENGTH: usize = 6;

/// Six random alphanumeric characters per call, from the thread RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn next_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}
