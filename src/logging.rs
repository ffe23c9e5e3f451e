//! Log output
//!
//! Everything goes to stderr so stdout stays clean for reports and the
//! `--json` event stream.

use tracing_subscriber::{fmt, EnvFilter};

/// Overrides the `-v` flags when set; takes `EnvFilter` directives
pub const LOG_ENV: &str = "HRAFNAR_VERIFY_LOG";

/// Default level for a given `-v` count
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("hrafnar_verify={}", level_for(verbose))))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: u8, ansi: bool) {
    let _ = fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}
