//! Tracing setup. Output goes to stderr; stdout belongs to the console
//! channel's chat transcript.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Level for `count` repeated `-v` flags. `None` leaves the choice to
/// `RUST_LOG` and the config file.
///
/// `-v` warn, `-vv` info, `-vvv` debug (one line per routing decision),
/// `-vvvv` and up trace.
pub fn verbosity_level(count: u8) -> Option<&'static str> {
    match count {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Install the global subscriber. Call once, after the level is resolved.
///
/// `from_cli` means `level` came from `-v` flags and beats `RUST_LOG`;
/// otherwise `RUST_LOG` beats the configured `level`.
pub fn init(level: &str, from_cli: bool) -> Result<(), AppError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(level, from_cli, env.as_deref())?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

fn filter(level: &str, from_cli: bool, env: Option<&str>) -> Result<EnvFilter, AppError> {
    let (first, second) = if from_cli { (Some(level), env) } else { (env, Some(level)) };
    first
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| second.and_then(|d| EnvFilter::try_new(d).ok()))
        .ok_or_else(|| AppError::Logger(format!("invalid log level '{level}'")))
}
