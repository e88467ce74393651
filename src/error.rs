//! Top-level error for startup and the comms runtime. The router itself
//! never fails outward; these are the ways the process can.

use thiserror::Error;

use crate::llm::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Unreadable or invalid config file.
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    /// Model provider could not be constructed (unknown name, bad client).
    #[error("model provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A chat channel failed to bind or crashed.
    #[error("comms error: {0}")]
    Comms(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
