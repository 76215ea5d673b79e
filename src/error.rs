use crate::config::ConfigError;
use thiserror::Error;

/// Errors that stop the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid bind address: {0}")]
    BindAddr(#[from] std::net::AddrParseError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
