//! Crate-wide error type.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing, annealing, measuring or batching.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed instance data. Fatal for the whole file.
    #[error("invalid instance data on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Timer used out of order.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Unbound engine, invalid schedule or unusable batch setup.
    #[error("configuration error: {0}")]
    Config(String),

    /// A batch worker process ended abnormally.
    #[error("worker for {file} failed: {reason}")]
    Worker { file: String, reason: String },
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
