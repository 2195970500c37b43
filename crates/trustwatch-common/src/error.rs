use thiserror::Error;

use crate::operation::Operation;

/// The single failure surfaced by the API gateway.
///
/// Carries only the operation that failed. Transport errors, non-success
/// statuses and undecodable bodies all collapse into this one value; the
/// underlying cause is logged where it happens and never reaches callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{}", .0.failure_message())]
    RequestFailed(Operation),
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::RequestFailed(op) => *op,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Process-level failures: configuration and server startup.
#[derive(Debug, Error)]
pub enum TrustwatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TrustwatchError>;
