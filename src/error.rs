use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unrecognized granularity `{0}`")]
    InvalidGranularity(String),
    #[error("unrecognized session profile `{0}`")]
    InvalidProfile(String),
    #[error("market `{0}` is neither future-like nor cash-like")]
    InvalidMarket(String),
    #[error("bar source unavailable: {0}")]
    SourceUnavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn source_unavailable<T: Into<String>>(msg: T) -> Self {
        AppError::SourceUnavailable(msg.into())
    }
}
