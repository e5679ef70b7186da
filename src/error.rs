//! Error types for talking to the conversion API

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Connection, timeout, or other transport failure
    #[error("{0}")]
    Transport(String),

    /// Non-2xx status without a usable error body
    #[error("{0}")]
    Status(String),

    /// Server answered but refused the conversion
    #[error("{0}")]
    Rejected(String),

    /// Body could not be decoded into the expected shape
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Failures while building the app before the first frame
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] ClientError),
}
