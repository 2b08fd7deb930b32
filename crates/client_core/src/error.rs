//! Error types for the client core
//!
//! One enum per concern: the rules boundary, the prediction service, and
//! configuration loading.

use std::path::PathBuf;

/// Errors raised at the boundary with the rules engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The position encoding could not be parsed
    #[error("invalid FEN `{fen}`")]
    InvalidFen { fen: String },

    /// Text that does not describe a move at all
    #[error("malformed move `{text}`")]
    MalformedMove { text: String },

    /// A well-formed move that is not legal in the current position
    #[error("illegal move {from}{to}")]
    IllegalMove { from: String, to: String },
}

/// Errors from the remote prediction / history endpoints
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The fixed request timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or body transfer failure
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    /// The body was not the expected JSON shape
    #[error("undecodable response: {0}")]
    Decode(String),

    /// The base URL in the configuration is unusable
    #[error("invalid endpoint url `{0}`")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if let Some(status) = err.status() {
            ServiceError::Status(status.as_u16())
        } else if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err)
        }
    }
}

/// Errors while loading a client configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid server url `{0}`")]
    InvalidUrl(String),

    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;
