//! Error handling for the point-of-sale client

use std::fmt;
use thiserror::Error;

/// Unified error type for the point-of-sale client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Login gate rejected the credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Input rejected locally before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation needs an active shift but none is tracked
    #[error("No active shift")]
    NoActiveShift,

    /// The server answered with a non-2xx status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new server error
    pub fn server<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Server {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Whether the error was raised locally, before reaching the server
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Auth(_) | Error::Validation(_) | Error::NoActiveShift
        )
    }
}
